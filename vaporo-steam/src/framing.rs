//! Pending-byte cursor between the socket and the protocol engine.
//!
//! The engine announces how many bytes it needs before it can parse its next
//! unit (the "wanted size"). The [`Framer`] accumulates received chunks and
//! hands the engine exactly that many bytes at a time, refreshing the wanted
//! size after each call. A single network read may carry several units, so
//! the check repeats until too few bytes remain.

/// Accumulation buffer plus read cursor.
#[derive(Debug, Default)]
pub struct Framer {
    buf:    Vec<u8>,
    /// Start of the unconsumed region of `buf`.
    pos:    usize,
    wanted: usize,
}

impl Framer {
    /// Create an empty framer that wants nothing yet.
    pub fn new() -> Self { Self::default() }

    /// Drop all buffered bytes and start over with `wanted`.
    pub fn reset(&mut self, wanted: usize) {
        self.buf.clear();
        self.pos    = 0;
        self.wanted = wanted;
    }

    /// Number of bytes the engine needs for its next unit.
    pub fn wanted(&self) -> usize { self.wanted }

    /// Number of received bytes not yet handed to the engine.
    pub fn pending(&self) -> usize { self.buf.len() - self.pos }

    /// Append received bytes without consuming anything.
    pub fn push(&mut self, chunk: &[u8]) {
        self.compact();
        self.buf.extend_from_slice(chunk);
        log::debug!(
            "[vaporo] data received: {}, we have {} and steam wants {}",
            chunk.len(), self.pending(), self.wanted
        );
    }

    /// Take the next complete unit, if enough bytes are buffered.
    ///
    /// The caller must report the engine's next wanted size through
    /// [`set_wanted`](Self::set_wanted) before asking again; until then the
    /// wanted size is zero and no unit is returned.
    pub fn next_unit(&mut self) -> Option<&[u8]> {
        if self.wanted == 0 || self.pending() < self.wanted {
            return None;
        }
        let start = self.pos;
        self.pos += self.wanted;
        self.wanted = 0;
        Some(&self.buf[start..self.pos])
    }

    /// Record the size the engine needs next.
    pub fn set_wanted(&mut self, wanted: usize) {
        log::debug!("[vaporo] new wanted size: {wanted}");
        self.wanted = wanted;
    }

    /// Append `chunk`, then hand every complete unit to `consume`.
    ///
    /// `consume` gets exactly [`wanted`](Self::wanted) bytes and returns the
    /// next wanted size. A wanted size of zero means the engine is idle; the
    /// bytes stay buffered until the next [`reset`](Self::reset).
    ///
    /// Returns the number of units delivered.
    pub fn feed<F>(&mut self, chunk: &[u8], mut consume: F) -> usize
    where
        F: FnMut(&[u8]) -> usize,
    {
        self.push(chunk);
        let mut units = 0;
        while let Some(unit) = self.next_unit() {
            let wanted = consume(unit);
            self.set_wanted(wanted);
            units += 1;
        }
        units
    }

    fn compact(&mut self) {
        if self.pos == self.buf.len() {
            self.buf.clear();
            self.pos = 0;
        } else if self.pos > 0 && self.pos >= self.buf.len() / 2 {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }
    }
}
