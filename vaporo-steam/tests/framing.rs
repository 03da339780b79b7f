use vaporo_steam::Framer;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Units are `[4-byte LE length][body]`; the engine first wants the header,
/// then the body, then the next header.
fn wire(bodies: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    for b in bodies {
        out.extend_from_slice(&(b.len() as u32).to_le_bytes());
        out.extend_from_slice(b);
    }
    out
}

struct LengthPrefixed {
    seen:        Vec<Vec<u8>>,
    expect_body: bool,
}

impl LengthPrefixed {
    fn new() -> Self { Self { seen: Vec::new(), expect_body: false } }

    fn consume(&mut self, unit: &[u8]) -> usize {
        self.seen.push(unit.to_vec());
        if self.expect_body {
            self.expect_body = false;
            4
        } else {
            let len = u32::from_le_bytes(unit.try_into().unwrap()) as usize;
            if len == 0 {
                return 4;
            }
            self.expect_body = true;
            len
        }
    }
}

fn run(chunks: &[&[u8]]) -> Vec<Vec<u8>> {
    let mut framer = Framer::new();
    let mut engine = LengthPrefixed::new();
    framer.reset(4);
    for c in chunks {
        framer.feed(c, |u| engine.consume(u));
    }
    engine.seen
}

// ── Framing invariant ─────────────────────────────────────────────────────────

#[test]
fn byte_at_a_time_matches_single_chunk() {
    let data = wire(&[b"hello", b"", b"steam gateway", &[0xAA; 300]]);

    let whole = run(&[&data]);
    let bytes: Vec<&[u8]> = data.chunks(1).collect();
    let single = run(&bytes);

    assert_eq!(whole, single);
    assert_eq!(whole.len(), 7, "4 headers + 3 non-empty bodies");
}

#[test]
fn arbitrary_chunk_boundaries_match() {
    let data = wire(&[b"abc", b"defghij", b"k"]);
    let whole = run(&[&data]);
    for size in 2..data.len() {
        let chunks: Vec<&[u8]> = data.chunks(size).collect();
        assert_eq!(run(&chunks), whole, "chunk size {size}");
    }
}

#[test]
fn one_read_with_several_units_drains_all() {
    let data = wire(&[b"one", b"two", b"three"]);
    let mut framer = Framer::new();
    let mut engine = LengthPrefixed::new();
    framer.reset(4);
    let units = framer.feed(&data, |u| engine.consume(u));
    assert_eq!(units, 6);
    assert_eq!(framer.pending(), 0);
    assert_eq!(framer.wanted(), 4);
}

// ── Partial input ─────────────────────────────────────────────────────────────

#[test]
fn short_input_is_buffered_not_consumed() {
    let mut framer = Framer::new();
    framer.reset(8);
    let mut calls = 0;
    assert_eq!(framer.feed(&[1, 2, 3], |_| { calls += 1; 8 }), 0);
    assert_eq!(calls, 0);
    assert_eq!(framer.pending(), 3);

    let mut got = Vec::new();
    framer.feed(&[4, 5, 6, 7, 8, 9], |u| { got = u.to_vec(); 8 });
    assert_eq!(got, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(framer.pending(), 1);
}

#[test]
fn zero_wanted_size_stops_the_loop() {
    let mut framer = Framer::new();
    framer.reset(2);
    let mut calls = 0;
    framer.feed(&[0; 10], |_| { calls += 1; 0 });
    assert_eq!(calls, 1);
    assert_eq!(framer.pending(), 8);
}

#[test]
fn reset_drops_buffered_bytes() {
    let mut framer = Framer::new();
    framer.reset(16);
    framer.feed(&[1; 5], |_| 16);
    framer.reset(4);
    assert_eq!(framer.pending(), 0);
    assert_eq!(framer.wanted(), 4);
}
