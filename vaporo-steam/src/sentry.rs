//! Sentry token storage.
//!
//! Steam issues a 20-byte sentry token once, after a logon that needed a
//! one-time code. Replaying it on later logons skips the code. A token must
//! be saved before it is used again, so a store write always happens before
//! the in-memory copy changes.
//!
//! Two stores are provided:
//! * [`FileSentry`]: a flat 20-byte file (default).
//! * [`MemorySentry`]: nothing on disk, for tests.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size of a sentry token in bytes.
pub const SENTRY_LEN: usize = 20;

// ─── SentryHash ───────────────────────────────────────────────────────────────

/// A 20-byte device-authorization token.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SentryHash(pub [u8; SENTRY_LEN]);

impl SentryHash {
    /// Interpret raw file contents.
    ///
    /// Empty or all-zero input means "no token". Any length other than 0 or
    /// [`SENTRY_LEN`] is invalid.
    pub fn from_bytes(bytes: &[u8]) -> io::Result<Option<Self>> {
        if bytes.is_empty() {
            return Ok(None);
        }
        let arr: [u8; SENTRY_LEN] = bytes.try_into().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("sentry must be {SENTRY_LEN} bytes, got {}", bytes.len()),
            )
        })?;
        if arr.iter().all(|b| *b == 0) {
            return Ok(None);
        }
        Ok(Some(Self(arr)))
    }

    /// The raw token bytes.
    pub fn as_bytes(&self) -> &[u8; SENTRY_LEN] { &self.0 }
}

impl fmt::Debug for SentryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SentryHash(..)")
    }
}

// ─── Trait ────────────────────────────────────────────────────────────────────

/// Where the sentry token lives between runs.
pub trait SentryStore {
    /// Load the stored token, or `None` if there is none.
    fn load(&self) -> io::Result<Option<SentryHash>>;

    /// Replace the stored token.
    fn save(&self, sentry: &SentryHash) -> io::Result<()>;

    /// Human-readable name of this store (for log messages).
    fn name(&self) -> &str;
}

// ─── FileSentry ───────────────────────────────────────────────────────────────

/// Stores the token as a flat binary file of exactly 20 bytes.
#[derive(Clone, Debug)]
pub struct FileSentry {
    path: PathBuf,
}

impl FileSentry {
    /// Use the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path { &self.path }
}

impl SentryStore for FileSentry {
    fn load(&self) -> io::Result<Option<SentryHash>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => SentryHash::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, sentry: &SentryHash) -> io::Result<()> {
        // Truncates any previous token.
        let mut file = File::create(&self.path)?;
        file.write_all(sentry.as_bytes())?;
        file.sync_all()
    }

    fn name(&self) -> &str { "file" }
}

// ─── MemorySentry ─────────────────────────────────────────────────────────────

/// A store that keeps the token in memory only.
#[derive(Debug, Default)]
pub struct MemorySentry {
    data: Mutex<Option<SentryHash>>,
}

impl MemorySentry {
    /// An empty store.
    pub fn new() -> Self { Self::default() }

    /// A store that already holds `sentry`.
    pub fn with(sentry: SentryHash) -> Self {
        Self { data: Mutex::new(Some(sentry)) }
    }
}

impl SentryStore for MemorySentry {
    fn load(&self) -> io::Result<Option<SentryHash>> {
        let lock = self.data.lock().map_err(|_| io::Error::other("sentry lock poisoned"))?;
        Ok(*lock)
    }

    fn save(&self, sentry: &SentryHash) -> io::Result<()> {
        let mut lock = self.data.lock().map_err(|_| io::Error::other("sentry lock poisoned"))?;
        *lock = Some(*sentry);
        Ok(())
    }

    fn name(&self) -> &str { "in-memory" }
}

impl<S: SentryStore + ?Sized> SentryStore for &S {
    fn load(&self) -> io::Result<Option<SentryHash>> { (**self).load() }
    fn save(&self, sentry: &SentryHash) -> io::Result<()> { (**self).save(sentry) }
    fn name(&self) -> &str { (**self).name() }
}
