//! Best score persistence
//!
//! The only persisted value is a single integer. Backends never fail loudly:
//! anything missing or unparsable reads as 0 and write failures are logged.

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage key shared by all key-value backends
pub const BEST_SCORE_KEY: &str = "pixelRunner_highScore";

/// Get/set access to the persisted best score
pub trait BestScoreStore {
    fn load_best_score(&self) -> u64;
    fn save_best_score(&mut self, score: u64);
}

/// Parse a stored value. Whitespace is tolerated, anything else is 0.
pub fn parse_best_score(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

/// In-memory store (tests, headless hosts without a disk)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    /// Number of writes performed
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a raw value, as if written by an earlier session
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Some(raw.into()),
            writes: 0,
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&self) -> u64 {
        self.value.as_deref().map(parse_best_score).unwrap_or(0)
    }

    fn save_best_score(&mut self, score: u64) {
        self.value = Some(score.to_string());
        self.writes += 1;
    }
}
