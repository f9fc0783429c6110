//! Plain-text file backend (native hosts)

use std::fs;
use std::path::{Path, PathBuf};

use super::{BestScoreStore, parse_best_score};

/// Best score kept as a bare integer in a text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileStore {
    fn load_best_score(&self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let best = parse_best_score(&raw);
                log::info!("Loaded best score {} from {}", best, self.path.display());
                best
            }
            Err(_) => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                0
            }
        }
    }

    fn save_best_score(&mut self, score: u64) {
        // Write to a sibling temp file first so a crash never leaves a torn value
        let tmp = self.path.with_extension("tmp");
        let result = fs::write(&tmp, score.to_string()).and_then(|_| fs::rename(&tmp, &self.path));
        match result {
            Ok(()) => log::info!("Best score {} saved", score),
            Err(e) => log::warn!("Could not save best score to {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixel_runner_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.load_best_score(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.save_best_score(777);
        assert_eq!(FileStore::new(&path).load_best_score(), 777);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_reads_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(FileStore::new(&path).load_best_score(), 0);
        let _ = fs::remove_file(&path);
    }
}
