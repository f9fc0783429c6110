//! Browser LocalStorage backend (wasm32 only)

use super::{BEST_SCORE_KEY, BestScoreStore, parse_best_score};

/// Best score kept under a single LocalStorage key
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl BestScoreStore for LocalStorageStore {
    fn load_best_score(&self) -> u64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(raw)) = storage.get_item(BEST_SCORE_KEY) {
                let best = parse_best_score(&raw);
                log::info!("Loaded best score {}", best);
                return best;
            }
        }

        log::info!("No best score found, starting fresh");
        0
    }

    fn save_best_score(&mut self, score: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(BEST_SCORE_KEY, &score.to_string()).is_err() {
                    log::warn!("LocalStorage rejected best score write");
                } else {
                    log::info!("Best score {} saved", score);
                }
            }
            None => log::warn!("LocalStorage unavailable, best score not saved"),
        }
    }
}
