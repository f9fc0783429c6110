//! Score ledger
//!
//! `score = floor(distance * multiplier) + coins * coin_value`. The distance
//! part is recomputed from the running total each tick; the coin part is
//! credited once and never taken back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ScoreConfig;

/// Zero-padded six digit score for HUDs
pub fn format_score(score: u64) -> String {
    format!("{:06}", score)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreLedger {
    distance: f64,
    coins: u64,
    score: u64,
    best_score: u64,
    reached: BTreeSet<u64>,
    distance_multiplier: f64,
    coin_value: u64,
    milestones: Vec<u64>,
    finished: bool,
}

impl ScoreLedger {
    pub fn new(config: &ScoreConfig, coin_value: u64, best_score: u64) -> Self {
        let mut milestones = config.milestones.clone();
        milestones.sort_unstable();
        milestones.dedup();
        Self {
            distance: 0.0,
            coins: 0,
            score: 0,
            best_score,
            reached: BTreeSet::new(),
            distance_multiplier: config.distance_multiplier,
            coin_value,
            milestones,
            finished: false,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Larger of the live score and the stored best
    pub fn display_best(&self) -> u64 {
        self.score.max(self.best_score)
    }

    pub fn is_new_best(&self) -> bool {
        self.score > self.best_score
    }

    pub fn reached_milestones(&self) -> impl Iterator<Item = u64> + '_ {
        self.reached.iter().copied()
    }

    fn recompute(&mut self) {
        let from_distance = (self.distance * self.distance_multiplier).floor().max(0.0) as u64;
        // Coin credit is permanent, distance only grows, so this never drops
        self.score = self.score.max(from_distance + self.coins * self.coin_value);
    }

    /// Credit collected coins
    pub fn add_coins(&mut self, count: u64) {
        self.coins += count;
        self.recompute();
    }

    /// Set the run's total distance and recompute the score.
    /// Returns milestones crossed for the first time, ascending.
    pub fn update_distance(&mut self, total: f64) -> Vec<u64> {
        if total.is_finite() && total > self.distance {
            self.distance = total;
        }
        self.recompute();
        self.check_milestones()
    }

    fn check_milestones(&mut self) -> Vec<u64> {
        let mut crossed = Vec::new();
        for &milestone in &self.milestones {
            if self.score >= milestone && self.reached.insert(milestone) {
                crossed.push(milestone);
            }
        }
        crossed
    }

    /// Close the run. Returns the new best if this run beat it.
    /// Only the first call per run can report a new best.
    pub fn finish_run(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }
        self.finished = true;
        if self.score > self.best_score {
            self.best_score = self.score;
            Some(self.score)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fresh run, keeping the best score
    pub fn reset(&mut self) {
        self.distance = 0.0;
        self.coins = 0;
        self.score = 0;
        self.reached.clear();
        self.finished = false;
    }
}
