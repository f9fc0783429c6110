//! Horizontal-gap spawn rule shared by every spawner
//!
//! A spawner may add a new entity only while the rightmost thing it owns sits
//! further than `gap` from the leading screen edge. The gap is re-rolled on
//! every attempt, so spacing varies within the configured range.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Remembers where the most recent spawn has scrolled to.
///
/// Used as the rightmost position while the pool is empty, so a pool that
/// was just emptied by a pickup or cull doesn't look like a fresh field.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpawnCursor {
    last_x: f32,
}

impl SpawnCursor {
    /// Fresh field: rightmost is 0 by convention
    pub fn new() -> Self {
        Self { last_x: 0.0 }
    }

    /// Scroll with the world
    pub fn drift(&mut self, dx: f32) {
        self.last_x -= dx;
    }

    /// Record a spawn at `x`
    pub fn mark(&mut self, x: f32) {
        self.last_x = x;
    }

    /// Rightmost live entity x, or the drifted cursor for an empty pool
    pub fn rightmost<K>(&self, pool: &[Entity<K>]) -> f32 {
        pool.iter()
            .filter(|e| e.alive)
            .map(|e| e.pos.x)
            .reduce(f32::max)
            .unwrap_or(self.last_x)
    }
}

/// Inclusive gap range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapRange {
    pub min: f32,
    pub max: f32,
}

impl GapRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform draw from the range (degenerate ranges return `min`)
    pub fn roll(&self, rng: &mut Pcg32) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Whether a spawn is due. A non-positive gap is never due.
#[inline]
pub fn gap_satisfied(rightmost_x: f32, world_width: f32, gap: f32) -> bool {
    gap > 0.0 && rightmost_x < world_width - gap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Obstacle, ObstacleKind};
    use glam::Vec2;
    use rand::SeedableRng;

    #[test]
    fn test_empty_field_spawns_immediately() {
        let cursor = SpawnCursor::new();
        let pool: Vec<Obstacle> = Vec::new();
        let rightmost = cursor.rightmost(&pool);
        assert_eq!(rightmost, 0.0);
        assert!(gap_satisfied(rightmost, 800.0, 400.0));
    }

    #[test]
    fn test_gap_blocks_until_entity_scrolls() {
        let cursor = SpawnCursor::new();
        let mut pool = vec![Obstacle::new(1, ObstacleKind::Rock, Vec2::new(500.0, 368.0))];
        assert!(!gap_satisfied(cursor.rightmost(&pool), 800.0, 400.0));
        pool[0].pos.x = 399.0;
        assert!(gap_satisfied(cursor.rightmost(&pool), 800.0, 400.0));
    }

    #[test]
    fn test_dead_entities_are_ignored() {
        let mut cursor = SpawnCursor::new();
        cursor.mark(-50.0);
        let mut pool = vec![Obstacle::new(1, ObstacleKind::Rock, Vec2::new(700.0, 368.0))];
        pool[0].kill();
        assert_eq!(cursor.rightmost(&pool), -50.0);
    }

    #[test]
    fn test_non_positive_gap_is_not_due() {
        assert!(!gap_satisfied(-1000.0, 800.0, 0.0));
        assert!(!gap_satisfied(-1000.0, 800.0, -5.0));
    }

    #[test]
    fn test_cursor_drift_makes_wide_gaps_due() {
        let mut cursor = SpawnCursor::new();
        let pool: Vec<Obstacle> = Vec::new();
        assert!(!gap_satisfied(cursor.rightmost(&pool), 800.0, 1000.0));
        cursor.drift(250.0);
        assert!(gap_satisfied(cursor.rightmost(&pool), 800.0, 1000.0));
    }

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let range = GapRange::new(300.0, 600.0);
        for _ in 0..1000 {
            let gap = range.roll(&mut rng);
            assert!((300.0..=600.0).contains(&gap));
        }
        assert_eq!(GapRange::new(5.0, 5.0).roll(&mut rng), 5.0);
    }
}
