//! Obstacle spawner
//!
//! Deterministic gap check every tick; the obstacle type comes from a
//! weighted table sampled with a single uniform draw.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{EntityIds, Obstacle, ObstacleKind};
use super::spawner::{GapRange, SpawnCursor, gap_satisfied};
use crate::config::ObstacleConfig;
use crate::consts::{GROUND_Y, SPAWN_X, WORLD_HEIGHT, WORLD_WIDTH};

/// Pick from `ObstacleKind::ALL` by cumulative weight. `roll` is in [0, 1)
/// and is scaled by the weight total, so weights need not sum to 1.
/// Negative weights count as 0; an all-zero table picks cactus.
pub fn pick_weighted(roll: f32, weights: &[f32; 4]) -> ObstacleKind {
    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if !total.is_finite() || total <= 0.0 {
        return ObstacleKind::Cactus;
    }
    let target = roll * total;
    let mut cumulative = 0.0f32;
    for (kind, weight) in ObstacleKind::ALL.iter().zip(weights) {
        cumulative += weight.max(0.0);
        if target < cumulative {
            return *kind;
        }
    }
    ObstacleKind::Cactus
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpawner {
    /// Live obstacles, sorted by id
    pub obstacles: Vec<Obstacle>,
    cursor: SpawnCursor,
    gap: GapRange,
}

impl ObstacleSpawner {
    pub fn new(config: &ObstacleConfig) -> Self {
        Self {
            obstacles: Vec::new(),
            cursor: SpawnCursor::new(),
            gap: GapRange::new(config.min_gap, config.max_gap),
        }
    }

    pub fn rightmost_x(&self) -> f32 {
        self.cursor.rightmost(&self.obstacles)
    }

    /// Scroll left; birds also bob on a wall-clock sinusoid
    pub fn advance(&mut self, config: &ObstacleConfig, dx: f32, clock_ms: f64, frame_scale: f32) {
        let bob = (clock_ms / 200.0).sin() as f32 * config.bird_bob_amplitude * frame_scale;
        for obstacle in self.obstacles.iter_mut().filter(|o| o.alive) {
            obstacle.pos.x -= dx;
            if obstacle.kind.is_airborne() {
                obstacle.pos.y += bob;
            }
        }
        self.cursor.drift(dx);
    }

    /// Drop everything past the trailing edge. Returns how many went.
    pub fn cull(&mut self) -> usize {
        let before = self.obstacles.len();
        for obstacle in self.obstacles.iter_mut() {
            if obstacle.is_off_screen() {
                obstacle.kill();
            }
        }
        self.obstacles.retain(|o| o.alive);
        before - self.obstacles.len()
    }

    /// Spawn one obstacle if the re-rolled gap allows it
    pub fn try_spawn(
        &mut self,
        config: &ObstacleConfig,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
    ) -> Option<ObstacleKind> {
        let gap = self.gap.roll(rng);
        if !gap_satisfied(self.rightmost_x(), WORLD_WIDTH, gap) {
            return None;
        }

        let kind = pick_weighted(rng.random::<f32>(), &config.weights);
        let y = match kind {
            ObstacleKind::Bird => {
                let (lo, hi) = config.bird_altitude;
                WORLD_HEIGHT - rng.random_range(lo.min(hi)..=hi.max(lo))
            }
            ObstacleKind::Cactus | ObstacleKind::Rock | ObstacleKind::Spike => GROUND_Y,
        };

        self.obstacles
            .push(Obstacle::new(ids.next(), kind, Vec2::new(SPAWN_X, y)));
        self.cursor.mark(SPAWN_X);
        log::debug!("Spawned {:?} at y={:.0} (gap {:.0})", kind, y, gap);
        Some(kind)
    }

    /// Advance, cull, then maybe spawn
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        config: &ObstacleConfig,
        speed: f32,
        dt: f32,
        clock_ms: f64,
        frame_scale: f32,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
    ) -> Option<ObstacleKind> {
        self.advance(config, speed * dt, clock_ms, frame_scale);
        self.cull();
        self.try_spawn(config, rng, ids)
    }

    /// Destroy by id. Unknown or already-destroyed ids are a no-op.
    pub fn destroy(&mut self, id: u32) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|o| o.id == id && o.alive)?;
        let mut obstacle = self.obstacles.remove(index);
        obstacle.kill();
        Some(obstacle)
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.cursor = SpawnCursor::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spawner() -> (ObstacleSpawner, ObstacleConfig, Pcg32, EntityIds) {
        let config = ObstacleConfig::default();
        (
            ObstacleSpawner::new(&config),
            config,
            Pcg32::seed_from_u64(42),
            EntityIds::default(),
        )
    }

    #[test]
    fn test_weighted_pick_boundaries() {
        let w = [0.35, 0.25, 0.25, 0.15];
        assert_eq!(pick_weighted(0.0, &w), ObstacleKind::Cactus);
        assert_eq!(pick_weighted(0.34, &w), ObstacleKind::Cactus);
        assert_eq!(pick_weighted(0.36, &w), ObstacleKind::Rock);
        assert_eq!(pick_weighted(0.59, &w), ObstacleKind::Rock);
        assert_eq!(pick_weighted(0.61, &w), ObstacleKind::Bird);
        assert_eq!(pick_weighted(0.86, &w), ObstacleKind::Spike);
        assert_eq!(pick_weighted(0.9999, &w), ObstacleKind::Spike);
    }

    #[test]
    fn test_weighted_pick_normalizes_totals() {
        // Sums to 4: half rock, half spike
        let w = [0.0, 2.0, 0.0, 2.0];
        assert_eq!(pick_weighted(0.0, &w), ObstacleKind::Rock);
        assert_eq!(pick_weighted(0.49, &w), ObstacleKind::Rock);
        assert_eq!(pick_weighted(0.51, &w), ObstacleKind::Spike);
        assert_eq!(pick_weighted(0.9999, &w), ObstacleKind::Spike);

        // Sums to 0.5: the leftover half no longer lands on cactus
        let w = [0.1, 0.1, 0.1, 0.2];
        assert_eq!(pick_weighted(0.9, &w), ObstacleKind::Spike);

        assert_eq!(pick_weighted(0.5, &[0.0; 4]), ObstacleKind::Cactus);
        assert_eq!(pick_weighted(0.5, &[-1.0, 0.0, 1.0, 0.0]), ObstacleKind::Bird);
    }

    #[test]
    fn test_weighted_pick_distribution() {
        let (_, config, mut rng, _) = spawner();
        let mut counts = [0usize; 4];
        for _ in 0..20_000 {
            let kind = pick_weighted(rng.random::<f32>(), &config.weights);
            let i = ObstacleKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[i] += 1;
        }
        let cactus = counts[0] as f32 / 20_000.0;
        let spike = counts[3] as f32 / 20_000.0;
        assert!((cactus - 0.35).abs() < 0.02, "cactus share {cactus}");
        assert!((spike - 0.15).abs() < 0.02, "spike share {spike}");
    }

    #[test]
    fn test_spawns_immediately_on_empty_field() {
        let (mut s, config, mut rng, mut ids) = spawner();
        assert!(s.try_spawn(&config, &mut rng, &mut ids).is_some());
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.obstacles[0].pos.x, SPAWN_X);
    }

    #[test]
    fn test_no_second_spawn_until_gap_opens() {
        let (mut s, config, mut rng, mut ids) = spawner();
        s.try_spawn(&config, &mut rng, &mut ids);
        for _ in 0..50 {
            assert!(s.try_spawn(&config, &mut rng, &mut ids).is_none());
        }

        // Scroll the first obstacle past the strictest threshold (800 - 600)
        s.advance(&config, SPAWN_X - 199.0, 0.0, 1.0);
        assert!(s.try_spawn(&config, &mut rng, &mut ids).is_some());
        assert_eq!(s.obstacles.len(), 2);
    }

    #[test]
    fn test_placement_by_kind() {
        let (mut s, config, mut rng, mut ids) = spawner();
        for _ in 0..200 {
            s.clear();
            s.try_spawn(&config, &mut rng, &mut ids);
            let o = &s.obstacles[0];
            match o.kind {
                ObstacleKind::Bird => {
                    assert!(o.pos.y >= WORLD_HEIGHT - 180.0 && o.pos.y <= WORLD_HEIGHT - 100.0)
                }
                _ => assert_eq!(o.pos.y, GROUND_Y),
            }
        }
    }

    #[test]
    fn test_cull_removes_off_screen() {
        let (mut s, config, mut rng, mut ids) = spawner();
        s.try_spawn(&config, &mut rng, &mut ids);
        s.advance(&config, SPAWN_X + 40.0, 0.0, 1.0);
        assert_eq!(s.cull(), 1);
        assert!(s.obstacles.is_empty());
    }

    #[test]
    fn test_only_birds_move_vertically() {
        let (mut s, config, _, mut ids) = spawner();
        s.obstacles.push(Obstacle::new(ids.next(), ObstacleKind::Bird, Vec2::new(500.0, 250.0)));
        s.obstacles.push(Obstacle::new(ids.next(), ObstacleKind::Rock, Vec2::new(600.0, GROUND_Y)));
        // sin(314.159 / 200) ≈ 1
        s.advance(&config, 10.0, 314.159, 1.0);
        assert!((s.obstacles[0].pos.y - 250.5).abs() < 1e-3);
        assert_eq!(s.obstacles[1].pos.y, GROUND_Y);
        assert_eq!(s.obstacles[0].pos.x, 490.0);
        assert_eq!(s.obstacles[1].pos.x, 590.0);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (mut s, config, mut rng, mut ids) = spawner();
        s.try_spawn(&config, &mut rng, &mut ids);
        let id = s.obstacles[0].id;
        assert!(s.destroy(id).is_some());
        assert!(s.destroy(id).is_none());
        assert!(s.obstacles.is_empty());
    }
}
