//! Coin and power-up spawner
//!
//! Coins arrive in five-coin patterns behind a short gap and a coin flip;
//! power-ups behind a wide gap and a small per-tick chance. The two pools
//! keep separate cursors so a coin never blocks a power-up or vice versa.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Collectible, CollectibleKind, EntityIds, PowerUpKind};
use super::spawner::{GapRange, SpawnCursor, gap_satisfied};
use crate::config::{CoinConfig, PowerUpConfig};
use crate::consts::{SPAWN_X, WORLD_HEIGHT, WORLD_WIDTH};

/// Coin layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinPattern {
    Line,
    /// Sinusoidal lift peaking mid-pattern
    Arc,
    /// Every other coin lifted
    Zigzag,
}

impl CoinPattern {
    pub const ALL: [CoinPattern; 3] = [CoinPattern::Line, CoinPattern::Arc, CoinPattern::Zigzag];

    /// Offsets from the shared anchor (negative y = higher)
    pub fn offsets(self, config: &CoinConfig) -> Vec<Vec2> {
        let count = config.pattern_len;
        (0..count)
            .map(|i| {
                let x = i as f32 * config.spacing;
                let y = match self {
                    CoinPattern::Line => 0.0,
                    CoinPattern::Arc => {
                        if count > 1 {
                            let progress = i as f32 / (count - 1) as f32;
                            -(progress * PI).sin() * config.arc_height
                        } else {
                            0.0
                        }
                    }
                    CoinPattern::Zigzag => {
                        if i % 2 == 0 {
                            0.0
                        } else {
                            -config.zigzag_lift
                        }
                    }
                };
                Vec2::new(x, y)
            })
            .collect()
    }
}

/// Uniform pick over every coin layout
pub fn random_pattern(rng: &mut Pcg32) -> CoinPattern {
    CoinPattern::ALL[rng.random_range(0..CoinPattern::ALL.len())]
}

/// Uniform pick over every power-up kind
pub fn random_power_up(rng: &mut Pcg32) -> PowerUpKind {
    PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())]
}

/// What a spawn attempt produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleSpawn {
    Coins(CoinPattern),
    PowerUp(PowerUpKind),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleSpawner {
    pub coins: Vec<Collectible>,
    pub power_ups: Vec<Collectible>,
    coin_cursor: SpawnCursor,
    power_up_cursor: SpawnCursor,
    coin_gap: GapRange,
    power_up_gap: GapRange,
}

impl CollectibleSpawner {
    pub fn new(coins: &CoinConfig, power_ups: &PowerUpConfig) -> Self {
        Self {
            coins: Vec::new(),
            power_ups: Vec::new(),
            coin_cursor: SpawnCursor::new(),
            power_up_cursor: SpawnCursor::new(),
            coin_gap: GapRange::new(coins.min_gap, coins.max_gap),
            power_up_gap: GapRange::new(power_ups.min_gap, power_ups.max_gap),
        }
    }

    /// Scroll everything left. With `magnet_target` set, coins inside the
    /// capture radius home in on it instead of drifting.
    pub fn advance(&mut self, config: &CoinConfig, dx: f32, dt: f32, magnet_target: Option<Vec2>) {
        for coin in self.coins.iter_mut().filter(|c| c.alive) {
            let homing = magnet_target.and_then(|target| {
                let to_target = target - coin.pos;
                let distance = to_target.length();
                (distance < config.magnet_radius && distance > 0.0)
                    .then(|| to_target / distance)
            });

            match homing {
                Some(dir) => coin.pos += dir * config.magnet_speed * dt,
                None => coin.pos.x -= dx,
            }
        }

        for power_up in self.power_ups.iter_mut().filter(|p| p.alive) {
            power_up.pos.x -= dx;
        }

        self.coin_cursor.drift(dx);
        self.power_up_cursor.drift(dx);
    }

    /// Drop everything past the trailing edge
    pub fn cull(&mut self) -> usize {
        let before = self.coins.len() + self.power_ups.len();
        for c in self.coins.iter_mut().chain(self.power_ups.iter_mut()) {
            if c.is_off_screen() {
                c.kill();
            }
        }
        self.coins.retain(|c| c.alive);
        self.power_ups.retain(|p| p.alive);
        before - self.coins.len() - self.power_ups.len()
    }

    pub fn try_spawn_coins(
        &mut self,
        config: &CoinConfig,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
    ) -> Option<CoinPattern> {
        let gap = self.coin_gap.roll(rng);
        let rightmost = self.coin_cursor.rightmost(&self.coins);
        if !gap_satisfied(rightmost, WORLD_WIDTH, gap)
            || !rng.random_bool(config.spawn_chance.clamp(0.0, 1.0))
        {
            return None;
        }

        let pattern = random_pattern(rng);
        let anchor = Vec2::new(SPAWN_X, WORLD_HEIGHT - config.baseline_altitude);
        let mut rightmost_x = anchor.x;
        for offset in pattern.offsets(config) {
            let pos = anchor + offset;
            rightmost_x = rightmost_x.max(pos.x);
            self.coins
                .push(Collectible::new(ids.next(), CollectibleKind::Coin, pos));
        }
        self.coin_cursor.mark(rightmost_x);
        log::debug!("Spawned {:?} coin pattern", pattern);
        Some(pattern)
    }

    pub fn try_spawn_power_up(
        &mut self,
        config: &PowerUpConfig,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
    ) -> Option<PowerUpKind> {
        let gap = self.power_up_gap.roll(rng);
        let rightmost = self.power_up_cursor.rightmost(&self.power_ups);
        if !gap_satisfied(rightmost, WORLD_WIDTH, gap)
            || !rng.random_bool(config.spawn_chance.clamp(0.0, 1.0))
        {
            return None;
        }

        let kind = random_power_up(rng);
        let (lo, hi) = config.altitude;
        let y = WORLD_HEIGHT - rng.random_range(lo.min(hi)..=hi.max(lo));
        self.power_ups.push(Collectible::new(
            ids.next(),
            CollectibleKind::PowerUp(kind),
            Vec2::new(SPAWN_X, y),
        ));
        self.power_up_cursor.mark(SPAWN_X);
        log::debug!("Spawned {:?} power-up", kind);
        Some(kind)
    }

    /// Advance, cull, then roll both spawners
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        coins: &CoinConfig,
        power_ups: &PowerUpConfig,
        speed: f32,
        dt: f32,
        magnet_target: Option<Vec2>,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
    ) -> Vec<CollectibleSpawn> {
        self.advance(coins, speed * dt, dt, magnet_target);
        self.cull();

        let mut spawned = Vec::new();
        if let Some(pattern) = self.try_spawn_coins(coins, rng, ids) {
            spawned.push(CollectibleSpawn::Coins(pattern));
        }
        if let Some(kind) = self.try_spawn_power_up(power_ups, rng, ids) {
            spawned.push(CollectibleSpawn::PowerUp(kind));
        }
        spawned
    }

    /// Destroy by id from whichever pool holds it. Stale ids are a no-op.
    pub fn destroy(&mut self, id: u32) -> Option<Collectible> {
        for pool in [&mut self.coins, &mut self.power_ups] {
            if let Some(index) = pool.iter().position(|c| c.id == id && c.alive) {
                let mut collectible = pool.remove(index);
                collectible.kill();
                return Some(collectible);
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.coins.clear();
        self.power_ups.clear();
        self.coin_cursor = SpawnCursor::new();
        self.power_up_cursor = SpawnCursor::new();
    }
}
