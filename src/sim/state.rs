//! Simulation state and read-only snapshots
//!
//! Everything one run needs lives in `SimulationState`; every stage of the
//! tick receives it explicitly. Only the best score survives `reset_run`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collectibles::CollectibleSpawner;
use super::effects::{ActiveEffect, EffectScheduler};
use super::entity::{CollectibleKind, Entity, EntityIds, EntityKind, ObstacleKind};
use super::events::GameEvent;
use super::obstacles::ObstacleSpawner;
use super::player::{Player, PlayerMode};
use super::score::ScoreLedger;
use super::speed::WorldSpeed;
use crate::config::RunnerConfig;
use crate::geometry::Aabb;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Running,
    Paused,
    /// Player died; only the dead body settles until restart
    GameOver,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Tunables, fixed for the lifetime of the state
    pub config: RunnerConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single random stream for every spawn decision
    pub(crate) rng: Pcg32,
    /// Current run phase
    pub phase: RunPhase,
    /// Simulated milliseconds since the run started (running ticks only)
    pub clock_ms: f64,
    /// Running ticks since the run started
    pub ticks: u64,
    /// The runner
    pub player: Player,
    /// Natural speed curve plus active boosts
    pub speed: WorldSpeed,
    /// Obstacle pool and its spawn state
    pub obstacles: ObstacleSpawner,
    /// Coin and power-up pools and their spawn state
    pub collectibles: CollectibleSpawner,
    /// Distance, coins, milestones, best score
    pub score: ScoreLedger,
    /// Magnet and speed boost countdowns
    pub effects: EffectScheduler,
    /// Id source shared by every pool
    pub(crate) ids: EntityIds,
    /// Notifications pushed this tick, not yet drained
    events: Vec<GameEvent>,
}

impl SimulationState {
    /// Start a run with a previously loaded best score
    pub fn new(config: RunnerConfig, seed: u64, best_score: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Running,
            clock_ms: 0.0,
            ticks: 0,
            player: Player::new(&config.player),
            speed: WorldSpeed::new(&config.speed),
            obstacles: ObstacleSpawner::new(&config.obstacles),
            collectibles: CollectibleSpawner::new(&config.coins, &config.power_ups),
            score: ScoreLedger::new(&config.score, config.coins.value, best_score),
            effects: EffectScheduler::new(&config.power_ups),
            ids: EntityIds::default(),
            events: Vec::new(),
            config,
        };
        state.emit(GameEvent::RunStarted { seed });
        log::info!("Run started (seed {}, best {})", seed, best_score);
        state
    }

    /// Tear everything down for a fresh run. Pending effects are cancelled,
    /// entities dropped, and all scalars reset except the best score.
    pub fn reset_run(&mut self, seed: u64) {
        self.effects.cancel_all(&mut self.speed);
        self.obstacles.clear();
        self.collectibles.clear();
        self.score.reset();

        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = RunPhase::Running;
        self.clock_ms = 0.0;
        self.ticks = 0;
        self.player = Player::new(&self.config.player);
        self.speed = WorldSpeed::new(&self.config.speed);
        self.effects = EffectScheduler::new(&self.config.power_ups);
        self.ids = EntityIds::default();

        self.emit(GameEvent::RunStarted { seed });
        log::info!("Run restarted (seed {}, best {})", seed, self.score.best_score());
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this tick's notifications in emission order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            phase: self.phase,
            world_speed: self.speed.current(),
            player: PlayerSnapshot {
                pos: self.player.pos,
                bounds: self.player.bounds(),
                mode: self.player.mode,
                airborne: self.player.is_airborne(),
                shielded: self.player.shielded,
                jump_count: self.player.jump_count,
            },
            obstacles: snapshot_pool(&self.obstacles.obstacles),
            coins: snapshot_pool(&self.collectibles.coins),
            power_ups: snapshot_pool(&self.collectibles.power_ups),
            score: ScoreSnapshot {
                score: self.score.score(),
                coins: self.score.coins(),
                distance: self.score.distance(),
                best_score: self.score.best_score(),
                reached_milestones: self.score.reached_milestones().collect(),
            },
            effects: self.effects.active(self.player.shielded),
        }
    }
}

fn snapshot_pool<K: EntityKind>(pool: &[Entity<K>]) -> Vec<EntitySnapshot<K>> {
    pool.iter()
        .filter(|e| e.alive)
        .map(|e| EntitySnapshot {
            id: e.id,
            kind: e.kind,
            pos: e.pos,
            bounds: e.bounds(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub bounds: Aabb,
    pub mode: PlayerMode,
    pub airborne: bool,
    pub shielded: bool,
    pub jump_count: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnapshot<K> {
    pub id: u32,
    pub kind: K,
    pub pos: Vec2,
    pub bounds: Aabb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub score: u64,
    pub coins: u64,
    pub distance: f64,
    pub best_score: u64,
    pub reached_milestones: Vec<u64>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: RunPhase,
    /// Also drives parallax layers
    pub world_speed: f32,
    pub player: PlayerSnapshot,
    pub obstacles: Vec<EntitySnapshot<ObstacleKind>>,
    pub coins: Vec<EntitySnapshot<CollectibleKind>>,
    pub power_ups: Vec<EntitySnapshot<CollectibleKind>>,
    pub score: ScoreSnapshot,
    pub effects: Vec<ActiveEffect>,
}
