//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, one stream per run
//! - Stable iteration order (spawn order within each pool)
//! - Host frame time passed in explicitly
//! - No rendering, audio, or platform dependencies

pub mod collectibles;
pub mod collision;
pub mod effects;
pub mod entity;
pub mod events;
pub mod obstacles;
pub mod player;
pub mod score;
pub mod spawner;
pub mod speed;
pub mod state;
pub mod tick;

pub use collectibles::{CoinPattern, CollectibleSpawn, CollectibleSpawner};
pub use collision::{CollisionOutcome, Contact};
pub use effects::{ActiveEffect, EffectScheduler};
pub use entity::{Collectible, CollectibleKind, Entity, Obstacle, ObstacleKind, PowerUpKind};
pub use events::GameEvent;
pub use obstacles::ObstacleSpawner;
pub use player::{Player, PlayerMode};
pub use score::{ScoreLedger, format_score};
pub use speed::WorldSpeed;
pub use state::{RunPhase, SimulationState, WorldSnapshot};
pub use tick::{TickInput, restart, tick};
