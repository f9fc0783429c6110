//! Pixel Runner - simulation core for a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, spawning, collisions, scoring)
//! - `geometry`: Axis-aligned boxes and sprite frames
//! - `config`: Data-driven game balance
//! - `persistence`: Best score storage
//! - `session`: Run lifecycle glue between the simulation and storage

pub mod config;
pub mod geometry;
pub mod persistence;
pub mod session;
pub mod sim;

pub use config::RunnerConfig;
pub use persistence::{BestScoreStore, MemoryStore};
pub use session::Session;

/// Arena and sprite constants that the tunables never change
pub mod consts {
    use crate::geometry::SpriteFrame;
    use glam::Vec2;

    /// Visible world dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 400.0;

    /// Top surface of the ground strip (tiles are 32 tall, centered at HEIGHT - 16)
    pub const GROUND_Y: f32 = WORLD_HEIGHT - 32.0;

    /// New entities appear just past the leading screen edge
    pub const SPAWN_X: f32 = WORLD_WIDTH + 50.0;

    /// Player anchor at run start (bottom-center of the sprite)
    pub const PLAYER_START: Vec2 = Vec2::new(100.0, WORLD_HEIGHT - 80.0);

    /// Reference frame length used to scale per-frame cosmetic motion
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

    /// Player sprite: 32x48, body trimmed to 70% x 90%
    pub const PLAYER_FRAME: SpriteFrame = SpriteFrame::new(
        Vec2::new(32.0, 48.0),
        Vec2::new(0.5, 1.0),
        Vec2::new(32.0 * 0.15, 48.0 * 0.1),
        Vec2::new(32.0 * 0.7, 48.0 * 0.9),
    );
}

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Info);
}
