//! Player state machine
//!
//! Grounded ⇄ Airborne via jumps and ground contact, anything → Dead on a
//! lethal hit. The shield is an orthogonal flag, not a state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;
use crate::consts::{GROUND_Y, PLAYER_FRAME, PLAYER_START};
use crate::geometry::Aabb;

/// Player movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMode {
    Grounded,
    Airborne,
    /// Terminal until the run restarts
    Dead,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-center anchor
    pub pos: Vec2,
    pub vel_y: f32,
    pub mode: PlayerMode,
    pub jump_count: u8,
    pub shielded: bool,
    max_jumps: u8,
}

impl Player {
    /// Spawn at the start position, falling toward the ground
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            pos: PLAYER_START,
            vel_y: 0.0,
            mode: PlayerMode::Airborne,
            jump_count: 0,
            shielded: false,
            max_jumps: config.max_jumps,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.mode == PlayerMode::Dead
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.mode == PlayerMode::Grounded
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.mode == PlayerMode::Airborne
    }

    /// Physics body in world space
    pub fn bounds(&self) -> Aabb {
        PLAYER_FRAME.body_at(self.pos)
    }

    /// Try to jump. Returns false (and changes nothing) when dead or out of slots.
    pub fn jump(&mut self, config: &PlayerConfig) -> bool {
        if self.is_dead() || self.jump_count >= self.max_jumps {
            return false;
        }

        self.vel_y = if self.jump_count == 0 {
            config.jump_velocity
        } else {
            config.double_jump_velocity
        };
        self.jump_count += 1;
        self.mode = PlayerMode::Airborne;
        true
    }

    /// Ground contact after being airborne
    pub fn land(&mut self) {
        if self.is_dead() {
            return;
        }
        self.jump_count = 0;
        self.mode = PlayerMode::Grounded;
        self.vel_y = 0.0;
    }

    /// Lethal hit: clears the shield and kicks the body up once
    pub fn die(&mut self, config: &PlayerConfig) {
        if self.is_dead() {
            return;
        }
        self.mode = PlayerMode::Dead;
        self.shielded = false;
        self.vel_y = config.death_impulse;
    }

    /// Idempotent while already shielded
    pub fn activate_shield(&mut self) {
        if self.is_dead() {
            return;
        }
        self.shielded = true;
    }

    pub fn remove_shield(&mut self) {
        self.shielded = false;
    }

    /// Constant-gravity integration, clamped to the ground surface.
    ///
    /// Never changes `mode`; ground contact is resolved by the collision stage.
    pub fn integrate(&mut self, config: &PlayerConfig, dt: f32) {
        if self.is_grounded() {
            self.vel_y = 0.0;
            self.pos.y = GROUND_Y;
            return;
        }

        self.vel_y += config.gravity * dt;
        self.pos.y += self.vel_y * dt;

        if self.pos.y >= GROUND_Y {
            self.pos.y = GROUND_Y;
            if self.vel_y > 0.0 {
                self.vel_y = 0.0;
            }
        }
    }

    /// Resting on the ground surface
    pub fn touches_ground(&self) -> bool {
        self.pos.y >= GROUND_Y && self.vel_y >= 0.0
    }
}
