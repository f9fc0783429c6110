//! World speed controller
//!
//! A natural curve that only ever rises toward `max`, times a boost
//! multiplier owned by active speed power-ups. Dropping a boost reverts to
//! the natural curve, never to the initial speed.

use serde::{Deserialize, Serialize};

use crate::config::SpeedConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSpeed {
    /// Speed from natural progression alone, in `[initial, max]`
    natural: f32,
    /// Product of active boost multipliers (1.0 when none)
    multiplier: f32,
    initial: f32,
    max: f32,
    increment: f32,
}

impl WorldSpeed {
    pub fn new(config: &SpeedConfig) -> Self {
        Self {
            natural: config.initial,
            multiplier: 1.0,
            initial: config.initial,
            max: config.max,
            increment: config.increment,
        }
    }

    /// Scroll rate applied to every ground-relative entity
    #[inline]
    pub fn current(&self) -> f32 {
        (self.natural * self.multiplier).max(self.initial)
    }

    #[inline]
    pub fn natural(&self) -> f32 {
        self.natural
    }

    #[inline]
    pub fn is_boosted(&self) -> bool {
        self.multiplier > 1.0
    }

    /// Natural progression for `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if self.natural < self.max {
            self.natural = (self.natural + self.increment * dt).min(self.max);
        }
    }

    /// Multiply the current speed; not clamped to `max`
    pub fn apply_boost(&mut self, factor: f32) {
        if factor > 0.0 {
            self.multiplier *= factor;
        }
    }

    /// Undo one boost, never dropping below the initial speed
    pub fn revert_boost(&mut self, factor: f32) {
        if factor > 0.0 {
            self.multiplier = (self.multiplier / factor).max(1.0);
        }
    }

    /// Drop every boost at once
    pub fn clear_boosts(&mut self) {
        self.multiplier = 1.0;
    }
}
