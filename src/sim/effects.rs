//! Power-up effect scheduler
//!
//! Timed effects are countdowns advanced by running ticks only, so pausing
//! the run freezes them. Nothing here outlives a restart: `cancel_all`
//! reverts every effect before the next run begins.

use serde::{Deserialize, Serialize};

use super::entity::PowerUpKind;
use super::player::Player;
use super::speed::WorldSpeed;
use crate::config::PowerUpConfig;

/// Read-only view of one running effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    /// `None` for the shield, which lasts until consumed
    pub remaining_ms: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectScheduler {
    magnet_ms: Option<f32>,
    /// One countdown per applied boost multiplier
    boost_ms: Vec<f32>,
    duration_ms: f32,
    boost_multiplier: f32,
    max_boost_stack: usize,
}

impl EffectScheduler {
    pub fn new(config: &PowerUpConfig) -> Self {
        Self {
            magnet_ms: None,
            boost_ms: Vec::new(),
            duration_ms: config.duration_ms,
            boost_multiplier: config.boost_multiplier,
            max_boost_stack: config.max_boost_stack.max(1),
        }
    }

    #[inline]
    pub fn magnet_active(&self) -> bool {
        self.magnet_ms.is_some()
    }

    pub fn boost_count(&self) -> usize {
        self.boost_ms.len()
    }

    /// Apply a collected power-up
    pub fn activate(&mut self, kind: PowerUpKind, player: &mut Player, speed: &mut WorldSpeed) {
        match kind {
            PowerUpKind::Shield => player.activate_shield(),
            PowerUpKind::Magnet => {
                // Restart, never extend
                self.magnet_ms = Some(self.duration_ms);
            }
            PowerUpKind::SpeedBoost => {
                if self.boost_ms.len() < self.max_boost_stack {
                    speed.apply_boost(self.boost_multiplier);
                    self.boost_ms.push(self.duration_ms);
                } else if let Some(soonest) = self
                    .boost_ms
                    .iter_mut()
                    .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                {
                    *soonest = self.duration_ms;
                }
            }
        }
        log::debug!("Power-up {:?} active", kind);
    }

    /// Count down timers by `dt_ms`, reverting whatever expires.
    /// Returns the kinds that expired this call, in expiry order.
    pub fn advance(&mut self, dt_ms: f32, speed: &mut WorldSpeed) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();

        if let Some(remaining) = self.magnet_ms.as_mut() {
            *remaining -= dt_ms;
            if *remaining <= 0.0 {
                self.magnet_ms = None;
                expired.push(PowerUpKind::Magnet);
            }
        }

        let before = self.boost_ms.len();
        for remaining in self.boost_ms.iter_mut() {
            *remaining -= dt_ms;
        }
        self.boost_ms.retain(|&r| r > 0.0);
        for _ in self.boost_ms.len()..before {
            speed.revert_boost(self.boost_multiplier);
            expired.push(PowerUpKind::SpeedBoost);
        }

        expired
    }

    /// Drop all timed effects without emitting expiry
    pub fn cancel_all(&mut self, speed: &mut WorldSpeed) {
        self.magnet_ms = None;
        self.boost_ms.clear();
        speed.clear_boosts();
    }

    pub fn active(&self, shielded: bool) -> Vec<ActiveEffect> {
        let mut effects = Vec::new();
        if shielded {
            effects.push(ActiveEffect {
                kind: PowerUpKind::Shield,
                remaining_ms: None,
            });
        }
        if let Some(ms) = self.magnet_ms {
            effects.push(ActiveEffect {
                kind: PowerUpKind::Magnet,
                remaining_ms: Some(ms),
            });
        }
        effects.extend(self.boost_ms.iter().map(|&ms| ActiveEffect {
            kind: PowerUpKind::SpeedBoost,
            remaining_ms: Some(ms),
        }));
        effects
    }
}
