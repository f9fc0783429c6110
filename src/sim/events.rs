//! Outbound notifications for rendering, audio, and UI collaborators
//!
//! Pushed during a tick in pipeline order and drained once per tick.

use serde::{Deserialize, Serialize};

use super::entity::{ObstacleKind, PowerUpKind};
use crate::geometry::ContactSide;

/// Something collaborators may react to, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began with this seed
    RunStarted { seed: u64 },
    /// Running ticks stopped
    Paused,
    /// Running ticks continue
    Resumed,
    /// Jump accepted; `double` for any jump after the first while airborne
    Jumped { double: bool },
    /// Ground contact after being airborne
    Landed,
    /// A shield took the hit and the obstacle was destroyed
    ShieldAbsorbed { obstacle: ObstacleKind },
    /// Lethal hit; `side` is the obstacle face that was struck
    Died { obstacle: ObstacleKind, side: ContactSide },
    /// Coin picked up; carries the run's coin total
    CoinCollected { coins: u64 },
    /// Power-up picked up and applied
    PowerUpActivated(PowerUpKind),
    /// A timed power-up ran out and was reverted
    PowerUpExpired(PowerUpKind),
    /// Score differs from the previous tick
    ScoreChanged(u64),
    /// Score crossed a milestone for the first time this run
    MilestoneReached(u64),
    /// Best score improved; the session persists it
    NewBestScore(u64),
    /// Final tally, emitted once per run
    RunEnded { score: u64, coins: u64, best: u64 },
}
