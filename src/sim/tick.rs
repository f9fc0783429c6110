//! Per-frame simulation tick
//!
//! Stage order is fixed: speed → player → spawners → collisions → score →
//! effect expiry. Reordering changes what a frame credits.

use super::collision::{self, CollisionOutcome};
use super::events::GameEvent;
use super::state::{RunPhase, SimulationState};
use crate::consts::REFERENCE_FRAME_MS;

/// Longest frame the simulation will integrate in one step (ms)
pub const MAX_FRAME_MS: f32 = 100.0;

/// Input edges for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump pressed since the last tick
    pub jump: bool,
    /// Pause toggle pressed since the last tick
    pub pause: bool,
}

/// Advance the run by one host frame of `delta_ms` wall-clock milliseconds
pub fn tick(state: &mut SimulationState, input: &TickInput, delta_ms: f32) {
    if input.pause {
        match state.phase {
            RunPhase::Running => {
                state.phase = RunPhase::Paused;
                state.emit(GameEvent::Paused);
                return;
            }
            RunPhase::Paused => {
                state.phase = RunPhase::Running;
                state.emit(GameEvent::Resumed);
            }
            RunPhase::GameOver => {}
        }
    }

    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return;
    }
    let delta_ms = delta_ms.min(MAX_FRAME_MS);
    let dt = delta_ms / 1000.0;

    match state.phase {
        RunPhase::Paused => return,
        RunPhase::GameOver => {
            // Dead body settles; nothing else moves
            state.player.integrate(&state.config.player, dt);
            return;
        }
        RunPhase::Running => {}
    }

    state.ticks += 1;
    state.clock_ms += delta_ms as f64;

    // World speed
    state.speed.advance(dt);
    let speed = state.speed.current();

    // Player
    if input.jump && state.player.jump(&state.config.player) {
        state.emit(GameEvent::Jumped {
            double: state.player.jump_count > 1,
        });
    }
    state.player.integrate(&state.config.player, dt);

    // Spawners
    let frame_scale = delta_ms / REFERENCE_FRAME_MS;
    state.obstacles.update(
        &state.config.obstacles,
        speed,
        dt,
        state.clock_ms,
        frame_scale,
        &mut state.rng,
        &mut state.ids,
    );
    let magnet_target = state.effects.magnet_active().then_some(state.player.pos);
    state.collectibles.update(
        &state.config.coins,
        &state.config.power_ups,
        speed,
        dt,
        magnet_target,
        &mut state.rng,
        &mut state.ids,
    );

    // Collisions
    let score_before = state.score.score();
    for outcome in collision::resolve(state) {
        match outcome {
            CollisionOutcome::ShieldAbsorbed { kind, .. } => {
                state.emit(GameEvent::ShieldAbsorbed { obstacle: kind });
            }
            CollisionOutcome::Lethal { kind, side, .. } => {
                state.emit(GameEvent::Died {
                    obstacle: kind,
                    side,
                });
                state.phase = RunPhase::GameOver;
                end_run(state);
                return;
            }
            CollisionOutcome::CoinCollected { .. } => {
                let coins = state.score.coins();
                state.emit(GameEvent::CoinCollected { coins });
            }
            CollisionOutcome::PowerUpCollected { kind, .. } => {
                state.emit(GameEvent::PowerUpActivated(kind));
            }
        }
    }
    if collision::resolve_ground_contact(&mut state.player) {
        state.emit(GameEvent::Landed);
    }

    // Score
    let distance = state.score.distance() + (speed * dt) as f64;
    for milestone in state.score.update_distance(distance) {
        log::info!("Milestone {} reached", milestone);
        state.emit(GameEvent::MilestoneReached(milestone));
    }
    if state.score.score() != score_before {
        let score = state.score.score();
        state.emit(GameEvent::ScoreChanged(score));
    }

    // Effect expiry
    for kind in state.effects.advance(delta_ms, &mut state.speed) {
        log::debug!("Power-up {:?} expired", kind);
        state.emit(GameEvent::PowerUpExpired(kind));
    }
}

/// Close out scoring for the current run (idempotent)
fn end_run(state: &mut SimulationState) {
    if state.score.is_finished() {
        return;
    }
    if let Some(best) = state.score.finish_run() {
        log::info!("New best score: {}", best);
        state.emit(GameEvent::NewBestScore(best));
    }
    let (score, coins, best) = (
        state.score.score(),
        state.score.coins(),
        state.score.best_score(),
    );
    log::info!("Run ended: score {} coins {} best {}", score, coins, best);
    state.emit(GameEvent::RunEnded { score, coins, best });
}

/// End the current run (if still open) and start a fresh one
pub fn restart(state: &mut SimulationState, seed: u64) {
    end_run(state);
    state.reset_run(seed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;
    use crate::consts::GROUND_Y;
    use crate::sim::entity::{Collectible, CollectibleKind, Obstacle, ObstacleKind, PowerUpKind};
    use glam::Vec2;

    const FRAME: f32 = 1000.0 / 60.0;

    fn quiet_config() -> RunnerConfig {
        // No random spawns so tests place entities themselves
        let mut config = RunnerConfig::default();
        config.obstacles.min_gap = 5000.0;
        config.obstacles.max_gap = 5000.0;
        config.coins.spawn_chance = 0.0;
        config.power_ups.spawn_chance = 0.0;
        config
    }

    fn landed_state(config: RunnerConfig) -> SimulationState {
        let mut state = SimulationState::new(config, 99, 0);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), FRAME);
        }
        assert!(state.player.is_grounded());
        state.drain_events();
        state
    }

    /// Cactus `ahead` units in front of the player's anchor
    fn place_obstacle(state: &mut SimulationState, ahead: f32) -> u32 {
        let x = state.player.pos.x + ahead;
        let id = state.ids.next();
        state
            .obstacles
            .obstacles
            .push(Obstacle::new(id, ObstacleKind::Cactus, Vec2::new(x, GROUND_Y)));
        id
    }

    #[test]
    fn test_first_tick_spawns_obstacle_on_empty_field() {
        let mut state = SimulationState::new(RunnerConfig::default(), 7, 0);
        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.obstacles.obstacles.len(), 1);
    }

    #[test]
    fn test_player_lands_and_emits_once() {
        let mut state = SimulationState::new(quiet_config(), 1, 0);
        let mut landed = 0;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), FRAME);
            landed += state
                .drain_events()
                .iter()
                .filter(|e| **e == GameEvent::Landed)
                .count();
        }
        assert_eq!(landed, 1);
        assert!(state.player.is_grounded());
    }

    #[test]
    fn test_jump_and_double_jump_events() {
        let mut state = landed_state(quiet_config());
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        tick(&mut state, &jump, FRAME);
        tick(&mut state, &jump, FRAME);
        tick(&mut state, &jump, FRAME);
        let jumps: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Jumped { .. }))
            .collect();
        assert_eq!(
            jumps,
            vec![
                GameEvent::Jumped { double: false },
                GameEvent::Jumped { double: true }
            ]
        );
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = landed_state(quiet_config());
        state.effects.activate(
            PowerUpKind::Magnet,
            &mut state.player,
            &mut state.speed,
        );
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, FRAME);
        assert_eq!(state.phase, RunPhase::Paused);
        let snap = state.snapshot();

        for _ in 0..600 {
            tick(&mut state, &TickInput { jump: true, pause: false }, FRAME);
        }
        let after = state.snapshot();
        assert_eq!(after.world_speed, snap.world_speed);
        assert_eq!(after.score.distance, snap.score.distance);
        assert_eq!(after.player.pos, snap.player.pos);
        // Countdown frozen too
        assert!(state.effects.magnet_active());

        tick(&mut state, &pause, FRAME);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(
            state.drain_events()[..2],
            [GameEvent::Paused, GameEvent::Resumed]
        );
    }

    #[test]
    fn test_lethal_hit_ends_run_and_halts() {
        let mut state = landed_state(quiet_config());
        place_obstacle(&mut state, 4.0);

        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.phase, RunPhase::GameOver);
        assert!(state.player.is_dead());
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Died { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::RunEnded { .. })));

        let distance = state.score.distance();
        let obstacle_x = state.obstacles.obstacles[0].pos.x;
        for _ in 0..30 {
            tick(&mut state, &TickInput { jump: true, pause: false }, FRAME);
        }
        assert_eq!(state.score.distance(), distance);
        assert_eq!(state.obstacles.obstacles[0].pos.x, obstacle_x);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_shielded_hit_survives() {
        let mut state = landed_state(quiet_config());
        state.player.activate_shield();
        place_obstacle(&mut state, 4.0);

        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.phase, RunPhase::Running);
        assert!(!state.player.shielded);
        assert!(state.obstacles.obstacles.is_empty());
        assert!(state
            .drain_events()
            .contains(&GameEvent::ShieldAbsorbed { obstacle: ObstacleKind::Cactus }));
    }

    #[test]
    fn test_coin_pickup_scores_same_tick() {
        let mut state = landed_state(quiet_config());
        let id = state.ids.next();
        let pos = state.player.bounds().center() + Vec2::new(5.0, 0.0);
        state
            .collectibles
            .coins
            .push(Collectible::new(id, CollectibleKind::Coin, pos));
        let before = state.score.score();

        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.score.coins(), 1);
        assert!(state.score.score() >= before + 10);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::CoinCollected { coins: 1 }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::ScoreChanged(_))));
    }

    #[test]
    fn test_speed_boost_pickup_and_expiry() {
        let mut state = landed_state(quiet_config());
        let id = state.ids.next();
        let pos = state.player.bounds().center() + Vec2::new(5.0, 0.0);
        state.collectibles.power_ups.push(Collectible::new(
            id,
            CollectibleKind::PowerUp(PowerUpKind::SpeedBoost),
            pos,
        ));
        let natural = state.speed.natural();

        tick(&mut state, &TickInput::default(), FRAME);
        assert!(state.speed.current() > natural * 1.4);

        let mut expired = false;
        for _ in 0..400 {
            tick(&mut state, &TickInput::default(), FRAME);
            expired |= state
                .drain_events()
                .contains(&GameEvent::PowerUpExpired(PowerUpKind::SpeedBoost));
        }
        assert!(expired);
        assert_eq!(state.speed.current(), state.speed.natural());
    }

    #[test]
    fn test_distance_milestone_from_running() {
        let mut state = landed_state(quiet_config());
        let mut milestones = Vec::new();
        // ~3.4 s at 300 u/s crosses 1000 units (100 points)
        for _ in 0..240 {
            tick(&mut state, &TickInput::default(), FRAME);
            for e in state.drain_events() {
                if let GameEvent::MilestoneReached(m) = e {
                    milestones.push(m);
                }
            }
        }
        assert_eq!(milestones, vec![100]);
    }

    #[test]
    fn test_restart_persists_best_and_resets_run() {
        let mut state = landed_state(quiet_config());
        state.score.update_distance(5000.0);
        assert_eq!(state.score.score(), 500);
        state.player.die(&state.config.player);
        state.phase = RunPhase::GameOver;

        restart(&mut state, 1234);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::NewBestScore(500)));
        assert_eq!(events.last(), Some(&GameEvent::RunStarted { seed: 1234 }));

        assert_eq!(state.score.best_score(), 500);
        assert_eq!(state.score.score(), 0);
        assert_eq!(state.score.coins(), 0);
        assert_eq!(state.score.reached_milestones().count(), 0);
        assert_eq!(state.phase, RunPhase::Running);
        assert!(!state.player.is_dead());
        assert!(state.obstacles.obstacles.is_empty());
        assert!(state.effects.active(false).is_empty());
    }

    #[test]
    fn test_restart_cancels_pending_effects() {
        let mut state = landed_state(quiet_config());
        state.effects.activate(
            PowerUpKind::SpeedBoost,
            &mut state.player,
            &mut state.speed,
        );
        restart(&mut state, 2);
        state.drain_events();

        for _ in 0..400 {
            tick(&mut state, &TickInput::default(), FRAME);
        }
        assert!(!state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::PowerUpExpired(_))));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = SimulationState::new(RunnerConfig::default(), 31337, 0);
        let mut b = SimulationState::new(RunnerConfig::default(), 31337, 0);
        for i in 0..600 {
            let input = TickInput {
                jump: i % 45 == 0,
                pause: false,
            };
            tick(&mut a, &input, FRAME);
            tick(&mut b, &input, FRAME);
        }
        assert_eq!(a.drain_events(), b.drain_events());
        assert_eq!(a.obstacles.obstacles.len(), b.obstacles.obstacles.len());
        assert_eq!(a.score.score(), b.score.score());
        assert_eq!(a.player.pos, b.player.pos);
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let mut state = landed_state(quiet_config());
        let ticks = state.ticks;
        tick(&mut state, &TickInput::default(), 0.0);
        tick(&mut state, &TickInput::default(), -5.0);
        tick(&mut state, &TickInput::default(), f32::NAN);
        assert_eq!(state.ticks, ticks);
    }
}
