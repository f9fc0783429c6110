//! Run lifecycle glue
//!
//! Owns one simulation and a best-score backend. The best score is read once
//! at construction and written only when a run beats it.

use crate::config::RunnerConfig;
use crate::persistence::BestScoreStore;
use crate::sim::events::GameEvent;
use crate::sim::state::{RunPhase, SimulationState, WorldSnapshot};
use crate::sim::tick::{self, TickInput};

pub struct Session<S: BestScoreStore> {
    state: SimulationState,
    store: S,
}

impl<S: BestScoreStore> Session<S> {
    pub fn new(config: RunnerConfig, seed: u64, store: S) -> Self {
        let best = store.load_best_score();
        Self {
            state: SimulationState::new(config, seed, best),
            store,
        }
    }

    /// Advance one host frame and return everything that happened,
    /// persisting the best score if this frame produced a new one
    pub fn tick(&mut self, input: TickInput, delta_ms: f32) -> Vec<GameEvent> {
        tick::tick(&mut self.state, &input, delta_ms);
        self.flush()
    }

    /// Close the current run and start another with `seed`
    pub fn restart(&mut self, seed: u64) -> Vec<GameEvent> {
        tick::restart(&mut self.state, seed);
        self.flush()
    }

    fn flush(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::NewBestScore(best) = event {
                self.store.save_best_score(*best);
            }
        }
        events
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == RunPhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    const FRAME: f32 = 1000.0 / 60.0;

    fn run_until_over<S: BestScoreStore>(session: &mut Session<S>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..60 * 600 {
            events.extend(session.tick(TickInput::default(), FRAME));
            if session.is_over() {
                break;
            }
        }
        events
    }

    #[test]
    fn test_loads_best_on_start() {
        let session = Session::new(RunnerConfig::default(), 1, MemoryStore::with_raw("1500"));
        assert_eq!(session.state().score.best_score(), 1500);
        assert_eq!(session.snapshot().score.best_score, 1500);
    }

    #[test]
    fn test_malformed_store_reads_zero() {
        let session = Session::new(RunnerConfig::default(), 1, MemoryStore::with_raw("lots"));
        assert_eq!(session.state().score.best_score(), 0);
    }

    #[test]
    fn test_first_run_persists_best() {
        // Never jumping, the first cactus or rock ends the run
        let mut session = Session::new(RunnerConfig::default(), 3, MemoryStore::new());
        let events = run_until_over(&mut session);
        assert!(session.is_over());

        let score = session.state().score.score();
        assert!(score > 0);
        assert!(events.contains(&GameEvent::NewBestScore(score)));
        assert_eq!(session.store().load_best_score(), score);
        assert_eq!(session.store().writes, 1);
    }

    #[test]
    fn test_worse_run_leaves_store_alone() {
        let mut session = Session::new(
            RunnerConfig::default(),
            3,
            MemoryStore::with_raw("999999"),
        );
        let events = run_until_over(&mut session);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::NewBestScore(_))));
        assert_eq!(session.store().writes, 0);
    }

    #[test]
    fn test_restart_mid_run_scores_then_resets() {
        let mut config = RunnerConfig::default();
        config.obstacles.min_gap = 5000.0;
        config.obstacles.max_gap = 5000.0;
        let mut session = Session::new(config, 8, MemoryStore::new());
        for _ in 0..240 {
            session.tick(TickInput::default(), FRAME);
        }
        let score = session.state().score.score();

        let events = session.restart(9);
        assert!(events.contains(&GameEvent::NewBestScore(score)));
        assert_eq!(events.last(), Some(&GameEvent::RunStarted { seed: 9 }));
        assert_eq!(session.store().load_best_score(), score);
        assert_eq!(session.state().score.score(), 0);
        assert_eq!(session.phase(), RunPhase::Running);
    }

    #[test]
    fn test_restart_after_game_over_does_not_double_save() {
        let mut session = Session::new(RunnerConfig::default(), 3, MemoryStore::new());
        run_until_over(&mut session);
        let events = session.restart(4);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::RunEnded { .. })));
        assert_eq!(session.store().writes, 1);
    }
}
