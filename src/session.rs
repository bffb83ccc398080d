//! Game session controller
//!
//! Owns the simulation context and everything around it: the open/closed
//! overlay, the frame clock, pointer gestures, persistence and the
//! published snapshot. Single-threaded; pointer handlers only queue data
//! for the next tick.

use glam::Vec2;

use crate::clock::FrameClock;
use crate::highscores::HighScore;
use crate::platform::KeyValueStore;
use crate::settings::{QualityPreset, Settings};
use crate::sim::{AimController, Field, GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Overlay closed; no frames scheduled
    Idle,
    /// Overlay open and the frame loop running
    Running,
    /// Out of lives; waits for [`Session::reset`]
    GameOver,
}

/// One player's mini-game session
pub struct Session<S: KeyValueStore> {
    state: GameState,
    tuning: Tuning,
    settings: Settings,
    aim: AimController,
    input: TickInput,
    clock: FrameClock,
    store: S,
    open: bool,
    snapshot: Snapshot,
}

impl<S: KeyValueStore> Session<S> {
    /// Create a closed session, reading the best score and settings from `store`
    pub fn new(store: S, tuning: Tuning, field: Field, seed: u64) -> Self {
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);
        let state = GameState::new(field, &tuning, high_score.best, seed);
        let snapshot = Snapshot::capture(&state, None, &tuning);

        let mut session = Self {
            state,
            tuning,
            settings,
            aim: AimController::new(),
            input: TickInput::default(),
            clock: FrameClock::new(),
            store,
            open: false,
            snapshot,
        };
        session.apply_settings();
        session
    }

    pub fn phase(&self) -> SessionPhase {
        if self.state.game_over {
            SessionPhase::GameOver
        } else if self.open {
            SessionPhase::Running
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the overlay and start the frame loop
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.clock.reset();
        log::info!("Mini-game opened (best {})", self.state.high_score);
        self.publish();
    }

    /// Hide the overlay: stop the loop and drop balls and particles in flight.
    /// Score, lives and the best score survive.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.aim.cancel();
        self.input.clear();
        self.state.discard_in_flight();
        log::info!("Mini-game closed at score {}", self.state.score);
        self.publish();
    }

    /// Start a fresh run. The best score is kept.
    pub fn reset(&mut self) {
        self.state.reset(&self.tuning);
        self.aim.cancel();
        self.input.clear();
        self.clock.reset();
        log::info!("Session reset (best {})", self.state.high_score);
        self.publish();
    }

    /// Play field changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.field = Field::new(width, height);
        self.publish();
    }

    /// Begin aiming. Ignored unless running with lives left.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.phase() != SessionPhase::Running || self.state.lives == 0 {
            return false;
        }
        self.aim.start(Vec2::new(x, y));
        true
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.aim.update(
            Vec2::new(x, y),
            self.state.field,
            &self.tuning,
            self.settings.trajectory_preview,
        );
    }

    /// Release: queue a shot for the next tick
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        if !self.aim.is_aiming() {
            return;
        }
        self.pointer_move(x, y);
        if let Some(vel) = self.aim.release(&self.tuning) {
            if self.phase() == SessionPhase::Running {
                self.input.launches.push(vel);
            }
        }
    }

    /// Pointer left the field; drop the drag without shooting
    pub fn pointer_cancel(&mut self) {
        self.aim.cancel();
    }

    /// Advance by host frame time, running as many fixed steps as it covers
    pub fn frame(&mut self, elapsed_secs: f32) -> Vec<GameEvent> {
        if self.phase() != SessionPhase::Running {
            return Vec::new();
        }
        let steps = self.clock.advance(elapsed_secs);
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.step());
            if self.phase() != SessionPhase::Running {
                break;
            }
        }
        events
    }

    /// Run exactly one simulation step (no-op unless running)
    pub fn step(&mut self) -> Vec<GameEvent> {
        if self.phase() != SessionPhase::Running {
            return Vec::new();
        }

        let events = tick(&mut self.state, &self.input, &self.tuning);
        self.input.clear();

        for event in &events {
            match event {
                GameEvent::NewHighScore { score } => {
                    HighScore::new(*score).save(&mut self.store);
                }
                GameEvent::GameOver { .. } => self.aim.cancel(),
                _ => {}
            }
        }

        self.publish();
        events
    }

    fn publish(&mut self) {
        self.snapshot = Snapshot::capture(&self.state, self.aim.aim(), &self.tuning);
    }

    fn apply_settings(&mut self) {
        self.state.max_particles = self.settings.max_particles();
        self.state.fire_trail = self.settings.fire_trail();
    }

    /// Latest published render state
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace and persist settings
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save(&mut self.store);
        self.apply_settings();
    }

    /// Switch quality by preset name ("low", "medium", "high").
    /// Unknown names leave the settings untouched.
    pub fn set_quality(&mut self, name: &str) -> bool {
        let Some(quality) = QualityPreset::parse(name) else {
            log::warn!("Unknown quality preset {:?}", name);
            return false;
        };
        self.set_settings(Settings {
            quality,
            ..self.settings.clone()
        });
        true
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use crate::sim::Stage;

    /// Stationary hoop so shots are repeatable
    fn still_tuning() -> Tuning {
        Tuning {
            hoop_base_speed: 0.0,
            hoop_speed_per_point: 0.0,
            ..Tuning::default()
        }
    }

    fn session() -> Session<MemoryStore> {
        let mut s = Session::new(MemoryStore::new(), still_tuning(), Field::new(400.0, 800.0), 7);
        s.open();
        s
    }

    /// Drag straight down and release: fires straight up through the hoop
    fn shoot_center(s: &mut Session<MemoryStore>) {
        assert!(s.pointer_down(200.0, 300.0));
        s.pointer_move(200.0, 450.0);
        s.pointer_up(200.0, 500.0);
    }

    fn run_until<F: Fn(&GameEvent) -> bool>(s: &mut Session<MemoryStore>, max: usize, pred: F) -> Vec<GameEvent> {
        let mut all = Vec::new();
        for _ in 0..max {
            let events = s.step();
            let done = events.iter().any(&pred);
            all.extend(events);
            if done {
                break;
            }
        }
        all
    }

    #[test]
    fn test_phases() {
        let mut s = Session::new(MemoryStore::new(), Tuning::default(), Field::default(), 1);
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(s.step().is_empty());
        s.open();
        assert_eq!(s.phase(), SessionPhase::Running);
        s.close();
        assert_eq!(s.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_scenario_a_centered_shot_scores() {
        let mut s = session();
        s.state.lives = 3;
        shoot_center(&mut s);

        let events = run_until(&mut s, 300, |e| matches!(e, GameEvent::Scored { .. }));
        let captured = events.iter().position(|e| matches!(e, GameEvent::Captured { .. }));
        let scored = events.iter().position(|e| matches!(e, GameEvent::Scored { .. }));
        assert!(captured.is_some());
        assert!(scored.is_some());
        assert!(captured < scored);
        assert_eq!(s.state().score, 1);
        assert_eq!(s.state().lives, 4);
        assert!(s.state().particles.len() >= s.tuning().confetti_count / 2);
    }

    #[test]
    fn test_scenario_a_score_at_full_lives_stays_capped() {
        let mut s = session();
        shoot_center(&mut s);
        run_until(&mut s, 300, |e| matches!(e, GameEvent::Scored { .. }));
        assert_eq!(s.state().score, 1);
        assert_eq!(s.state().lives, s.tuning().max_lives);
    }

    #[test]
    fn test_scenario_b_dropped_ball_misses() {
        let mut s = session();
        assert!(s.pointer_down(100.0, 100.0));
        s.pointer_up(100.0, 100.0);

        let events = run_until(&mut s, 100, |e| matches!(e, GameEvent::Missed { .. }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::Missed { .. })));
        assert_eq!(s.state().lives, s.tuning().max_lives - 1);
        assert!(!s.state().particles.is_empty());
        assert!(s.state().balls.is_empty());
        assert!(!s.state().game_over);
    }

    #[test]
    fn test_scenario_c_last_life_ends_game_same_tick() {
        let mut s = session();
        s.state.lives = 1;
        s.pointer_down(100.0, 100.0);
        s.pointer_up(100.0, 100.0);

        for _ in 0..100 {
            let events = s.step();
            if events.iter().any(|e| matches!(e, GameEvent::Missed { .. })) {
                assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
                break;
            }
        }
        assert_eq!(s.state().lives, 0);
        assert!(s.state().game_over);
        assert_eq!(s.phase(), SessionPhase::GameOver);
        assert!(s.snapshot().game_over);
        // No aiming after game over
        assert!(!s.pointer_down(10.0, 10.0));
    }

    #[test]
    fn test_scenario_d_stage_one_announced_once() {
        let mut s = session();
        s.state.score = 4;

        shoot_center(&mut s);
        let events = run_until(&mut s, 300, |e| matches!(e, GameEvent::Scored { .. }));
        let reached: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::StageReached { .. }))
            .collect();
        assert_eq!(reached, vec![&GameEvent::StageReached { stage: Stage::Prospecting }]);
        assert_eq!(s.state().stage, Stage::Prospecting);
        assert!(s.snapshot().notification.is_some());

        // Another basket above the threshold announces nothing
        shoot_center(&mut s);
        let events = run_until(&mut s, 300, |e| matches!(e, GameEvent::Scored { .. }));
        assert!(events.iter().all(|e| !matches!(e, GameEvent::StageReached { .. })));
        assert_eq!(s.state().score, 6);
        assert_eq!(s.state().stage, Stage::Prospecting);
    }

    #[test]
    fn test_notification_expires() {
        let mut s = session();
        s.state.score = 4;
        shoot_center(&mut s);
        run_until(&mut s, 300, |e| matches!(e, GameEvent::Scored { .. }));
        assert!(s.snapshot().notification.is_some());
        for _ in 0..s.tuning().notification_ticks {
            s.step();
        }
        assert!(s.snapshot().notification.is_none());
    }

    #[test]
    fn test_scenario_e_reset_keeps_high_score() {
        let mut s = session();
        s.state.score = 7;
        s.state.high_score = 7;
        s.state.lives = 1;
        s.pointer_down(0.0, 0.0);
        s.pointer_up(0.0, 0.0);
        run_until(&mut s, 100, |e| matches!(e, GameEvent::GameOver { .. }));
        assert_eq!(s.phase(), SessionPhase::GameOver);

        s.reset();
        let state = s.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, s.tuning().max_lives);
        assert!(!state.game_over);
        assert_eq!(state.stage, Stage::Normal);
        assert_eq!(state.high_score, 7);
        assert!(state.balls.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(s.phase(), SessionPhase::Running);
        assert_eq!(s.snapshot().score, 0);
    }

    #[test]
    fn test_new_high_score_is_persisted() {
        let mut store = MemoryStore::new();
        store.set_item(HighScore::STORAGE_KEY, "0");
        let mut s = Session::new(store, still_tuning(), Field::new(400.0, 800.0), 3);
        s.open();
        shoot_center(&mut s);
        let events = run_until(&mut s, 300, |e| matches!(e, GameEvent::Scored { .. }));
        assert!(events.contains(&GameEvent::NewHighScore { score: 1 }));
        assert_eq!(s.store().get_item(HighScore::STORAGE_KEY), Some("1".to_string()));
    }

    #[test]
    fn test_stored_high_score_is_loaded() {
        let mut store = MemoryStore::new();
        store.set_item(HighScore::STORAGE_KEY, "12");
        let s = Session::new(store, Tuning::default(), Field::default(), 1);
        assert_eq!(s.high_score(), 12);
        assert_eq!(s.snapshot().high_score, 12);
    }

    #[test]
    fn test_close_discards_in_flight_but_keeps_score() {
        let mut s = session();
        s.state.score = 3;
        shoot_center(&mut s);
        s.step();
        assert_eq!(s.state().balls.len(), 1);

        s.close();
        assert!(s.state().balls.is_empty());
        assert!(s.state().particles.is_empty());
        assert_eq!(s.state().score, 3);
        assert!(s.frame(1.0).is_empty());
    }

    #[test]
    fn test_pointer_cancel_fires_nothing() {
        let mut s = session();
        s.pointer_down(200.0, 300.0);
        s.pointer_move(200.0, 400.0);
        assert!(s.snapshot().aim.is_none());
        s.step();
        assert_eq!(s.snapshot().aim.as_ref().map(|a| a.trajectory.len()), Some(s.tuning().trajectory_steps));
        s.pointer_cancel();
        s.pointer_up(200.0, 400.0);
        s.step();
        assert!(s.state().balls.is_empty());
    }

    #[test]
    fn test_drag_started_before_last_life_lost_still_fires() {
        let mut s = session();
        s.state.lives = 1;
        shoot_center(&mut s);
        s.step();
        assert_eq!(s.state().balls.len(), 1);

        assert!(s.pointer_down(200.0, 300.0));
        // The other ball costs the last life mid-drag
        s.state.lives = 0;
        s.pointer_up(200.0, 500.0);
        let events = s.step();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Launched { .. })));
        assert_eq!(s.state().balls.len(), 2);
        assert_eq!(s.phase(), SessionPhase::Running);

        // New drags stay refused at zero lives
        assert!(!s.pointer_down(200.0, 300.0));
    }

    #[test]
    fn test_pointer_ignored_when_closed() {
        let mut s = Session::new(MemoryStore::new(), Tuning::default(), Field::default(), 1);
        assert!(!s.pointer_down(1.0, 1.0));
    }

    #[test]
    fn test_frame_runs_fixed_steps() {
        let mut s = session();
        let before = s.state().time_ticks;
        s.frame(crate::consts::SIM_DT * 3.0 + 0.001);
        assert_eq!(s.state().time_ticks - before, 3);
    }

    #[test]
    fn test_settings_apply_and_persist() {
        let mut s = session();
        s.set_settings(Settings {
            particles: false,
            ..Settings::default()
        });
        assert_eq!(s.state().max_particles, 0);
        assert!(s.store().get_item(Settings::STORAGE_KEY).is_some());

        s.pointer_down(0.0, 0.0);
        s.pointer_up(0.0, 0.0);
        run_until(&mut s, 100, |e| matches!(e, GameEvent::Missed { .. }));
        assert!(s.state().particles.is_empty());
    }

    #[test]
    fn test_quality_by_name() {
        let mut s = session();
        assert!(s.set_quality("LOW"));
        assert_eq!(s.settings().quality, QualityPreset::Low);
        assert_eq!(s.state().max_particles, QualityPreset::Low.max_particles());
        assert_eq!(Settings::load(s.store()).quality, QualityPreset::Low);

        assert!(!s.set_quality("ultra"));
        assert_eq!(s.settings().quality.as_str(), "Low");
    }

    #[test]
    fn test_resize_moves_launch_point() {
        let mut s = session();
        s.resize(600.0, 900.0);
        assert_eq!(s.snapshot().launch_point, Vec2::new(300.0, 850.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Shoot { dx: f32, dy: f32 },
            Wait(u8),
            Reset,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                6 => (-60.0f32..60.0, 0.0f32..300.0).prop_map(|(dx, dy)| Op::Shoot { dx, dy }),
                6 => (1u8..120).prop_map(Op::Wait),
                1 => Just(Op::Reset),
            ]
        }

        proptest! {
            #[test]
            fn session_invariants_hold(
                seed in 0u64..1000,
                ops in proptest::collection::vec(op(), 1..40)
            ) {
                let mut s = Session::new(MemoryStore::new(), Tuning::default(), Field::new(400.0, 800.0), seed);
                s.open();
                let max_lives = s.tuning().max_lives;
                let mut best_seen = s.high_score();
                let mut prev_stage = s.state().stage;
                let mut captured: Vec<u32> = Vec::new();

                for op in ops {
                    let ticks = match op {
                        Op::Shoot { dx, dy } => {
                            if s.pointer_down(200.0, 400.0) {
                                s.pointer_up(200.0 + dx, 400.0 + dy);
                            }
                            1
                        }
                        Op::Wait(n) => n,
                        Op::Reset => {
                            s.reset();
                            prev_stage = s.state().stage;
                            captured.clear();
                            0
                        }
                    };

                    for _ in 0..ticks {
                        s.step();
                        let state = s.state();

                        // P1: lives stay in range
                        prop_assert!(state.lives <= max_lives);

                        // P2: game over exactly when out of lives with nothing in play
                        prop_assert_eq!(state.game_over, state.lives == 0 && state.balls.is_empty());

                        // P3: stage never goes backwards within a run
                        prop_assert!(state.stage >= prev_stage);
                        prev_stage = state.stage;

                        // P4: best score tracks every score seen
                        best_seen = best_seen.max(state.score);
                        prop_assert_eq!(state.high_score, best_seen);

                        // P5: captured balls stay captured until removed
                        for ball in &state.balls {
                            if captured.contains(&ball.id) {
                                prop_assert!(ball.in_hoop);
                            }
                            if ball.in_hoop && !captured.contains(&ball.id) {
                                captured.push(ball.id);
                            }
                        }
                    }
                }
            }

            #[test]
            fn rim_bounce_always_pushes_clear(
                x_offset in -70.0f32..70.0,
                vx in -6.0f32..6.0,
                vy in 0.1f32..12.0
            ) {
                use crate::sim::{BallOutcome, Hoop, step_ball};
                use crate::sim::state::Ball;

                let tuning = Tuning::default();
                let field = Field::new(400.0, 800.0);
                let geometry = Hoop::new(&tuning).geometry(field, Stage::Normal, &tuning);
                let mut ball = Ball::new(
                    1,
                    Vec2::new(geometry.center_x + x_offset, geometry.rim_y - 2.0),
                    Vec2::new(vx, vy),
                    tuning.ball_radius,
                );
                // P6: minimum horizontal push after a rim hit
                if let BallOutcome::RimBounce { .. } = step_ball(&mut ball, &geometry, field, &tuning) {
                    prop_assert!(ball.vel.x.abs() >= tuning.rim_min_push);
                    prop_assert!(ball.vel.y < 0.0);
                }
            }
        }
    }
}
