//! Per-frame simulation step and game phase transitions
//!
//! The host calls [`tick`] once per display frame. Motion is integrated per
//! frame (velocities are pixels/frame), while run duration uses the wall
//! clock passed in as `now_ms`.

use super::collision::first_collision;
use super::movement::Direction;
use super::spawn::spawn_one;
use super::state::{Bounds, GamePhase, GameState, Player};
use crate::platform::storage::KeyValueStore;

/// Events produced by a tick for the host to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player was hit; the run is over
    GameOver {
        duration_ms: u64,
        /// Host should persist the new best time
        new_best: bool,
        /// First colliding asteroid in iteration order
        asteroid_index: usize,
    },
}

/// Begin a run (from Idle or GameOver)
///
/// Returns false if a run is already in progress.
pub fn start_game(state: &mut GameState, now_ms: f64) -> bool {
    if state.is_running() {
        return false;
    }

    state.phase = GamePhase::Running;
    state.session.begin(now_ms);
    state.frame = 0;
    state.spawn_timer.set_period(state.settings.spawn_interval_ms);

    state.asteroids.clear();
    for _ in 0..state.settings.effective_starting_asteroids() {
        spawn_one(state);
    }
    state.player = Player::centered(&state.bounds);

    log::info!(
        "Run started (seed {}): {} asteroids (max {}, spawn every {} ms)",
        state.seed,
        state.asteroids.len(),
        state.settings.max_asteroids,
        state.settings.spawn_interval_ms
    );
    true
}

/// Advance the running game by one frame
pub fn tick(state: &mut GameState, now_ms: f64) -> Option<GameEvent> {
    if !state.is_running() {
        return None;
    }

    state.frame += 1;

    // Every asteroid moves this frame, even ones behind the first hit
    for asteroid in &mut state.asteroids {
        asteroid.advance(&state.bounds);
    }

    let asteroid_index = first_collision(&state.player, &state.asteroids)?;
    Some(end_game(state, now_ms, asteroid_index))
}

/// Running -> GameOver; happens at most once per run
fn end_game(state: &mut GameState, now_ms: f64, asteroid_index: usize) -> GameEvent {
    state.phase = GamePhase::GameOver;
    let result = state.session.finish(now_ms);

    log::info!(
        "Game over after {} ms (frame {}, asteroid #{}){}",
        result.duration_ms,
        state.frame,
        asteroid_index,
        if result.new_best { " - new best!" } else { "" }
    );

    GameEvent::GameOver {
        duration_ms: result.duration_ms,
        new_best: result.new_best,
        asteroid_index,
    }
}

/// Persist what a finished run changed
///
/// Writes the best time when the run beat it. Returns true if it was written.
pub fn record_run(state: &GameState, event: &GameEvent, store: &mut dyn KeyValueStore) -> bool {
    let GameEvent::GameOver { new_best, .. } = *event;
    if !new_best {
        return false;
    }
    state.session.best.save(store);
    true
}

/// Apply a canvas resize and re-centre the player
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    state.bounds = Bounds::new(width, height);
    state.player = Player::centered(&state.bounds);
}

/// Handle a key-down event; returns true if the player moved
pub fn handle_key(state: &mut GameState, key: &str) -> bool {
    if !state.is_running() {
        return false;
    }
    let Some(dir) = Direction::from_key(key) else {
        return false;
    };
    let pos = state
        .settings
        .movement
        .step(&state.player, dir, &state.bounds);
    state.player = state.player.moved_to(pos);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_time::BestTime;
    use crate::platform::storage::MemoryStore;
    use crate::settings::GameSettings;
    use crate::sim::MovementPolicy;
    use crate::sim::state::Asteroid;
    use glam::Vec2;

    const T0: f64 = 1_700_000_000_000.0;

    fn new_state(settings: GameSettings, best: u64) -> GameState {
        GameState::new(
            12345,
            Bounds::new(800.0, 600.0),
            settings,
            BestTime::new(best),
        )
    }

    fn still(x: f32, y: f32) -> Asteroid {
        Asteroid {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
        }
    }

    #[test]
    fn test_start_game_scenario() {
        let settings = GameSettings {
            max_asteroids: 5,
            spawn_interval_ms: 5000,
            starting_asteroids: 5,
            ..Default::default()
        };
        let mut state = new_state(settings, 0);
        assert!(start_game(&mut state, T0));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.asteroids.len(), 5);
        assert_eq!(state.player.pos, Vec2::new(385.0, 285.0));
        assert_eq!(state.session.game_start_ms, T0);
        assert!(!state.show_start_modal());
    }

    #[test]
    fn test_same_seed_same_opening() {
        let mut a = new_state(GameSettings::default(), 0);
        let mut b = new_state(GameSettings::default(), 0);
        start_game(&mut a, T0);
        start_game(&mut b, T0);
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.asteroids, b.asteroids);
    }

    #[test]
    fn test_start_while_running_is_rejected() {
        let mut state = new_state(GameSettings::default(), 0);
        assert!(start_game(&mut state, T0));
        state.asteroids.clear();
        assert!(!start_game(&mut state, T0 + 10.0));
        assert!(state.asteroids.is_empty());
        assert_eq!(state.session.game_start_ms, T0);
    }

    #[test]
    fn test_starting_count_capped_by_max() {
        let settings = GameSettings {
            max_asteroids: 5,
            starting_asteroids: 8,
            ..Default::default()
        };
        let mut state = new_state(settings, 0);
        start_game(&mut state, T0);
        assert_eq!(state.asteroids.len(), 5);
    }

    #[test]
    fn test_tick_idle_does_nothing() {
        let mut state = new_state(GameSettings::default(), 0);
        state.asteroids.push(Asteroid {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, 1.0),
        });
        assert_eq!(tick(&mut state, T0), None);
        assert_eq!(state.asteroids[0].pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_tick_moves_asteroids() {
        let mut state = new_state(GameSettings::default(), 0);
        start_game(&mut state, T0);
        state.asteroids = vec![Asteroid {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.5, -2.0),
        }];
        assert_eq!(tick(&mut state, T0 + 16.0), None);
        assert_eq!(state.asteroids[0].pos, Vec2::new(11.5, 8.0));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_collision_ends_game_and_records_best() {
        let mut state = new_state(GameSettings::default(), 1000);
        start_game(&mut state, T0);
        state.asteroids = vec![still(390.0, 290.0)];

        let event = tick(&mut state, T0 + 2500.0);
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                duration_ms: 2500,
                new_best: true,
                asteroid_index: 0,
            })
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.session.current_time_ms, 2500);
        assert_eq!(state.session.best.ms, 2500);
        assert!(state.show_start_modal());
    }

    #[test]
    fn test_shorter_run_does_not_lower_best() {
        let mut state = new_state(GameSettings::default(), 9000);
        start_game(&mut state, T0);
        state.asteroids = vec![still(390.0, 290.0)];
        let event = tick(&mut state, T0 + 400.0);
        assert!(matches!(
            event,
            Some(GameEvent::GameOver {
                new_best: false,
                ..
            })
        ));
        assert_eq!(state.session.current_time_ms, 400);
        assert_eq!(state.session.best.ms, 9000);
    }

    #[test]
    fn test_record_run_persists_new_best() {
        let mut store = MemoryStore::default();
        BestTime::new(1000).save(&mut store);

        let mut state = new_state(GameSettings::default(), BestTime::load(&store).ms);
        start_game(&mut state, T0);
        state.asteroids = vec![still(390.0, 290.0)];
        let Some(event) = tick(&mut state, T0 + 2500.0) else {
            panic!("expected game over");
        };

        assert!(record_run(&state, &event, &mut store));
        assert_eq!(store.get(BestTime::STORAGE_KEY).as_deref(), Some("2500"));
        assert_eq!(BestTime::load(&store).ms, 2500);
    }

    #[test]
    fn test_record_run_keeps_longer_best() {
        let mut store = MemoryStore::default();
        BestTime::new(9000).save(&mut store);

        let mut state = new_state(GameSettings::default(), 9000);
        start_game(&mut state, T0);
        state.asteroids = vec![still(390.0, 290.0)];
        let Some(event) = tick(&mut state, T0 + 400.0) else {
            panic!("expected game over");
        };

        assert!(!record_run(&state, &event, &mut store));
        assert_eq!(store.get(BestTime::STORAGE_KEY).as_deref(), Some("9000"));
    }

    #[test]
    fn test_simultaneous_collisions_single_event() {
        let mut state = new_state(GameSettings::default(), 0);
        start_game(&mut state, T0);
        state.asteroids = vec![
            still(0.0, 0.0),
            still(395.0, 295.0),
            still(380.0, 280.0),
            Asteroid {
                pos: Vec2::new(100.0, 100.0),
                vel: Vec2::new(1.0, 0.0),
            },
        ];

        let event = tick(&mut state, T0 + 1000.0);
        assert!(matches!(
            event,
            Some(GameEvent::GameOver {
                asteroid_index: 1,
                ..
            })
        ));
        // Asteroids after the hit still advanced this frame
        assert_eq!(state.asteroids[3].pos, Vec2::new(101.0, 100.0));

        // Further ticks are inert
        assert_eq!(tick(&mut state, T0 + 5000.0), None);
        assert_eq!(state.session.current_time_ms, 1000);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = new_state(GameSettings::default(), 0);
        start_game(&mut state, T0);
        state.asteroids = vec![still(390.0, 290.0)];
        tick(&mut state, T0 + 700.0);
        assert!(state.is_game_over());

        assert!(start_game(&mut state, T0 + 10_000.0));
        assert!(state.is_running());
        assert_eq!(
            state.asteroids.len(),
            state.settings.starting_asteroids as usize
        );
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_handle_key_wrap_scenario() {
        let mut state = new_state(GameSettings::default(), 0);
        start_game(&mut state, T0);
        state.player = state.player.moved_to(Vec2::ZERO);
        assert!(handle_key(&mut state, "ArrowLeft"));
        assert_eq!(state.player.pos, Vec2::new(790.0, 0.0));
    }

    #[test]
    fn test_handle_key_teleport_policy() {
        let settings = GameSettings {
            movement: MovementPolicy::Teleport,
            ..Default::default()
        };
        let mut state = new_state(settings, 0);
        start_game(&mut state, T0);
        state.player = state.player.moved_to(Vec2::ZERO);
        assert!(handle_key(&mut state, "ArrowUp"));
        assert_eq!(state.player.pos, Vec2::new(0.0, 570.0));
    }

    #[test]
    fn test_handle_key_ignored() {
        let mut state = new_state(GameSettings::default(), 0);
        let before = state.player.clone();
        // Not running
        assert!(!handle_key(&mut state, "ArrowLeft"));
        start_game(&mut state, T0);
        // Unknown key
        assert!(!handle_key(&mut state, "x"));
        assert_eq!(state.player.pos, before.pos);
    }

    #[test]
    fn test_resize_recenters() {
        let mut state = new_state(GameSettings::default(), 0);
        start_game(&mut state, T0);
        handle_key(&mut state, "ArrowRight");
        resize(&mut state, 1024.0, 768.0);
        assert_eq!(state.bounds, Bounds::new(1024.0, 768.0));
        assert_eq!(state.player.pos, Vec2::new(497.0, 369.0));
    }
}
