//! Start/game-over modal view model
//!
//! The modal itself is plain DOM owned by the host page. It reads a
//! [`ShellView`] after every phase change, binds the three numeric inputs
//! through [`SettingField`](crate::SettingField), and calls `start_game`
//! from its button.

use serde::Serialize;

use crate::sim::{GameState, format_duration};

/// Everything the modal displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub show_modal: bool,
    pub game_over: bool,
    pub title: &'static str,
    pub button_label: &'static str,
    /// Last run, formatted; only present after a run ended
    pub current_time: Option<String>,
    /// Best run, formatted; only present after a run ended
    pub best_time: Option<String>,
    pub max_asteroids: u32,
    pub asteroid_frequency: u32,
    pub starting_asteroids: u32,
}

impl ShellView {
    pub fn from_state(state: &GameState) -> Self {
        let game_over = state.is_game_over();
        let (current_time, best_time) = if game_over {
            (
                Some(format_duration(state.session.current_time_ms)),
                Some(format_duration(state.session.best.ms)),
            )
        } else {
            (None, None)
        };

        Self {
            show_modal: state.show_start_modal(),
            game_over,
            title: if game_over {
                "Game Over"
            } else {
                "Welcome to Asteroid Dodge"
            },
            button_label: if game_over { "Restart" } else { "Start" },
            current_time,
            best_time,
            max_asteroids: state.settings.max_asteroids,
            asteroid_frequency: state.settings.spawn_interval_ms,
            starting_asteroids: state.settings.starting_asteroids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_time::BestTime;
    use crate::settings::GameSettings;
    use crate::sim::{Asteroid, Bounds, start_game, tick};
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(
            5,
            Bounds::new(800.0, 600.0),
            GameSettings::default(),
            BestTime::new(4000),
        )
    }

    #[test]
    fn test_first_start_view() {
        let view = ShellView::from_state(&state());
        assert!(view.show_modal);
        assert!(!view.game_over);
        assert_eq!(view.button_label, "Start");
        assert_eq!(view.current_time, None);
        assert_eq!(view.max_asteroids, 10);
        assert_eq!(view.asteroid_frequency, 5000);
        assert_eq!(view.starting_asteroids, 5);
    }

    #[test]
    fn test_running_hides_modal() {
        let mut state = state();
        start_game(&mut state, 0.0);
        assert!(!ShellView::from_state(&state).show_modal);
    }

    #[test]
    fn test_game_over_view() {
        let mut state = state();
        start_game(&mut state, 0.0);
        state.asteroids = vec![Asteroid {
            pos: Vec2::new(390.0, 290.0),
            vel: Vec2::ZERO,
        }];
        tick(&mut state, 2500.0);

        let view = ShellView::from_state(&state);
        assert!(view.show_modal);
        assert!(view.game_over);
        assert_eq!(view.title, "Game Over");
        assert_eq!(view.button_label, "Restart");
        assert_eq!(view.current_time.as_deref(), Some("00:02.500"));
        assert_eq!(view.best_time.as_deref(), Some("00:04.000"));
    }
}
