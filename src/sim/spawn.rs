//! Asteroid creation and the periodic spawner

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, Bounds, GameState};
use crate::consts::{ASTEROID_MAX_SPEED, EDGE_MARGIN};

/// Create an asteroid just outside a random canvas edge
///
/// A coin flip picks left/right versus top/bottom, a second flip picks the
/// side. The position along the edge is uniform and each velocity component
/// is uniform in `[-max_speed, max_speed]`.
pub fn generate_asteroid<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &Bounds,
    max_speed: f32,
) -> Asteroid {
    let vel = Vec2::new(symmetric(rng, max_speed), symmetric(rng, max_speed));

    let pos = if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) {
            -EDGE_MARGIN
        } else {
            bounds.width + EDGE_MARGIN
        };
        Vec2::new(x, below(rng, bounds.height))
    } else {
        let y = if rng.random_bool(0.5) {
            -EDGE_MARGIN
        } else {
            bounds.height + EDGE_MARGIN
        };
        Vec2::new(below(rng, bounds.width), y)
    };

    Asteroid { pos, vel }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    if max > 0.0 {
        rng.random_range(-max..=max)
    } else {
        0.0
    }
}

fn below<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    // f32 sampling can round up onto the open end
    let v = rng.random_range(0.0..extent);
    if v < extent { v } else { 0.0 }
}

/// Spawn an asteroid into the running game with the default speed
pub fn spawn_one(state: &mut GameState) {
    let bounds = state.bounds;
    let asteroid = generate_asteroid(state.rng(), &bounds, ASTEROID_MAX_SPEED);
    state.asteroids.push(asteroid);
}

/// One spawner tick: add an asteroid if the run is live and below the cap
///
/// Returns true if an asteroid was added.
pub fn spawn_tick(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    if state.asteroids.len() >= state.settings.max_asteroids as usize {
        return false;
    }
    spawn_one(state);
    log::debug!("Spawned asteroid ({} live)", state.asteroids.len());
    true
}

/// Fixed-period spawner clock
///
/// Fires at most once per `advance`; periods missed while the host was
/// throttled are dropped rather than replayed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    period_ms: f64,
    elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms as f64,
            elapsed_ms: 0.0,
        }
    }

    /// Change the period and restart it
    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms as f64;
        self.elapsed_ms = 0.0;
    }

    /// Advance the clock; true when a spawn is due
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.period_ms <= 0.0 {
            return false;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms < self.period_ms {
            return false;
        }
        self.elapsed_ms = (self.elapsed_ms - self.period_ms) % self.period_ms;
        true
    }
}

/// Drive the spawner from frame time (for hosts without an interval timer)
pub fn advance_spawner(state: &mut GameState, dt_ms: f64) -> bool {
    if !state.is_running() {
        return false;
    }
    if state.spawn_timer.advance(dt_ms) {
        return spawn_tick(state);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_time::BestTime;
    use crate::settings::GameSettings;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state(max: u32) -> GameState {
        let settings = GameSettings {
            max_asteroids: max,
            ..Default::default()
        };
        let mut state = GameState::new(
            7,
            Bounds::new(800.0, 600.0),
            settings,
            BestTime::default(),
        );
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_spawn_tick_respects_cap() {
        let mut state = running_state(5);
        for _ in 0..5 {
            assert!(spawn_tick(&mut state));
        }
        assert!(!spawn_tick(&mut state));
        assert_eq!(state.asteroids.len(), 5);
    }

    #[test]
    fn test_spawn_tick_idle_does_nothing() {
        let mut state = running_state(5);
        state.phase = GamePhase::GameOver;
        assert!(!spawn_tick(&mut state));
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_timer_fires_once_per_period() {
        let mut timer = SpawnTimer::new(1000);
        assert!(!timer.advance(400.0));
        assert!(!timer.advance(500.0));
        assert!(timer.advance(100.0));
        assert!(!timer.advance(999.0));
        assert!(timer.advance(1.0));
    }

    #[test]
    fn test_timer_no_catch_up() {
        let mut timer = SpawnTimer::new(1000);
        // A throttled tab returns after 3.5 periods
        assert!(timer.advance(3500.0));
        // Missed ticks are not replayed
        assert!(!timer.advance(0.0));
        assert!(timer.advance(500.0));
    }

    #[test]
    fn test_advance_spawner_uses_state_timer() {
        let mut state = running_state(10);
        state.spawn_timer.set_period(1000);
        assert!(!advance_spawner(&mut state, 999.0));
        assert!(advance_spawner(&mut state, 1.0));
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_zero_sized_canvas() {
        let mut rng = Pcg32::seed_from_u64(3);
        let a = generate_asteroid(&mut rng, &Bounds::new(0.0, 0.0), ASTEROID_MAX_SPEED);
        assert!(a.pos.x.abs() == EDGE_MARGIN || a.pos.y.abs() == EDGE_MARGIN);
    }

    proptest! {
        #[test]
        fn prop_generated_asteroid_outside_one_edge(
            seed in any::<u64>(),
            w in 1.0f32..3000.0,
            h in 1.0f32..3000.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let bounds = Bounds::new(w, h);
            let a = generate_asteroid(&mut rng, &bounds, ASTEROID_MAX_SPEED);

            let x_outside = a.pos.x <= -EDGE_MARGIN || a.pos.x >= w + EDGE_MARGIN;
            let y_outside = a.pos.y <= -EDGE_MARGIN || a.pos.y >= h + EDGE_MARGIN;
            prop_assert!(x_outside != y_outside);
            if x_outside {
                prop_assert!(a.pos.y >= 0.0 && a.pos.y < h);
            } else {
                prop_assert!(a.pos.x >= 0.0 && a.pos.x < w);
            }

            prop_assert!(a.vel.x.abs() <= ASTEROID_MAX_SPEED);
            prop_assert!(a.vel.y.abs() <= ASTEROID_MAX_SPEED);
        }
    }
}
