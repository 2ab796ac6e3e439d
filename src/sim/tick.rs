//! Time-based simulation step
//!
//! Advances the run by the wall-clock time since the previous frame.

use super::rng::RandomSource;
use super::state::{GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Advance the game state by `dt` seconds.
///
/// Does nothing while the run is over or the hosting slide is hidden.
/// The flash countdown is separate (see [`tick_flash`]) so it can finish
/// while everything else is frozen.
pub fn advance<R: RandomSource + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    dt: f32,
    active: bool,
    rng: &mut R,
) {
    state.slide_active = active;
    if state.game_over || !active {
        return;
    }
    let dt = dt.max(0.0);
    let dt_ms = dt * 1000.0;

    state.grid_offset += tuning.grid_speed * dt;

    update_obstacles(state, tuning, dt, rng);

    state.score += f64::from(tuning.score_rate * dt);

    // A long frame (tab resumed) can cover several loops
    state.progress = (state.progress + dt_ms / tuning.traverse_ms).rem_euclid(1.0);

    state.rocket.tilt *= tuning.tilt_decay;
}

/// Spawn, move and cull obstacles
fn update_obstacles<R: RandomSource + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    dt: f32,
    rng: &mut R,
) {
    if !state.viewport.is_drawable() {
        return;
    }

    // One spawn per frame at most; overshoot past the interval is dropped
    state.spawn_timer_ms += dt * 1000.0;
    if state.spawn_timer_ms >= tuning.spawn_interval_ms {
        state.spawn_timer_ms = 0.0;
        let obstacle = spawn_obstacle(state, tuning, rng);
        log::debug!(
            "Spawned {:?} at pos {:.2} offset {:.3}",
            obstacle.kind,
            obstacle.pos,
            obstacle.offset
        );
        state.obstacles.push(obstacle);
    }

    let delta_pos = tuning.obstacle_speed * dt;
    for obstacle in &mut state.obstacles {
        obstacle.pos -= delta_pos;
    }

    let cull = tuning.cull_pos;
    state.obstacles.retain(|o| o.pos >= cull);
}

/// Roll a new obstacle ahead of the rocket.
///
/// Draw order: pos, offset, size, kind.
pub fn spawn_obstacle<R: RandomSource + ?Sized>(
    state: &GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> Obstacle {
    let min_pos = (state.rocket.pos + tuning.spawn_lead).min(tuning.spawn_min_cap);
    let pos = min_pos + rng.next_unit() * (tuning.spawn_far - min_pos);

    let offset = tuning.spawn_offset_base + rng.next_unit() * tuning.spawn_offset_extra;

    let size = state.viewport.min_dim() * (tuning.size_base + rng.next_unit() * tuning.size_extra);

    let kind = ObstacleKind::from_roll(rng.next_unit(), tuning);

    Obstacle {
        pos,
        offset,
        size,
        kind,
    }
}

/// Count the flash down by `dt_ms`, clearing it at zero. Runs every frame.
pub fn tick_flash(state: &mut GameState, dt_ms: f32) {
    if let Some(flash) = state.flash.as_mut() {
        flash.remaining_ms -= dt_ms.max(0.0);
        if flash.remaining_ms <= 0.0 {
            state.flash = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::guide::Viewport;
    use crate::sim::rng::SequenceSource;
    use crate::sim::state::{Flash, FlashKind};

    fn running_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(tuning, 0);
        state.set_viewport(Viewport::new(800.0, 500.0));
        state
    }

    fn step_for(state: &mut GameState, tuning: &Tuning, seconds: f32, rng: &mut SequenceSource) {
        let frames = (seconds * 60.0).round() as usize;
        for _ in 0..frames {
            advance(state, tuning, 1.0 / 60.0, true, rng);
        }
    }

    #[test]
    fn test_score_accrues_at_rate() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        // Zero-sized viewport: no obstacles, only the clock runs
        let mut rng = SequenceSource::new([0.5]);
        step_for(&mut state, &tuning, 10.0, &mut rng);
        assert!((state.score - 180.0).abs() < 0.05, "score = {}", state.score);
        assert!(!state.game_over);
    }

    #[test]
    fn test_frozen_when_inactive() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.rocket.tilt = 1.0;
        let mut rng = SequenceSource::new([0.5]);
        advance(&mut state, &tuning, 2.0, false, &mut rng);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.grid_offset, 0.0);
        assert_eq!(state.rocket.tilt, 1.0);
        assert!(state.obstacles.is_empty());
        assert!(!state.slide_active);
    }

    #[test]
    fn test_frozen_when_game_over() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.obstacles.push(Obstacle {
            pos: 0.8,
            offset: 0.05,
            size: 10.0,
            kind: ObstacleKind::Rock,
        });
        state.score = 12.0;
        state.game_over = true;
        let before = state.obstacles.clone();
        let mut rng = SequenceSource::new([0.5]);
        step_for(&mut state, &tuning, 3.0, &mut rng);
        assert_eq!(state.obstacles, before);
        assert_eq!(state.score, 12.0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_spawn_on_interval_drops_overshoot() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        let mut rng = SequenceSource::new([0.0, 0.0, 0.0, 0.0]);

        advance(&mut state, &tuning, 1.0, true, &mut rng);
        assert!(state.obstacles.is_empty());
        assert!((state.spawn_timer_ms - 1000.0).abs() < 1e-3);

        // Crossing 1400 ms spawns once and resets the timer to zero
        advance(&mut state, &tuning, 0.9, true, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer_ms, 0.0);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_spawn_exact_values() {
        let tuning = Tuning::default();
        let state = running_state(&tuning);
        let mut rng = SequenceSource::new([0.5, 0.5, 0.5, 0.5]);
        let o = spawn_obstacle(&state, &tuning, &mut rng);

        // Window [0.53, 1.1)
        assert!((o.pos - (0.53 + 0.5 * 0.57)).abs() < 1e-5);
        assert!((o.offset - 0.075).abs() < 1e-6);
        assert!((o.size - 500.0 * 0.029).abs() < 1e-4);
        assert_eq!(o.kind, ObstacleKind::Ring);
    }

    #[test]
    fn test_spawn_window_capped_near_end() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.rocket.pos = 0.9;
        let mut rng = SequenceSource::new([0.0, 0.0, 0.0, 0.9]);
        let o = spawn_obstacle(&state, &tuning, &mut rng);
        assert!((o.pos - 0.95).abs() < 1e-6);
        assert_eq!(o.kind, ObstacleKind::Spike);
    }

    #[test]
    fn test_obstacle_moves_and_culls() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.obstacles.push(Obstacle {
            pos: 1.0,
            offset: 0.05,
            size: 10.0,
            kind: ObstacleKind::Rock,
        });
        // Keep the spawner quiet
        state.spawn_timer_ms = f32::MIN;
        let mut rng = SequenceSource::new([0.5]);

        advance(&mut state, &tuning, 2.0, true, &mut rng);
        assert!((state.obstacles[0].pos - (1.0 - 0.22 * 2.0)).abs() < 1e-5);

        // 1.0 - 0.22 * 5.5 = -0.21 < -0.2
        advance(&mut state, &tuning, 3.5, true, &mut rng);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_progress_wraps_and_tilt_decays() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.spawn_timer_ms = f32::MIN;
        state.progress = 0.99;
        state.rocket.tilt = 1.0;
        let mut rng = SequenceSource::new([0.5]);
        advance(&mut state, &tuning, 0.14, true, &mut rng);
        assert!((state.progress - 0.01).abs() < 1e-4);
        assert!((state.rocket.tilt - 0.92).abs() < 1e-6);
    }

    #[test]
    fn test_progress_wraps_after_long_frame() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.spawn_timer_ms = f32::MIN;
        let mut rng = SequenceSource::new([0.5]);
        // 20s is almost three full 7s loops
        advance(&mut state, &tuning, 20.0, true, &mut rng);
        assert!((0.0..1.0).contains(&state.progress));
        assert!((state.progress - (20.0 / 7.0 - 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_flash_counts_down_and_clears() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.game_over = true;
        state.flash = Some(Flash::new(FlashKind::Hit, 260.0));

        tick_flash(&mut state, 100.0);
        assert_eq!(state.flash.map(|f| f.remaining_ms), Some(160.0));

        tick_flash(&mut state, 200.0);
        assert!(state.flash.is_none());
    }
}
