//! Game state and core simulation types
//!
//! One `GameState` per mounted game. Simulation, collision, input and
//! rendering all borrow it; nothing else keeps a copy.

use super::guide::{GuideLine, Viewport};
use crate::tuning::Tuning;

/// The player's rocket, in guide space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rocket {
    /// Progress along the guide line
    pub pos: f32,
    /// Distance above the line (fraction of minor dimension), within [0, max_offset]
    pub offset: f32,
    /// Rotation bias from nudges, decays toward zero
    pub tilt: f32,
}

impl Rocket {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.rocket_pos,
            offset: tuning.rocket_start_offset,
            tilt: 0.0,
        }
    }

    /// Move the offset by `delta`, keeping it on or above the guide line
    pub fn shift_offset(&mut self, delta: f32, max_offset: f32) {
        self.offset = (self.offset + delta).clamp(0.0, max_offset);
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Solid chunk
    Rock,
    /// Concentric ring pair
    Ring,
    /// Radial spike cluster with a glow
    Spike,
}

impl ObstacleKind {
    /// Weighted draw from a unit random value
    pub fn from_roll(roll: f32, tuning: &Tuning) -> Self {
        if roll < tuning.rock_weight {
            ObstacleKind::Rock
        } else if roll < tuning.rock_weight + tuning.ring_weight {
            ObstacleKind::Ring
        } else {
            ObstacleKind::Spike
        }
    }
}

/// An obstacle gliding toward the rocket
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Progress along the guide line (decreases over time)
    pub pos: f32,
    /// Fixed distance above the line
    pub offset: f32,
    /// Radius in CSS pixels
    pub size: f32,
    pub kind: ObstacleKind,
}

/// Flash overlay flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Hit,
    Near,
}

/// A running flash overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    /// Milliseconds left
    pub remaining_ms: f32,
    /// Total duration (ms)
    pub max_ms: f32,
}

impl Flash {
    pub fn new(kind: FlashKind, duration_ms: f32) -> Self {
        Self {
            kind,
            remaining_ms: duration_ms,
            max_ms: duration_ms,
        }
    }

    /// Remaining fraction in [0, 1]
    pub fn fraction(&self) -> f32 {
        let max = if self.max_ms > 0.0 { self.max_ms } else { 1.0 };
        (self.remaining_ms / max).clamp(0.0, 1.0)
    }
}

/// Things that happened during a frame, for the driver to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Rocket hit an obstacle; the run is over
    Hit,
    /// Rocket grazed an obstacle
    NearMiss,
    /// The run beat the stored high score (floored value)
    NewHighScore(u64),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rocket: Rocket,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Active flash overlay, if any
    pub flash: Option<Flash>,
    /// Run score (floored for display)
    pub score: f64,
    /// Best floored score seen on this device
    pub high_score: u64,
    /// Latched on the first hit, cleared only by restart
    pub game_over: bool,
    /// Background grid scroll (CSS pixels)
    pub grid_offset: f32,
    /// Guide dash loop in [0, 1)
    pub progress: f32,
    /// Milliseconds since the last spawn
    pub spawn_timer_ms: f32,
    /// Canvas size in CSS pixels
    pub viewport: Viewport,
    /// Whether the hosting slide was visible on the last tick
    pub slide_active: bool,
    /// Rocket start values, kept for restart
    start_rocket: Rocket,
}

impl GameState {
    pub fn new(tuning: &Tuning, high_score: u64) -> Self {
        let rocket = Rocket::new(tuning);
        Self {
            rocket,
            obstacles: Vec::new(),
            flash: None,
            score: 0.0,
            high_score,
            game_over: false,
            grid_offset: 0.0,
            progress: 0.0,
            spawn_timer_ms: 0.0,
            viewport: Viewport::default(),
            slide_active: true,
            start_rocket: rocket,
        }
    }

    /// Start a fresh run. Keeps the high score and the canvas size.
    pub fn reset(&mut self) {
        self.rocket = self.start_rocket;
        self.obstacles.clear();
        self.flash = None;
        self.score = 0.0;
        self.game_over = false;
        self.grid_offset = 0.0;
        self.progress = 0.0;
        self.spawn_timer_ms = 0.0;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Guide geometry for the current viewport
    pub fn guide(&self) -> GuideLine {
        GuideLine::new(self.viewport)
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn flash_active(&self) -> bool {
        self.flash.is_some_and(|f| f.remaining_ms > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(&Tuning::default(), 42);
        assert_eq!(state.rocket.pos, 0.35);
        assert_eq!(state.rocket.offset, 0.10);
        assert_eq!(state.high_score, 42);
        assert!(!state.game_over);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_shift_offset_clamps() {
        let mut rocket = Rocket::new(&Tuning::default());
        rocket.shift_offset(1.0, 0.16);
        assert_eq!(rocket.offset, 0.16);
        rocket.shift_offset(-5.0, 0.16);
        assert_eq!(rocket.offset, 0.0);
    }

    #[test]
    fn test_kind_weights() {
        let t = Tuning::default();
        assert_eq!(ObstacleKind::from_roll(0.0, &t), ObstacleKind::Rock);
        assert_eq!(ObstacleKind::from_roll(0.39, &t), ObstacleKind::Rock);
        assert_eq!(ObstacleKind::from_roll(0.4, &t), ObstacleKind::Ring);
        assert_eq!(ObstacleKind::from_roll(0.74, &t), ObstacleKind::Ring);
        assert_eq!(ObstacleKind::from_roll(0.75, &t), ObstacleKind::Spike);
        assert_eq!(ObstacleKind::from_roll(0.99, &t), ObstacleKind::Spike);
    }

    #[test]
    fn test_reset_keeps_high_score_and_viewport() {
        let t = Tuning::default();
        let mut state = GameState::new(&t, 7);
        state.set_viewport(Viewport::new(400.0, 300.0));
        state.score = 99.5;
        state.game_over = true;
        state.rocket.offset = 0.0;
        state.rocket.tilt = 1.0;
        state.flash = Some(Flash::new(FlashKind::Hit, 260.0));
        state.obstacles.push(Obstacle {
            pos: 0.5,
            offset: 0.05,
            size: 8.0,
            kind: ObstacleKind::Ring,
        });

        state.reset();

        assert_eq!(state.score, 0.0);
        assert!(!state.game_over);
        assert!(state.obstacles.is_empty());
        assert!(state.flash.is_none());
        assert_eq!(state.rocket, Rocket::new(&t));
        assert_eq!(state.high_score, 7);
        assert_eq!(state.viewport, Viewport::new(400.0, 300.0));
    }

    #[test]
    fn test_flash_fraction() {
        let mut flash = Flash::new(FlashKind::Near, 120.0);
        assert_eq!(flash.fraction(), 1.0);
        flash.remaining_ms = 30.0;
        assert!((flash.fraction() - 0.25).abs() < 1e-6);
    }
}
