//! Rocket Dodge - a canvas obstacle-dodging mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, stepping, collisions, input)
//! - `renderer`: 2D canvas drawing behind a `Surface` trait
//! - `game`: Frame driver tying simulation, input, persistence and carousel together
//! - `platform`: Browser/native platform abstraction (storage, carousel, DOM shell)
//! - `highscores`: Single persisted high score
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod theme;
pub mod tuning;

pub use error::{Error, Result};
pub use game::Game;
pub use highscores::HighScore;
pub use theme::{Palette, Theme};
pub use tuning::Tuning;

/// Layout and presentation constants (not tunable at runtime)
pub mod consts {
    /// Guide line inset from the canvas edges, as a fraction of the minor dimension
    pub const GUIDE_MARGIN: f32 = 0.08;

    /// Background grid spacing (CSS pixels)
    pub const GRID_SPACING: f32 = 28.0;

    /// Guide line dash pattern (CSS pixels)
    pub const GUIDE_DASH: f64 = 8.0;
    pub const GUIDE_GAP: f64 = 4.0;
    /// Fraction of the line length the dash pattern travels per progress loop
    pub const GUIDE_DASH_TRAVEL: f32 = 0.6;
    /// Progress used to draw the dash pattern while the slide is hidden
    pub const IDLE_PROGRESS: f32 = 0.35;

    /// Rocket rotation per unit of tilt
    pub const TILT_ROTATION: f32 = 0.5;

    /// Flash overlay peak opacity
    pub const HIT_FLASH_ALPHA: f32 = 0.26;
    pub const NEAR_FLASH_ALPHA: f32 = 0.22;

    /// HUD score width (zero padded)
    pub const SCORE_DIGITS: usize = 5;

    /// Font stack shared by the watermark and HUD
    pub const FONT_STACK: &str =
        "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Inter, system-ui, sans-serif";
}

/// Zero-pad a score for the HUD ("00045")
#[inline]
pub fn format_score(score: u64) -> String {
    format!("{:0width$}", score, width = consts::SCORE_DIGITS)
}
