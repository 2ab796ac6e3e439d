//! 2D canvas rendering module
//!
//! `scene` paints a frame from the game state onto any `Surface`; on wasm
//! the canvas context itself is a `Surface`.

pub mod scene;
pub mod surface;

pub use scene::{draw, flash_alpha, hud_text};
pub use surface::{Command, Recorder, Surface};
