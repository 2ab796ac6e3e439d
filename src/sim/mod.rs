//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through the `dt` passed to `advance`
//! - Randomness only enters through a `RandomSource`
//! - Input only enters through the `InputQueue`
//! - No rendering or platform dependencies

pub mod collision;
pub mod guide;
pub mod input;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Contact, ContactRadii, classify, evaluate};
pub use guide::{GuideLine, Viewport};
pub use input::{Direction, InputEvent, InputOutcome, InputQueue, InputSource, Key, nudge};
pub use rng::{RandomSource, SequenceSource};
pub use state::{Flash, FlashKind, GameEvent, GameState, Obstacle, ObstacleKind, Rocket};
pub use tick::{advance, spawn_obstacle, tick_flash};
