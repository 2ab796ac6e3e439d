//! Rocket vs obstacle collision classification
//!
//! Each frame every live obstacle is measured against the rocket in screen
//! space and lands in one of three buckets: nothing, near miss, or hit.

use glam::Vec2;

use super::guide::GuideLine;
use super::state::{Flash, FlashKind, GameEvent, GameState, Obstacle};
use crate::tuning::Tuning;

/// Classification of one rocket/obstacle pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    Near,
    Hit,
}

/// Rocket radii for the current viewport (pixels)
#[derive(Debug, Clone, Copy)]
pub struct ContactRadii {
    pub hit: f32,
    pub near: f32,
}

impl ContactRadii {
    pub fn new(guide: &GuideLine, tuning: &Tuning) -> Self {
        let hit = guide.min_dim * tuning.hit_radius;
        Self {
            hit,
            near: hit * tuning.near_factor,
        }
    }
}

/// Classify a single obstacle against the rocket's screen position
pub fn classify(rocket: Vec2, obstacle: &Obstacle, guide: &GuideLine, radii: ContactRadii) -> Contact {
    let center = guide.point_at(obstacle.pos, obstacle.offset);
    let dist = center.distance(rocket);

    if dist < obstacle.size + radii.hit {
        Contact::Hit
    } else if dist < obstacle.size + radii.near {
        Contact::Near
    } else {
        Contact::None
    }
}

/// Check the rocket against all obstacles and apply the outcome.
///
/// Walks the list from newest to oldest without stopping at the first hit:
/// - a hit removes the obstacle, starts the hit flash, ends the run and
///   raises the high score if the floored score beats it
/// - a near miss only flashes when no flash is already running, so a hit
///   earlier in the walk swallows later near misses
///
/// Does nothing once the run is over or before the canvas has a size.
pub fn evaluate(state: &mut GameState, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.game_over || !state.viewport.is_drawable() || state.obstacles.is_empty() {
        return events;
    }

    let guide = state.guide();
    let rocket = guide.point_at(state.rocket.pos, state.rocket.offset);
    if !rocket.is_finite() {
        return events;
    }
    let radii = ContactRadii::new(&guide, tuning);

    for i in (0..state.obstacles.len()).rev() {
        match classify(rocket, &state.obstacles[i], &guide, radii) {
            Contact::Hit => {
                state.flash = Some(Flash::new(FlashKind::Hit, tuning.hit_flash_ms));
                state.obstacles.remove(i);
                state.game_over = true;
                events.push(GameEvent::Hit);

                let final_score = state.display_score();
                if final_score > state.high_score {
                    state.high_score = final_score;
                    events.push(GameEvent::NewHighScore(final_score));
                }
            }
            Contact::Near if !state.flash_active() => {
                state.flash = Some(Flash::new(FlashKind::Near, tuning.near_flash_ms));
                events.push(GameEvent::NearMiss);
            }
            _ => {}
        }
    }

    events
}
