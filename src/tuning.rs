//! Data-driven game balance
//!
//! Every field has a default, so a page can override only what it needs
//! through a JSON object (see [`Tuning::from_json`]).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Game balance and behaviour knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Rocket ===
    /// Fixed progress of the rocket along the guide line
    pub rocket_pos: f32,
    /// Offset the rocket starts (and restarts) at
    pub rocket_start_offset: f32,
    /// Highest offset the rocket may reach above the line
    pub max_offset: f32,
    /// Offset change per up/down nudge
    pub offset_step: f32,
    /// Base tilt impulse per nudge
    pub tilt_step: f32,
    /// Multiplicative tilt decay per running frame
    pub tilt_decay: f32,

    // === Obstacles ===
    /// Milliseconds between spawns
    pub spawn_interval_ms: f32,
    /// Guide-line fraction travelled per second
    pub obstacle_speed: f32,
    /// Obstacles behind this progress are culled
    pub cull_pos: f32,
    /// Spawn window starts this far ahead of the rocket...
    pub spawn_lead: f32,
    /// ...but never later than this
    pub spawn_min_cap: f32,
    /// Far end of the spawn window
    pub spawn_far: f32,
    /// Offset band above the guide line: base + U[0, extra)
    pub spawn_offset_base: f32,
    pub spawn_offset_extra: f32,
    /// Radius band as a fraction of the minor dimension: base + U[0, extra)
    pub size_base: f32,
    pub size_extra: f32,
    /// Cumulative kind weights: rock below the first, ring below the second
    pub rock_weight: f32,
    pub ring_weight: f32,

    // === Collisions ===
    /// Rocket hit radius as a fraction of the minor dimension
    pub hit_radius: f32,
    /// Near-miss ring as a multiple of the hit radius
    pub near_factor: f32,
    /// Flash durations (ms)
    pub hit_flash_ms: f32,
    pub near_flash_ms: f32,

    // === Pace ===
    /// Score points per second
    pub score_rate: f32,
    /// Background grid scroll (CSS pixels per second)
    pub grid_speed: f32,
    /// Milliseconds per full guide-dash loop
    pub traverse_ms: f32,

    // === Page ===
    /// LocalStorage key for the high score
    pub storage_key: String,
    /// Corner watermark text
    pub watermark: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rocket_pos: 0.35,
            rocket_start_offset: 0.10,
            max_offset: 0.16,
            offset_step: 0.03,
            tilt_step: 0.22,
            tilt_decay: 0.92,

            spawn_interval_ms: 1400.0,
            obstacle_speed: 0.22,
            cull_pos: -0.2,
            spawn_lead: 0.18,
            spawn_min_cap: 0.95,
            spawn_far: 1.1,
            spawn_offset_base: 0.03,
            spawn_offset_extra: 0.09,
            size_base: 0.018,
            size_extra: 0.022,
            rock_weight: 0.4,
            ring_weight: 0.35,

            hit_radius: 0.028,
            near_factor: 1.8,
            hit_flash_ms: 260.0,
            near_flash_ms: 120.0,

            score_rate: 18.0,
            grid_speed: 80.0,
            traverse_ms: 7000.0,

            storage_key: "rocketHighScore".to_string(),
            watermark: "MATHRICKS STUDIO".to_string(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).map_err(Error::Tuning)?;
        Ok(tuning.sanitized())
    }

    /// Parse an optional override, falling back to defaults on failure
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Clamp values that would break invariants
    fn sanitized(mut self) -> Self {
        self.max_offset = self.max_offset.max(0.0);
        self.rocket_start_offset = self.rocket_start_offset.clamp(0.0, self.max_offset);
        self.tilt_decay = self.tilt_decay.clamp(0.0, 1.0);
        self.spawn_interval_ms = self.spawn_interval_ms.max(1.0);
        self.traverse_ms = self.traverse_ms.max(1.0);
        self.ring_weight = self.ring_weight.max(0.0);
        self
    }

    /// Tilt impulse for left/right nudges
    #[inline]
    pub fn side_tilt(&self) -> f32 {
        self.tilt_step * 0.5
    }

    /// Tilt impulse for up/down nudges
    #[inline]
    pub fn lift_tilt(&self) -> f32 {
        self.tilt_step * 1.4
    }
}
