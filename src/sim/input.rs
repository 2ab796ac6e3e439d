//! Input adapter
//!
//! Browser callbacks never touch the game directly. They push
//! [`InputEvent`]s into an [`InputQueue`], and the frame driver drains the
//! queue in arrival order before each simulation step.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::GameState;
use crate::tuning::Tuning;

/// On-screen button / nudge directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Parse a button's `data-dir` attribute
    pub fn from_attr(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    /// Space / Enter: restart after game over
    Confirm,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " | "Spacebar" | "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }
}

/// Where an interaction came from (the carousel treats keys differently)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Button,
    Keyboard,
    Pointer,
}

/// A single input, already translated from the DOM
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// On-screen control button
    Nudge(Direction),
    Key(Key),
    /// Canvas-relative CSS pixels
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Pointer released or cancelled
    PointerUp,
}

impl InputEvent {
    pub fn source(&self) -> InputSource {
        match self {
            InputEvent::Nudge(_) => InputSource::Button,
            InputEvent::Key(_) => InputSource::Keyboard,
            InputEvent::PointerDown { .. }
            | InputEvent::PointerMove { .. }
            | InputEvent::PointerUp => InputSource::Pointer,
        }
    }
}

/// What applying an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    /// The run was restarted
    pub restarted: bool,
    /// The carousel should be told the player is using the game
    pub interacted: bool,
}

/// Pending inputs plus drag tracking
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
    dragging: bool,
    /// Last pointer position seen during a drag
    baseline: Option<Vec2>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply every pending event in order, returning one outcome per event
    pub fn drain(&mut self, state: &mut GameState, tuning: &Tuning) -> Vec<(InputSource, InputOutcome)> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some(event) = self.pending.pop_front() {
            let outcome = self.apply(event, state, tuning);
            outcomes.push((event.source(), outcome));
        }
        outcomes
    }

    /// Apply a single event immediately
    pub fn apply(&mut self, event: InputEvent, state: &mut GameState, tuning: &Tuning) -> InputOutcome {
        match event {
            InputEvent::Nudge(direction) => {
                if !state.game_over {
                    nudge(state, tuning, direction);
                }
                InputOutcome {
                    restarted: false,
                    interacted: true,
                }
            }
            InputEvent::Key(Key::Up) => self.apply_key_nudge(state, tuning, Direction::Up),
            InputEvent::Key(Key::Down) => self.apply_key_nudge(state, tuning, Direction::Down),
            InputEvent::Key(Key::Confirm) => {
                if state.game_over {
                    self.restart(state);
                    InputOutcome {
                        restarted: true,
                        interacted: true,
                    }
                } else {
                    InputOutcome::default()
                }
            }
            InputEvent::PointerDown { x, y } => {
                if state.game_over {
                    self.restart(state);
                    return InputOutcome {
                        restarted: true,
                        interacted: true,
                    };
                }
                // Baseline only; the rocket moves on the next move event
                self.dragging = true;
                self.baseline = Some(Vec2::new(x, y));
                InputOutcome {
                    restarted: false,
                    interacted: true,
                }
            }
            InputEvent::PointerMove { x, y } => {
                if self.dragging {
                    self.drag_to(state, tuning, Vec2::new(x, y));
                }
                InputOutcome::default()
            }
            InputEvent::PointerUp => {
                self.end_drag();
                InputOutcome::default()
            }
        }
    }

    fn apply_key_nudge(&mut self, state: &mut GameState, tuning: &Tuning, direction: Direction) -> InputOutcome {
        if !state.game_over {
            nudge(state, tuning, direction);
        }
        InputOutcome {
            restarted: false,
            interacted: true,
        }
    }

    fn drag_to(&mut self, state: &mut GameState, tuning: &Tuning, point: Vec2) {
        let Some(last) = self.baseline else {
            self.baseline = Some(point);
            return;
        };
        self.baseline = Some(point);

        if state.game_over || !state.viewport.is_drawable() {
            return;
        }

        let guide = state.guide();
        let delta_perp = guide.project_on_normal(point - last);
        let max_pixels = guide.offset_to_pixels(tuning.max_offset);
        let pixels = (guide.offset_to_pixels(state.rocket.offset) + delta_perp).clamp(0.0, max_pixels);
        state.rocket.offset = guide.pixels_to_offset(pixels).clamp(0.0, tuning.max_offset);
    }

    fn end_drag(&mut self) {
        self.dragging = false;
        self.baseline = None;
    }

    fn restart(&mut self, state: &mut GameState) {
        self.end_drag();
        state.reset();
        log::info!("Run restarted (high score {})", state.high_score);
    }
}

/// Discrete steering impulse
pub fn nudge(state: &mut GameState, tuning: &Tuning, direction: Direction) {
    let rocket = &mut state.rocket;
    match direction {
        Direction::Left => rocket.tilt -= tuning.side_tilt(),
        Direction::Right => rocket.tilt += tuning.side_tilt(),
        Direction::Up => {
            rocket.tilt -= tuning.lift_tilt();
            rocket.shift_offset(tuning.offset_step, tuning.max_offset);
        }
        Direction::Down => {
            rocket.tilt += tuning.lift_tilt();
            rocket.shift_offset(-tuning.offset_step, tuning.max_offset);
        }
    }
}
