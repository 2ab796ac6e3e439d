//! Frame driver
//!
//! Owns the one `GameState` and everything around it: tuning, randomness,
//! queued input, the persisted high score and the carousel link. The host
//! calls [`Game::tick`] once per animation frame and then [`Game::render`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::HighScore;
use crate::platform::{Carousel, KeyValueStore};
use crate::renderer::{self, Surface};
use crate::sim::{
    GameEvent, GameState, InputEvent, Key, RandomSource, Viewport, advance, evaluate, tick_flash,
};
use crate::theme::Palette;
use crate::tuning::Tuning;

/// A mounted mini-game
pub struct Game<K: KeyValueStore, C: Carousel> {
    state: GameState,
    tuning: Tuning,
    rng: Box<dyn RandomSource>,
    input: crate::sim::InputQueue,
    high_score: HighScore,
    store: K,
    carousel: C,
}

impl<K: KeyValueStore, C: Carousel> Game<K, C> {
    /// Create a game with a seeded PCG generator
    pub fn new(tuning: Tuning, store: K, carousel: C, seed: u64) -> Self {
        Self::with_rng(tuning, store, carousel, Box::new(Pcg32::seed_from_u64(seed)))
    }

    /// Create a game with a caller-supplied random source
    pub fn with_rng(tuning: Tuning, store: K, carousel: C, rng: Box<dyn RandomSource>) -> Self {
        let high_score = HighScore::new(&tuning.storage_key);
        let state = GameState::new(&tuning, high_score.load(&store));
        Self {
            state,
            tuning,
            rng,
            input: crate::sim::InputQueue::new(),
            high_score,
            store,
            carousel,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn carousel(&self) -> &C {
        &self.carousel
    }

    /// Canvas resized (CSS pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.set_viewport(Viewport::new(width, height));
    }

    /// Queue an input for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Whether a key press should be swallowed (no page scroll)
    pub fn handles_key(&self, key: Key) -> bool {
        match key {
            Key::Up | Key::Down => true,
            Key::Confirm => self.state.game_over,
        }
    }

    /// Run one frame: queued input, simulation, flash, collisions.
    ///
    /// `dt` is seconds since the previous frame; `slide_active` is whether
    /// the hosting slide is visible.
    pub fn tick(&mut self, dt: f32, slide_active: bool) -> Vec<GameEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        for (source, outcome) in self.input.drain(&mut self.state, &self.tuning) {
            if outcome.interacted {
                self.carousel.pin_game_slide(source);
            }
        }

        advance(&mut self.state, &self.tuning, dt, slide_active, self.rng.as_mut());
        tick_flash(&mut self.state, dt * 1000.0);

        let events = evaluate(&mut self.state, &self.tuning);
        for event in &events {
            match *event {
                GameEvent::Hit => log::info!("Game over with score {}", self.state.display_score()),
                GameEvent::NearMiss => log::debug!("Near miss"),
                GameEvent::NewHighScore(score) => {
                    self.high_score.persist(score, &mut self.store);
                }
            }
        }
        events
    }

    /// Paint the current frame
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, palette: &Palette) {
        renderer::draw(surface, &self.state, &self.tuning, palette);
    }
}
