//! Link to the hero carousel hosting the game slide

use crate::sim::InputSource;

/// Receives "the player is using the game" signals.
///
/// The carousel should stop auto-rotating and pin its indicator on the
/// game slide.
pub trait Carousel {
    fn pin_game_slide(&mut self, source: InputSource);
}

/// For pages without a carousel
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCarousel;

impl Carousel for NoCarousel {
    fn pin_game_slide(&mut self, _source: InputSource) {}
}

/// Counts pin requests (headless runs and tests)
#[derive(Debug, Default, Clone)]
pub struct PinLog {
    pub pins: Vec<InputSource>,
}

impl Carousel for PinLog {
    fn pin_game_slide(&mut self, source: InputSource) {
        self.pins.push(source);
    }
}

/// The page's hero carousel, driven through the DOM
#[cfg(target_arch = "wasm32")]
pub struct DomCarousel {
    slide: Option<web_sys::Element>,
    dot: Option<web_sys::Element>,
}

#[cfg(target_arch = "wasm32")]
impl DomCarousel {
    /// Interaction event dispatched on the game slide
    pub const EVENT: &'static str = "rocketgame:interact";

    /// Find the game slide and its indicator dot. Either may be missing.
    pub fn find(document: &web_sys::Document) -> Self {
        use wasm_bindgen::JsCast;

        let slide = document.query_selector(".slide.game-slide").ok().flatten();

        let index = document.query_selector_all(".hero .slide").ok().and_then(|slides| {
            (0..slides.length()).find(|&i| {
                slides
                    .item(i)
                    .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
                    .is_some_and(|el| el.class_list().contains("game-slide"))
            })
        });
        let dot = index.and_then(|i| {
            document
                .query_selector_all(".slider-dots .dot")
                .ok()
                .and_then(|dots| dots.item(i))
                .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
        });

        if slide.is_none() {
            log::info!("No game slide found, game runs unpaused");
        }
        Self { slide, dot }
    }

    /// Whether the hosting slide is the one on screen
    pub fn slide_active(&self) -> bool {
        self.slide
            .as_ref()
            .is_none_or(|s| s.class_list().contains("active"))
    }
}

#[cfg(target_arch = "wasm32")]
impl Carousel for DomCarousel {
    fn pin_game_slide(&mut self, source: InputSource) {
        // Keys reach the whole window; only count them while the game is showing
        if source == InputSource::Keyboard && !self.slide_active() {
            return;
        }
        if let Some(dot) = &self.dot {
            let _ = dot.class_list().add_1("paused");
        }
        if let Some(slide) = &self.slide {
            let init = web_sys::CustomEventInit::new();
            init.set_bubbles(true);
            if let Ok(event) = web_sys::CustomEvent::new_with_event_init_dict(Self::EVENT, &init) {
                let _ = slide.dispatch_event(&event);
            }
        }
    }
}
