//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - The hosting carousel (DOM on web, no-op elsewhere)

pub mod carousel;
pub mod storage;

pub use carousel::{Carousel, NoCarousel, PinLog};
pub use storage::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use carousel::DomCarousel;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
