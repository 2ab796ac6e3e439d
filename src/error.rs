//! Error types

use thiserror::Error;

/// Everything that can stop the game from mounting or configuring itself.
///
/// None of these reach the page: the entry point logs them and the game
/// stays inert.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid tuning: {0}")]
    Tuning(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Js(format!("{:?}", value))
    }
}
