// error.rs - Crate error type
//
// Nothing in the engine core is fallible. Errors only come from
// configuration handed over by the page and from the browser environment,
// and the DOM layer degrades on all of them instead of failing the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color `{0}`, expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("intersection observer unavailable")]
    ObserverUnavailable,

    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
