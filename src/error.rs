use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no {0} element")]
    MissingElement(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid configuration block: {0}")]
    Config(#[from] serde_json::Error),
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },
    #[error("backdrop.orb_count must be at most {max}, got {count}")]
    TooManyOrbs { count: usize, max: usize },
}

impl From<JsValue> for EnhanceError {
    fn from(value: JsValue) -> Self {
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|err| String::from(err.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{value:?}"));
        EnhanceError::Js(message)
    }
}
