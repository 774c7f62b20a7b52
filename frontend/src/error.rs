use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("required element `{0}` not found")]
    MissingElement(&'static str),
    #[error("already initialized")]
    AlreadyInitialized,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for InitError {
    fn from(value: JsValue) -> Self {
        InitError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type InitResult<T> = Result<T, InitError>;
