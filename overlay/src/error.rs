//! Error taxonomy for the overlay engine.
//!
//! Only initialization can fail. Once the payload is loaded, out-of-range
//! frames are clamped and missing layouts are skipped; neither surfaces here.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// A fetch completed with a non-success HTTP status.
    #[error("failed to load {resource}: {status}")]
    LoadFailure { resource: String, status: u16 },

    /// A fetch could not be completed at all.
    #[error("failed to fetch {resource}: {message}")]
    Network { resource: String, message: String },

    /// The annotation payload is not valid JSON for the expected shape.
    #[error("invalid annotation payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// A source or display size that is not strictly positive.
    #[error("invalid geometry {width}x{height}")]
    InvalidGeometry { width: f64, height: f64 },

    /// A required DOM element is absent or of the wrong type.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// A browser API call failed.
    #[error("browser error: {0}")]
    Js(String),
}

impl From<JsValue> for OverlayError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<OverlayError> for JsValue {
    fn from(err: OverlayError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
