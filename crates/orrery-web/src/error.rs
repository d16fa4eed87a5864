use std::fmt;

use wasm_bindgen::JsValue;

/// Failures while wiring the game into the page.
#[derive(Debug)]
pub enum HostError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// A required element id is missing from the page.
    MissingElement(&'static str),
    /// An element exists but is not of the expected type.
    WrongElementType {
        id: &'static str,
        expected: &'static str,
    },
    /// The canvas has no 2D context.
    NoContext2d,
    /// A browser API call threw.
    Js(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NoWindow => write!(f, "no global window"),
            HostError::NoDocument => write!(f, "window has no document"),
            HostError::MissingElement(id) => write!(f, "missing element #{id}"),
            HostError::WrongElementType { id, expected } => {
                write!(f, "element #{id} is not a {expected}")
            }
            HostError::NoContext2d => write!(f, "canvas has no 2d context"),
            HostError::Js(msg) => write!(f, "browser call failed: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        HostError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
