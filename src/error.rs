//! Error types.
//!
//! None of these reach the page as thrown exceptions. Host errors mean the
//! effect stays inert, config errors mean the defaults are used instead.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while binding to the browser.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    MissingCanvas(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("host call failed: {0}")]
    Js(String),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{:?}", value))
    }
}

/// Configuration values the engine cannot run with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("radiusMin ({min}) is larger than radiusMax ({max})")]
    RadiusRange { min: f32, max: f32 },
    #[error("linkCount {requested} exceeds the {max} distinct pairs of {count} particles")]
    TooManyLinks { requested: u32, count: u32, max: u64 },
    #[error("{0} must be positive, got {1}")]
    NonPositive(&'static str, f32),
    #[error("edgePadding must not be negative, got {0}")]
    NegativePadding(f32),
    #[error("`{0}` is not a CSS color")]
    Color(String),
    #[error("invalid options: {0}")]
    Parse(String),
}
