//! Presentation adapters.

mod json;

pub use json::JsonRenderer;
