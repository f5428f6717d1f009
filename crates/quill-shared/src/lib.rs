//! # Quill Shared
//!
//! Wire-facing types shared between the web layer and whatever front end
//! consumes the rendered contexts.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
