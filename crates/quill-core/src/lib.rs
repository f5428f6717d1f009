//! # Quill Core
//!
//! The domain layer of Quill. Pure business logic - entities, ports,
//! pagination, form validation, and the request views - with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod views;

pub use error::DomainError;
