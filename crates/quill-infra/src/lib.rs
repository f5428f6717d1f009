//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM/Postgres repositories, JWT session tokens, and the default
//! renderer.

pub mod auth;
pub mod database;
pub mod render;

pub use auth::{JwtConfig, JwtSessionService};
pub use database::{
    DatabaseConfig, DatabaseConnections, PostgresGroupRepository, PostgresPostRepository,
    PostgresUserRepository,
};
pub use render::JsonRenderer;
