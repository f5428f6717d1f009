//! Database connection management and SeaORM-backed repositories.

mod connections;
pub mod entity;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_repo::{
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
