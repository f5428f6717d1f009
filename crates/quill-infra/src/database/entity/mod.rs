//! SeaORM entities mirroring the relational schema.

pub mod group;
pub mod post;
pub mod user;
