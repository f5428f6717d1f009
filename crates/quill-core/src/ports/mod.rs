//! Ports - trait definitions for external collaborators.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod render;
mod repository;

pub use auth::{AuthError, SessionClaims, SessionService};
pub use render::{RenderError, Renderer};
pub use repository::{
    GroupRepository, NewPost, PostFilter, PostRepository, UserRepository,
};
