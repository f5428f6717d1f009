//! The request-handling core: views composing repository queries,
//! pagination, authorization checks, and form validation into render or
//! redirect outcomes. The caller is threaded in explicitly; turning a
//! [`View`] into an HTTP response is the web layer's job.

mod posts;
pub mod urls;

pub use posts::{group_posts, index, new_post, post_edit, post_view, profile};

use serde_json::Value;

use crate::error::DomainError;

/// Outcome of a view: render a named template with a context mapping, or
/// redirect the caller elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Render {
        template: &'static str,
        context: Value,
    },
    Redirect(String),
}

impl View {
    pub fn render(template: &'static str, context: Value) -> Self {
        View::Render { template, context }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        View::Redirect(location.into())
    }
}

pub type ViewResult = Result<View, DomainError>;
