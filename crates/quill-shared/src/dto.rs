//! Data Transfer Objects - request payloads for the web layer.

use serde::{Deserialize, Serialize};

/// An HTML post form submission. `group` arrives as a string because the
/// blank select option submits an empty value; validation in the domain
/// layer decides what it means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
}

/// Listing query parameters. `page` stays a raw string so sloppy values
/// fall through to the lenient page policy instead of a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}
