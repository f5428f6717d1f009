//! Route builders, shared by the views for canonical and login redirects.

/// Login flow of the external auth system.
pub const LOGIN: &str = "/auth/login/";

pub fn index() -> String {
    "/".to_string()
}

pub fn group(slug: &str) -> String {
    format!("/group/{slug}/")
}

pub fn profile(username: &str) -> String {
    format!("/{username}/")
}

/// The one canonical path for a post, built from its true author.
pub fn post_detail(username: &str, post_id: i64) -> String {
    format!("/{username}/{post_id}/")
}

pub fn new_post() -> String {
    "/new/".to_string()
}

pub fn post_edit(username: &str, post_id: i64) -> String {
    format!("/{username}/{post_id}/edit/")
}

/// Login redirect carrying the path to return to afterwards.
pub fn login_with_next(next: &str) -> String {
    format!("{LOGIN}?next={next}")
}
