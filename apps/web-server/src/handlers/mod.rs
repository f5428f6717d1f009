//! HTTP route handlers.

pub mod health;
pub mod posts;

use actix_web::{HttpResponse, http::header, web};

use quill_core::views::View;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
///
/// Fixed paths go first: `/new/` and `/group/{slug}/` must win over the
/// catch-all `/{username}/` routes at the root.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/", web::get().to(posts::index))
        .route("/new/", web::get().to(posts::new_post_form))
        .route("/new/", web::post().to(posts::new_post_submit))
        .route("/group/{slug}/", web::get().to(posts::group_posts))
        .route(
            "/{username}/{post_id}/edit/",
            web::get().to(posts::post_edit_form),
        )
        .route(
            "/{username}/{post_id}/edit/",
            web::post().to(posts::post_edit_submit),
        )
        .route("/{username}/{post_id}/", web::get().to(posts::post_view))
        .route("/{username}/", web::get().to(posts::profile));
}

/// Turn a view outcome into an HTTP response: rendered pages become 200
/// bodies, redirects become 302s.
pub(crate) fn respond(state: &AppState, view: View) -> AppResult<HttpResponse> {
    match view {
        View::Render { template, context } => {
            let body = state
                .renderer
                .render(template, &context)
                .map_err(|e| AppError::Internal(e.to_string()))?;

            Ok(HttpResponse::Ok()
                .content_type(state.renderer.content_type())
                .body(body))
        }
        View::Redirect(location) => Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .finish()),
    }
}
