//! Handlers for the post, group, and profile pages.
//!
//! Each handler is a thin adapter: extract the path, query, form, and
//! caller identity, hand them to the view function, and turn the outcome
//! into a response.

use actix_web::{HttpResponse, web};

use quill_core::forms::PostInput;
use quill_core::pagination::PageRequest;
use quill_core::views;
use quill_shared::dto::{PageQuery, PostForm};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::respond;

fn page_request(state: &AppState, query: &PageQuery) -> PageRequest {
    PageRequest::new(query.page.as_deref(), state.page_size)
}

fn post_input(form: PostForm) -> PostInput {
    PostInput {
        text: form.text,
        group: form.group,
    }
}

/// GET `/`
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(&state, &query);
    let view = views::index(state.posts.as_ref(), page).await?;
    respond(&state, view)
}

/// GET `/group/{slug}/`
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let page = page_request(&state, &query);
    let view = views::group_posts(state.groups.as_ref(), state.posts.as_ref(), &slug, page).await?;
    respond(&state, view)
}

/// GET `/{username}/`
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let page = page_request(&state, &query);
    let caller = identity.caller();
    let view = views::profile(
        state.users.as_ref(),
        state.posts.as_ref(),
        &username,
        page,
        &caller,
    )
    .await?;
    respond(&state, view)
}

/// GET `/{username}/{post_id}/`
pub async fn post_view(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let caller = identity.caller();
    let view = views::post_view(state.posts.as_ref(), &username, post_id, &caller).await?;
    respond(&state, view)
}

/// GET `/new/`
pub async fn new_post_form(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let caller = identity.caller();
    let view = views::new_post(state.groups.as_ref(), state.posts.as_ref(), &caller, None).await?;
    respond(&state, view)
}

/// POST `/new/`
pub async fn new_post_submit(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let caller = identity.caller();
    let view = views::new_post(
        state.groups.as_ref(),
        state.posts.as_ref(),
        &caller,
        Some(post_input(form.into_inner())),
    )
    .await?;
    respond(&state, view)
}

/// GET `/{username}/{post_id}/edit/`
pub async fn post_edit_form(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let caller = identity.caller();
    let view = views::post_edit(
        state.groups.as_ref(),
        state.posts.as_ref(),
        &caller,
        &username,
        post_id,
        None,
    )
    .await?;
    respond(&state, view)
}

/// POST `/{username}/{post_id}/edit/`
pub async fn post_edit_submit(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
    identity: OptionalIdentity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let caller = identity.caller();
    let view = views::post_edit(
        state.groups.as_ref(),
        state.posts.as_ref(),
        &caller,
        &username,
        post_id,
        Some(post_input(form.into_inner())),
    )
    .await?;
    respond(&state, view)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, cookie::Cookie, http::StatusCode, test, web};
    use serde_json::Value;

    use quill_core::domain::User;
    use quill_core::pagination::PageRequest;
    use quill_core::ports::{PostFilter, PostRepository, SessionService};
    use quill_infra::{JwtConfig, JwtSessionService};
    use quill_shared::dto::PostForm;

    use crate::state::{AppState, MemoryStore};

    fn test_state() -> (AppState, Arc<MemoryStore>) {
        let store = MemoryStore::new();
        let sessions: Arc<dyn SessionService> = Arc::new(JwtSessionService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test".to_string(),
        }));
        let state = AppState::with_store(store.clone(), sessions, 10);
        (state, store)
    }

    fn session_cookie(state: &AppState, user: &User) -> Cookie<'static> {
        let token = state.sessions.issue(user).unwrap();
        Cookie::new("session", token)
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(crate::handlers::configure_routes),
            )
            .await
        };
    }

    async fn rendered(resp: actix_web::dev::ServiceResponse) -> Value {
        assert_eq!(resp.status(), StatusCode::OK);
        test::read_body_json(resp).await
    }

    fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
        resp.headers()
            .get("location")
            .expect("missing Location header")
            .to_str()
            .unwrap()
    }

    #[actix_web::test]
    async fn create_and_browse_a_post() {
        let (state, store) = test_state();
        let alice = store.add_user("alice").await;
        store.add_group("News", "news", "All the news").await;
        let app = test_app!(state);

        // Create through the form.
        let req = test::TestRequest::post()
            .uri("/new/")
            .cookie(session_cookie(&state, &alice))
            .set_form(PostForm {
                text: "hello world".to_string(),
                group: Some("1".to_string()),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/");

        // It shows up on the index.
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let body = rendered(resp).await;
        assert_eq!(body["template"], "index.html");
        assert_eq!(body["context"]["page"]["object_list"][0]["text"], "hello world");

        // And on the group page.
        let req = test::TestRequest::get().uri("/group/news/").to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["template"], "group.html");
        assert_eq!(body["context"]["group"]["slug"], "news");
        assert_eq!(body["context"]["paginator"]["count"], 1);

        // The detail page renders under the author's username.
        let post_id = body["context"]["page"]["object_list"][0]["id"].as_i64().unwrap();
        let req = test::TestRequest::get()
            .uri(&format!("/alice/{post_id}/"))
            .to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["template"], "post.html");
        assert_eq!(body["context"]["post_count"], 1);

        // A wrong username in the path redirects to the canonical URL.
        let req = test::TestRequest::get()
            .uri(&format!("/bob/{post_id}/"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/alice/{post_id}/"));
    }

    #[actix_web::test]
    async fn anonymous_caller_is_sent_to_login() {
        let (state, _store) = test_state();
        let app = test_app!(state);

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/new/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/auth/login/?next=/new/");
    }

    #[actix_web::test]
    async fn empty_text_rerenders_the_form_and_creates_nothing() {
        let (state, store) = test_state();
        let alice = store.add_user("alice").await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/new/")
            .cookie(session_cookie(&state, &alice))
            .set_form(PostForm {
                text: "   ".to_string(),
                group: None,
            })
            .to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["template"], "new.html");
        assert_eq!(
            body["context"]["form"]["errors"]["text"],
            "This field is required."
        );

        let page = store
            .page(PostFilter::All, PageRequest::first(10))
            .await
            .unwrap();
        assert_eq!(page.count, 0);
    }

    #[actix_web::test]
    async fn only_the_author_can_edit() {
        let (state, store) = test_state();
        let alice = store.add_user("alice").await;
        let bob = store.add_user("bob").await;
        let app = test_app!(state);

        let post = store
            .create(quill_core::ports::NewPost {
                author_id: alice.id,
                text: "original".to_string(),
                group_id: None,
            })
            .await
            .unwrap();

        // Bob is bounced to the post view without saving anything.
        let req = test::TestRequest::post()
            .uri(&format!("/alice/{}/edit/", post.id))
            .cookie(session_cookie(&state, &bob))
            .set_form(PostForm {
                text: "hijacked".to_string(),
                group: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/alice/{}/", post.id));

        let unchanged = store.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(unchanged.text, "original");

        // Alice edits the text; the publication date stays put.
        let req = test::TestRequest::post()
            .uri(&format!("/alice/{}/edit/", post.id))
            .cookie(session_cookie(&state, &alice))
            .set_form(PostForm {
                text: "revised".to_string(),
                group: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/alice/{}/", post.id));

        let edited = store.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(edited.text, "revised");
        assert_eq!(edited.pub_date, post.pub_date);
    }

    #[actix_web::test]
    async fn edit_form_is_prefilled() {
        let (state, store) = test_state();
        let alice = store.add_user("alice").await;
        store.add_group("News", "news", "All the news").await;
        let app = test_app!(state);

        let post = store
            .create(quill_core::ports::NewPost {
                author_id: alice.id,
                text: "draft".to_string(),
                group_id: Some(1),
            })
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/alice/{}/edit/", post.id))
            .cookie(session_cookie(&state, &alice))
            .to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["template"], "new.html");
        assert_eq!(body["context"]["form"]["text"], "draft");
        assert_eq!(body["context"]["form"]["group"], "1");
    }

    #[actix_web::test]
    async fn pagination_clamps_and_forgives() {
        let (state, store) = test_state();
        let alice = store.add_user("alice").await;
        let app = test_app!(state);

        for i in 0..13 {
            store
                .create(quill_core::ports::NewPost {
                    author_id: alice.id,
                    text: format!("post {i}"),
                    group_id: None,
                })
                .await
                .unwrap();
        }

        let body =
            rendered(test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await)
                .await;
        assert_eq!(body["context"]["page"]["number"], 1);
        assert_eq!(
            body["context"]["page"]["object_list"].as_array().unwrap().len(),
            10
        );
        assert_eq!(body["context"]["paginator"]["num_pages"], 2);

        // Past the end clamps to the last page.
        let req = test::TestRequest::get().uri("/?page=5").to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["context"]["page"]["number"], 2);
        assert_eq!(
            body["context"]["page"]["object_list"].as_array().unwrap().len(),
            3
        );

        // Garbage falls back to the first page.
        let req = test::TestRequest::get().uri("/?page=abc").to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["context"]["page"]["number"], 1);
    }

    #[actix_web::test]
    async fn unknown_group_and_user_are_not_found() {
        let (state, _store) = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/group/nope/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/nobody/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn profile_reflects_the_caller_identity() {
        let (state, store) = test_state();
        let alice = store.add_user("alice").await;
        let app = test_app!(state);

        // Anonymous.
        let req = test::TestRequest::get().uri("/alice/").to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["template"], "profile.html");
        assert_eq!(body["context"]["user"]["is_authenticated"], false);
        assert_eq!(body["context"]["user_profile"]["username"], "alice");

        // With a session cookie.
        let req = test::TestRequest::get()
            .uri("/alice/")
            .cookie(session_cookie(&state, &alice))
            .to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["context"]["user"]["is_authenticated"], true);
        assert_eq!(body["context"]["user"]["username"], "alice");
    }

    #[actix_web::test]
    async fn bearer_header_also_authenticates() {
        let (state, store) = test_state();
        let alice = store.add_user("alice").await;
        let app = test_app!(state);

        let token = state.sessions.issue(&alice).unwrap();
        let req = test::TestRequest::get()
            .uri("/new/")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body = rendered(test::call_service(&app, req).await).await;
        assert_eq!(body["template"], "new.html");
    }

    #[actix_web::test]
    async fn a_garbage_session_token_is_treated_as_anonymous() {
        let (state, _store) = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/new/")
            .cookie(Cookie::new("session", "not-a-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/auth/login/?next=/new/");
    }
}
