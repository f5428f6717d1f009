//! The six post/group views.

use serde_json::json;

use crate::domain::Caller;
use crate::error::DomainError;
use crate::forms::{self, FormErrors, PostInput};
use crate::pagination::PageRequest;
use crate::ports::{GroupRepository, NewPost, PostFilter, PostRepository, UserRepository};

use super::{View, ViewResult, urls};

/// GET `/` - most recent posts across all groups, newest first.
pub async fn index(posts: &dyn PostRepository, page: PageRequest) -> ViewResult {
    let page = posts.page(PostFilter::All, page).await?;
    let paginator = page.paginator_context();

    Ok(View::render(
        "index.html",
        json!({ "page": page, "paginator": paginator }),
    ))
}

/// GET `/group/{slug}/` - one group's posts, same ordering and pagination.
pub async fn group_posts(
    groups: &dyn GroupRepository,
    posts: &dyn PostRepository,
    slug: &str,
    page: PageRequest,
) -> ViewResult {
    let group = groups
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| DomainError::not_found("group", slug))?;

    let page = posts.page(PostFilter::Group(group.id), page).await?;
    let paginator = page.paginator_context();

    Ok(View::render(
        "group.html",
        json!({ "group": group, "page": page, "paginator": paginator }),
    ))
}

/// GET `/{username}/` - a user's posts plus the profile user and the
/// current caller, so templates can decide whether to show edit links.
pub async fn profile(
    users: &dyn UserRepository,
    posts: &dyn PostRepository,
    username: &str,
    page: PageRequest,
    caller: &Caller,
) -> ViewResult {
    let user_profile = users
        .find_by_username(username)
        .await?
        .ok_or_else(|| DomainError::not_found("user", username))?;

    let page = posts.page(PostFilter::Author(user_profile.id), page).await?;
    let paginator = page.paginator_context();

    Ok(View::render(
        "profile.html",
        json!({
            "page": page,
            "paginator": paginator,
            "user_profile": user_profile,
            "user": caller.context(),
        }),
    ))
}

/// GET `/{username}/{post_id}/` - a single post.
///
/// A path whose username segment does not match the post's true author is
/// redirected to the canonical URL instead of rendered.
pub async fn post_view(
    posts: &dyn PostRepository,
    username: &str,
    post_id: i64,
    caller: &Caller,
) -> ViewResult {
    let post = posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("post", post_id))?;

    if post.author.username != username {
        return Ok(View::redirect(urls::post_detail(
            &post.author.username,
            post_id,
        )));
    }

    let post_count = posts.count_by_author(post.author.id).await?;
    let user_profile = post.author.clone();

    Ok(View::render(
        "post.html",
        json!({
            "post": post,
            "post_id": post_id,
            "post_count": post_count,
            "user_profile": user_profile,
            "user": caller.context(),
        }),
    ))
}

/// GET/POST `/new/` - create a post.
///
/// Anonymous callers are sent to the login flow with a return path. The
/// author is always the authenticated caller; the form never supplies it.
pub async fn new_post(
    groups: &dyn GroupRepository,
    posts: &dyn PostRepository,
    caller: &Caller,
    submission: Option<PostInput>,
) -> ViewResult {
    let Some(user) = caller.user() else {
        return Ok(View::redirect(urls::login_with_next(&urls::new_post())));
    };

    let group_choices = groups.list().await?;

    let Some(input) = submission else {
        let form = forms::context(&PostInput::default(), &FormErrors::default(), &group_choices);
        return Ok(View::render("new.html", json!({ "form": form })));
    };

    match forms::validate(&input, &group_choices) {
        Ok(valid) => {
            posts
                .create(NewPost {
                    author_id: user.id,
                    text: valid.text,
                    group_id: valid.group_id,
                })
                .await?;

            Ok(View::redirect(urls::index()))
        }
        Err(errors) => {
            let form = forms::context(&input, &errors, &group_choices);
            Ok(View::render("new.html", json!({ "form": form })))
        }
    }
}

/// GET/POST `/{username}/{post_id}/edit/` - edit a post.
///
/// Author-only: a non-author caller is silently redirected to the canonical
/// post view, never shown an error. Only text and group are writable.
pub async fn post_edit(
    groups: &dyn GroupRepository,
    posts: &dyn PostRepository,
    caller: &Caller,
    username: &str,
    post_id: i64,
    submission: Option<PostInput>,
) -> ViewResult {
    let Some(user) = caller.user() else {
        return Ok(View::redirect(urls::login_with_next(&urls::post_edit(
            username, post_id,
        ))));
    };

    let post = posts
        .find_by_id_and_author(post_id, username)
        .await?
        .ok_or_else(|| DomainError::not_found("post", post_id))?;

    if !post.is_authored_by(user) {
        return Ok(View::redirect(urls::post_detail(username, post_id)));
    }

    let group_choices = groups.list().await?;

    let Some(input) = submission else {
        let prefilled = PostInput::from_existing(&post.text, post.group.as_ref().map(|g| g.id));
        let form = forms::context(&prefilled, &FormErrors::default(), &group_choices);
        return Ok(View::render("new.html", json!({ "form": form, "post": post })));
    };

    match forms::validate(&input, &group_choices) {
        Ok(valid) => {
            posts
                .update_content(post.id, valid.text, valid.group_id)
                .await?;

            Ok(View::redirect(urls::post_detail(username, post_id)))
        }
        Err(errors) => {
            let form = forms::context(&input, &errors, &group_choices);
            Ok(View::render("new.html", json!({ "form": form, "post": post })))
        }
    }
}
