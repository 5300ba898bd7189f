//! Post listing, detail, and authoring.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use inkpress_core::can_modify;
use inkpress_core::validate::FieldErrors;
use inkpress_store::posts::{self, PostInput};
use inkpress_store::{comments, reactions};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentActor, MaybeActor};
use crate::forms::PostForm;
use crate::state::AppState;

const DEFAULT_IMAGE: &str = "placeholder";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "first_page")]
    pub page: i64,
    pub category: Option<String>,
}

fn first_page() -> i64 {
    1
}

/// Published posts, newest first, six per page, optionally filtered by
/// exact category name.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Value>> {
    let per_page = state.config.page_size;
    let page = posts::list_published(&state.pool, query.page, per_page, query.category.as_deref())
        .await?;
    let categories = posts::list_categories(&state.pool).await?;
    let total_pages = (page.total + per_page - 1) / per_page;

    Ok(Json(json!({
        "posts": page.posts,
        "total": page.total,
        "page": query.page.max(1),
        "total_pages": total_pages,
        "categories": categories,
        "current_category": query.category,
    })))
}

/// Published post by slug, with comments filtered for the viewer.
pub async fn detail(
    State(state): State<AppState>,
    MaybeActor(viewer): MaybeActor,
    Path(slug): Path<String>,
) -> ApiResult<Json<Value>> {
    let post = posts::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("post"))?;

    let visible = comments::visible_for_post(&state.pool, post.id, viewer.as_ref()).await?;
    let comment_count = comments::approved_count(&state.pool, post.id).await?;
    let categories = posts::categories_of(&state.pool, post.id).await?;
    let like_count = reactions::like_count(&state.pool, post.id).await?;
    let favorite_count = reactions::favorite_count(&state.pool, post.id).await?;

    let (liked_by_user, favorited_by_user) = match &viewer {
        Some(actor) => (
            reactions::is_liked(&state.pool, actor.id, post.id).await?,
            reactions::is_favorited(&state.pool, actor.id, post.id).await?,
        ),
        None => (false, false),
    };

    Ok(Json(json!({
        "post": post,
        "categories": categories,
        "comments": visible,
        "comment_count": comment_count,
        "like_count": like_count,
        "favorite_count": favorite_count,
        "liked_by_user": liked_by_user,
        "favorited_by_user": favorited_by_user,
    })))
}

fn to_input(form: &PostForm, status: inkpress_core::PostStatus) -> PostInput {
    PostInput {
        title: form.title.clone(),
        content: form.content.clone(),
        excerpt: form.excerpt.clone(),
        featured_image: form
            .featured_image
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        status,
        categories: form.categories.clone(),
    }
}

/// Reject category ids that do not name an existing category. Reported
/// as a field error so a bad submission reads like any other
/// validation failure.
async fn check_categories(state: &AppState, ids: &[i64]) -> ApiResult<()> {
    let known = posts::existing_category_ids(&state.pool, ids).await?;
    let mut errors = FieldErrors::new();
    for id in ids {
        if !known.contains(id) {
            errors.add_error(
                "categories",
                &format!("{id} is not a valid category"),
                "invalid_choice",
            );
        }
    }
    errors.into_result()?;
    Ok(())
}

pub async fn create(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(form): Json<PostForm>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let status = form.validate()?;
    check_categories(&state, &form.categories).await?;
    let post = posts::create(&state.pool, actor.id, &to_input(&form, status)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "post": post, "message": "Post created" })),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(slug): Path<String>,
    Json(form): Json<PostForm>,
) -> ApiResult<Json<Value>> {
    let status = form.validate()?;
    check_categories(&state, &form.categories).await?;
    let post = posts::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("post"))?;
    if !can_modify(&actor, post.author_id) {
        return Err(ApiError::forbidden("you can only edit your own posts"));
    }

    let updated = posts::update(&state.pool, post.id, &to_input(&form, status)).await?;
    Ok(Json(json!({ "post": updated, "message": "Post updated" })))
}

pub async fn remove(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(slug): Path<String>,
) -> ApiResult<Json<Value>> {
    let post = posts::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("post"))?;
    if !can_modify(&actor, post.author_id) {
        return Err(ApiError::forbidden("you can only delete your own posts"));
    }

    posts::delete(&state.pool, post.id).await?;
    Ok(Json(json!({ "message": "Post deleted" })))
}
