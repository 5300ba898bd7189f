//! Comment submission, editing, deletion, and moderation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use inkpress_core::{can_modify, Comment, Post};
use inkpress_store::{comments, posts};

use crate::error::{ApiError, ApiResult};
use crate::extract::{require_staff, CurrentActor};
use crate::forms::CommentForm;
use crate::state::AppState;

async fn published_post(state: &AppState, slug: &str) -> ApiResult<Post> {
    posts::find_published_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| ApiError::not_found("post"))
}

/// A comment must belong to the post named in the path.
async fn comment_on(state: &AppState, post: &Post, comment_id: i64) -> ApiResult<Comment> {
    let comment = comments::find(&state.pool, comment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("comment"))?;
    if comment.post_id != post.id {
        return Err(ApiError::not_found("comment"));
    }
    Ok(comment)
}

/// Submit a comment. It enters moderation unapproved no matter what the
/// payload claimed.
pub async fn create(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(slug): Path<String>,
    Json(form): Json<CommentForm>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    form.validate()?;
    let post = published_post(&state, &slug).await?;
    let comment = comments::create(&state.pool, post.id, actor.id, &form.body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "comment": comment,
            "message": "Comment submitted and awaiting approval",
        })),
    ))
}

/// Edit a comment. Resets approval, so the edit re-enters moderation.
pub async fn update(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path((slug, comment_id)): Path<(String, i64)>,
    Json(form): Json<CommentForm>,
) -> ApiResult<Json<Value>> {
    form.validate()?;
    let post = published_post(&state, &slug).await?;
    let comment = comment_on(&state, &post, comment_id).await?;
    if !can_modify(&actor, comment.author_id) {
        return Err(ApiError::forbidden("you can only edit your own comments"));
    }

    let updated = comments::update_body(&state.pool, comment.id, &form.body).await?;
    Ok(Json(json!({ "comment": updated, "message": "Comment updated" })))
}

pub async fn remove(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path((slug, comment_id)): Path<(String, i64)>,
) -> ApiResult<Json<Value>> {
    let post = published_post(&state, &slug).await?;
    let comment = comment_on(&state, &post, comment_id).await?;
    if !can_modify(&actor, comment.author_id) {
        return Err(ApiError::forbidden("you can only delete your own comments"));
    }

    comments::delete(&state.pool, comment.id).await?;
    Ok(Json(json!({ "message": "Comment deleted" })))
}

#[derive(Debug, Deserialize, Default)]
pub struct ApproveForm {
    #[serde(default = "default_approved")]
    pub approved: bool,
}

fn default_approved() -> bool {
    true
}

/// Staff-only: flip a comment's moderation flag. The distinguished
/// submission carries the comment id in the path.
pub async fn approve(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path((slug, comment_id)): Path<(String, i64)>,
    form: Option<Json<ApproveForm>>,
) -> ApiResult<Json<Value>> {
    require_staff(&actor)?;
    let post = published_post(&state, &slug).await?;
    let comment = comment_on(&state, &post, comment_id).await?;

    let approved = form.map(|Json(f)| f.approved).unwrap_or(true);
    let updated = comments::set_approved(&state.pool, comment.id, approved).await?;
    let message = if updated.approved {
        "Comment approved"
    } else {
        "Comment unapproved"
    };
    Ok(Json(json!({ "comment": updated, "message": message })))
}
