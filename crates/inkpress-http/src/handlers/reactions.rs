//! Like and favorite toggles, and the favorites listing.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use inkpress_store::reactions::{self, Toggle};
use inkpress_store::posts;

use crate::error::{ApiError, ApiResult};
use crate::extract::CurrentActor;
use crate::state::AppState;

async fn existing_post_id(state: &AppState, post_id: i64) -> ApiResult<i64> {
    posts::find_by_id(&state.pool, post_id)
        .await?
        .map(|post| post.id)
        .ok_or_else(|| ApiError::not_found("post"))
}

/// Toggle the actor's like on a post.
pub async fn like(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let post_id = existing_post_id(&state, post_id).await?;
    let (status, message) = match reactions::toggle_like(&state.pool, actor.id, post_id).await? {
        Toggle::Added => ("liked", "Post liked"),
        Toggle::Removed => ("unliked", "Post unliked"),
    };
    let like_count = reactions::like_count(&state.pool, post_id).await?;
    Ok(Json(json!({
        "status": status,
        "message": message,
        "like_count": like_count,
    })))
}

/// Toggle the actor's favorite on a post.
pub async fn favorite(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let post_id = existing_post_id(&state, post_id).await?;
    let (status, message) = match reactions::toggle_favorite(&state.pool, actor.id, post_id).await? {
        Toggle::Added => ("favorited", "Added to favorites"),
        Toggle::Removed => ("unfavorited", "Removed from favorites"),
    };
    let favorite_count = reactions::favorite_count(&state.pool, post_id).await?;
    Ok(Json(json!({
        "status": status,
        "message": message,
        "favorite_count": favorite_count,
    })))
}

/// The actor's favorited posts.
pub async fn favorites(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Json<Value>> {
    let posts = reactions::favorites_of(&state.pool, actor.id).await?;
    Ok(Json(json!({ "favorites": posts })))
}
