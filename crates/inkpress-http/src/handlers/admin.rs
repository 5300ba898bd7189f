//! Staff-only moderation endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use inkpress_store::{pages, posts};

use crate::error::ApiResult;
use crate::extract::{require_staff, CurrentActor};
use crate::forms::{AboutForm, CategoryForm, MarkReadForm};
use crate::state::AppState;

const DEFAULT_IMAGE: &str = "placeholder";

pub async fn collaborate_list(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Json<Value>> {
    require_staff(&actor)?;
    let requests = pages::list_collaborate(&state.pool).await?;
    Ok(Json(json!({ "requests": requests })))
}

/// Bulk mark-as-read, the admin action from the original moderation
/// workflow.
pub async fn collaborate_mark_read(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(form): Json<MarkReadForm>,
) -> ApiResult<Json<Value>> {
    require_staff(&actor)?;
    let marked = pages::mark_read(&state.pool, &form.ids).await?;
    Ok(Json(json!({
        "marked": marked,
        "message": "Selected requests marked as read",
    })))
}

pub async fn about_upsert(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(form): Json<AboutForm>,
) -> ApiResult<Json<Value>> {
    require_staff(&actor)?;
    form.validate()?;

    let image = form.profile_image.as_deref().unwrap_or(DEFAULT_IMAGE);
    let about = pages::upsert_about(&state.pool, &form.title, image, &form.content).await?;
    Ok(Json(json!({ "about": about, "message": "About page updated" })))
}

pub async fn category_create(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(form): Json<CategoryForm>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    require_staff(&actor)?;
    form.validate()?;

    let category = posts::create_category(&state.pool, form.name.trim()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "category": category, "message": "Category created" })),
    ))
}
