//! Public About page and collaboration requests.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use inkpress_store::pages;

use crate::error::{ApiError, ApiResult};
use crate::forms::CollaborateForm;
use crate::state::AppState;

pub async fn about(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let about = pages::get_about(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("about"))?;
    Ok(Json(json!({ "about": about })))
}

/// Public collaboration form. Valid submissions are stored unread for
/// staff review; invalid ones store nothing.
pub async fn collaborate(
    State(state): State<AppState>,
    Json(form): Json<CollaborateForm>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    form.validate()?;
    let request = pages::create_collaborate(
        &state.pool,
        &form.name,
        &form.email,
        &form.phone,
        &form.message,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "request_id": request.id,
            "message": "Collaboration request received",
        })),
    ))
}
