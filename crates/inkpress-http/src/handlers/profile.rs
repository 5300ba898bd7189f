//! Profile viewing and editing.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use inkpress_store::users::{self, AccountUpdate};

use crate::error::{ApiError, ApiResult};
use crate::extract::CurrentActor;
use crate::forms::ProfileForm;
use crate::state::AppState;

/// The actor's own account and profile. The profile row always exists;
/// it was provisioned at registration.
pub async fn show(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Json<Value>> {
    let user = users::find_by_id(&state.pool, actor.id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;
    let profile = users::profile_of(&state.pool, actor.id).await?;
    Ok(Json(json!({ "user": user, "profile": profile })))
}

/// Update username/email and image/bio in one submission. Both halves
/// are written atomically; a validation failure writes nothing.
pub async fn update(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(form): Json<ProfileForm>,
) -> ApiResult<Json<Value>> {
    form.validate()?;

    // Fields left out of the form keep their stored values.
    let current = users::profile_of(&state.pool, actor.id).await?;
    let update = AccountUpdate {
        username: form.username,
        email: form.email,
        profile_image: form.profile_image.unwrap_or(current.profile_image),
        about: form.about.unwrap_or(current.about),
    };

    let (user, profile) = users::update_account(&state.pool, actor.id, &update).await?;
    Ok(Json(json!({
        "user": user,
        "profile": profile,
        "message": "Profile updated",
    })))
}
