//! Registration, login, and logout.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use inkpress_store::users::{self, NewUser};

use crate::error::{ApiError, ApiResult};
use crate::forms::{LoginForm, RegisterForm};
use crate::state::AppState;

/// Create an account. The profile row is provisioned in the same
/// transaction, so it exists from the first request onward.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    form.validate()?;

    let user = users::register(
        &state.pool,
        &NewUser {
            username: form.username,
            email: form.email,
            password: form.password,
        },
        state.config.bcrypt_cost,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": user, "message": "Account created" })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> ApiResult<Json<Value>> {
    let user = users::verify_credentials(&state.pool, &form.username, &form.password)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let token = users::create_session(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "logged in");
    Ok(Json(json!({ "token": token, "user": user })))
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    users::delete_session(&state.pool, token).await?;
    Ok(Json(json!({ "message": "Logged out" })))
}
