//! Actor extraction.
//!
//! The authenticated actor is resolved from a bearer session token and
//! handed to handlers as an explicit value. Gated handlers take
//! [`CurrentActor`]; handlers whose output merely varies by viewer take
//! [`MaybeActor`].

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use inkpress_core::policy::Actor;
use inkpress_store::users;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects with 401 when no valid session token is presented.
pub struct CurrentActor(pub Actor);

/// Resolves to `None` for anonymous requests instead of rejecting.
pub struct MaybeActor(pub Option<Actor>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<Actor>, ApiError> {
    let Some(token) = bearer_token(parts) else {
        return Ok(None);
    };
    let actor = users::actor_for_token(&state.pool, token).await?;
    Ok(actor)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match resolve(parts, state).await? {
            Some(actor) => Ok(CurrentActor(actor)),
            None => Err(ApiError::Unauthorized),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeActor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeActor(resolve(parts, state).await?))
    }
}

/// Staff gate for moderation endpoints.
pub fn require_staff(actor: &Actor) -> Result<(), ApiError> {
    if actor.is_staff {
        Ok(())
    } else {
        Err(ApiError::forbidden("staff access required"))
    }
}
