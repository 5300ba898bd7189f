//! Authorization policy.
//!
//! One explicit rule applied everywhere a comment or post is mutated:
//! the actor must own the resource or be staff. The actor is always a
//! parameter, never ambient request state.

use serde::Serialize;

/// The authenticated identity a request acts as.
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: i64,
    pub username: String,
    pub is_staff: bool,
}

/// True iff `actor` may mutate or delete a resource owned by `owner_id`.
pub fn can_modify(actor: &Actor, owner_id: i64) -> bool {
    actor.is_staff || actor.id == owner_id
}
