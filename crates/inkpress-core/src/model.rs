//! Row structs for every persisted entity.
//!
//! These map 1:1 onto the tables in `inkpress-store`'s migrations and
//! carry no behavior beyond lightweight accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i64)]
pub enum PostStatus {
    Draft = 0,
    Published = 1,
}

impl PostStatus {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(PostStatus::Draft),
            1 => Some(PostStatus::Published),
            _ => None,
        }
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

/// One-to-one extension of a user: image and bio.
///
/// Provisioned inside the registration transaction, so a profile row
/// exists for every user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub user_id: i64,
    pub profile_image: String,
    pub about: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A blog post. `slug` is always derived from `title` at write time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author_id: i64,
    pub featured_image: String,
    pub content: String,
    pub excerpt: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment on a post. Created unapproved and hidden from the public
/// until a staff member flips `approved`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub body: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// A user's favorite. (user_id, post_id) is unique, enforced by the store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
}

/// Site-owner "About" page content, staff-edited.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct About {
    pub id: i64,
    pub title: String,
    pub profile_image: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

/// An inbound collaboration request from the public contact form.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CollaborateRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub read: bool,
}
