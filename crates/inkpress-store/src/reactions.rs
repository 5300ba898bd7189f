//! Like and favorite toggles.
//!
//! Both follow the same create-if-absent-else-delete semantics. The
//! favorites table enforces pair uniqueness; likes intentionally do
//! not, so the read-then-write toggle is the only duplicate guard there.

use chrono::Utc;
use sqlx::SqlitePool;

use inkpress_core::{Favorite, Post};

use crate::error::{StoreError, StoreResult};

/// Outcome of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Like a post if not yet liked by this user, else remove the like.
pub async fn toggle_like(pool: &SqlitePool, user_id: i64, post_id: i64) -> StoreResult<Toggle> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM likes WHERE user_id = ? AND post_id = ? LIMIT 1",
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    match existing {
        Some(id) => {
            sqlx::query("DELETE FROM likes WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await?;
            Ok(Toggle::Removed)
        }
        None => {
            sqlx::query("INSERT INTO likes (user_id, post_id, created_at) VALUES (?, ?, ?)")
                .bind(user_id)
                .bind(post_id)
                .bind(Utc::now())
                .execute(pool)
                .await?;
            Ok(Toggle::Added)
        }
    }
}

/// Favorite a post if not favorited, else remove the favorite. The
/// unique (user, post) constraint backstops the toggle.
pub async fn toggle_favorite(pool: &SqlitePool, user_id: i64, post_id: i64) -> StoreResult<Toggle> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM favorites WHERE user_id = ? AND post_id = ?",
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    match existing {
        Some(id) => {
            sqlx::query("DELETE FROM favorites WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await?;
            Ok(Toggle::Removed)
        }
        None => {
            insert_favorite(pool, user_id, post_id).await?;
            Ok(Toggle::Added)
        }
    }
}

/// Insert a favorite row directly. A second insert for the same pair
/// fails with [`StoreError::Conflict`].
pub async fn insert_favorite(
    pool: &SqlitePool,
    user_id: i64,
    post_id: i64,
) -> StoreResult<Favorite> {
    sqlx::query_as::<_, Favorite>(
        "INSERT INTO favorites (user_id, post_id) VALUES (?, ?) RETURNING *",
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await
    .map_err(StoreError::on_conflict("favorite"))
}

pub async fn is_liked(pool: &SqlitePool, user_id: i64, post_id: i64) -> StoreResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM likes WHERE user_id = ? AND post_id = ?",
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn is_favorited(pool: &SqlitePool, user_id: i64, post_id: i64) -> StoreResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM favorites WHERE user_id = ? AND post_id = ?",
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn like_count(pool: &SqlitePool, post_id: i64) -> StoreResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn favorite_count(pool: &SqlitePool, post_id: i64) -> StoreResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorites WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// The posts a user has favorited, newest post first.
pub async fn favorites_of(pool: &SqlitePool, user_id: i64) -> StoreResult<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT p.* FROM posts p
         JOIN favorites f ON f.post_id = p.id
         WHERE f.user_id = ?
         ORDER BY p.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(posts)
}
