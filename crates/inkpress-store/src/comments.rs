//! Comments and moderation.

use chrono::Utc;
use sqlx::SqlitePool;

use inkpress_core::policy::Actor;
use inkpress_core::Comment;

use crate::error::{StoreError, StoreResult};

/// Create a comment. Always unapproved until moderated, regardless of
/// anything the submission claimed.
pub async fn create(
    pool: &SqlitePool,
    post_id: i64,
    author_id: i64,
    body: &str,
) -> StoreResult<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (post_id, author_id, body, approved, created_at)
         VALUES (?, ?, ?, 0, ?)
         RETURNING *",
    )
    .bind(post_id)
    .bind(author_id)
    .bind(body)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(comment)
}

pub async fn find(pool: &SqlitePool, id: i64) -> StoreResult<Option<Comment>> {
    let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(comment)
}

/// Comments on a post as a given viewer sees them, newest first.
///
/// Public viewers see approved comments only; an authenticated viewer
/// additionally sees their own unapproved comments; staff see all.
pub async fn visible_for_post(
    pool: &SqlitePool,
    post_id: i64,
    viewer: Option<&Actor>,
) -> StoreResult<Vec<Comment>> {
    let comments = match viewer {
        Some(actor) if actor.is_staff => {
            sqlx::query_as::<_, Comment>(
                "SELECT * FROM comments WHERE post_id = ? ORDER BY created_at DESC",
            )
            .bind(post_id)
            .fetch_all(pool)
            .await?
        }
        Some(actor) => {
            sqlx::query_as::<_, Comment>(
                "SELECT * FROM comments
                 WHERE post_id = ? AND (approved = 1 OR author_id = ?)
                 ORDER BY created_at DESC",
            )
            .bind(post_id)
            .bind(actor.id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Comment>(
                "SELECT * FROM comments
                 WHERE post_id = ? AND approved = 1
                 ORDER BY created_at DESC",
            )
            .bind(post_id)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(comments)
}

pub async fn approved_count(pool: &SqlitePool, post_id: i64) -> StoreResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM comments WHERE post_id = ? AND approved = 1",
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Replace a comment's body. The edit re-enters moderation: `approved`
/// drops back to false.
pub async fn update_body(pool: &SqlitePool, id: i64, body: &str) -> StoreResult<Comment> {
    sqlx::query_as::<_, Comment>(
        "UPDATE comments SET body = ?, approved = 0 WHERE id = ? RETURNING *",
    )
    .bind(body)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound("comment"))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("comment"));
    }
    Ok(())
}

/// Flip the moderation flag on a comment.
pub async fn set_approved(pool: &SqlitePool, id: i64, approved: bool) -> StoreResult<Comment> {
    sqlx::query_as::<_, Comment>("UPDATE comments SET approved = ? WHERE id = ? RETURNING *")
        .bind(approved)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound("comment"))
}
