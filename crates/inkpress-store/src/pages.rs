//! About page content and collaboration requests.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use inkpress_core::{About, CollaborateRequest};

use crate::error::StoreResult;

/// The current About entry, if one has been created.
pub async fn get_about(pool: &SqlitePool) -> StoreResult<Option<About>> {
    let about = sqlx::query_as::<_, About>("SELECT * FROM about ORDER BY id DESC LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(about)
}

/// Create or replace the About entry.
pub async fn upsert_about(
    pool: &SqlitePool,
    title: &str,
    profile_image: &str,
    content: &str,
) -> StoreResult<About> {
    let now = Utc::now();
    let existing = get_about(pool).await?;

    let about = match existing {
        Some(current) => {
            sqlx::query_as::<_, About>(
                "UPDATE about SET title = ?, profile_image = ?, content = ?, updated_at = ?
                 WHERE id = ? RETURNING *",
            )
            .bind(title)
            .bind(profile_image)
            .bind(content)
            .bind(now)
            .bind(current.id)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, About>(
                "INSERT INTO about (title, profile_image, content, updated_at)
                 VALUES (?, ?, ?, ?) RETURNING *",
            )
            .bind(title)
            .bind(profile_image)
            .bind(content)
            .bind(now)
            .fetch_one(pool)
            .await?
        }
    };
    Ok(about)
}

/// Record a collaboration request from the public form. Starts unread.
pub async fn create_collaborate(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    phone: &str,
    message: &str,
) -> StoreResult<CollaborateRequest> {
    let request = sqlx::query_as::<_, CollaborateRequest>(
        "INSERT INTO collaborate_requests (name, email, phone, message, read)
         VALUES (?, ?, ?, ?, 0)
         RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(message)
    .fetch_one(pool)
    .await?;
    Ok(request)
}

/// All collaboration requests, unread first, newest within each group.
pub async fn list_collaborate(pool: &SqlitePool) -> StoreResult<Vec<CollaborateRequest>> {
    let requests = sqlx::query_as::<_, CollaborateRequest>(
        "SELECT * FROM collaborate_requests ORDER BY read ASC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(requests)
}

/// Bulk mark-as-read. Returns how many rows changed.
pub async fn mark_read(pool: &SqlitePool, ids: &[i64]) -> StoreResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("UPDATE collaborate_requests SET read = 1 WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    builder.push(")");

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected())
}
