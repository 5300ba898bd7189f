//! Posts and categories.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use inkpress_core::slug::slugify;
use inkpress_core::{Category, Post, PostStatus};

use crate::error::{StoreError, StoreResult};

/// Input for post creation and edits.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: String,
    pub status: PostStatus,
    pub categories: Vec<i64>,
}

/// One page of published posts plus the total row count.
#[derive(Debug)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: i64,
}

/// List published posts, newest first, optionally filtered by exact
/// (case-sensitive) category name.
pub async fn list_published(
    pool: &SqlitePool,
    page: i64,
    per_page: i64,
    category: Option<&str>,
) -> StoreResult<PostPage> {
    let page = page.max(1);
    let offset = (page - 1) * per_page;

    let (posts, total) = match category {
        Some(name) => {
            let posts = sqlx::query_as::<_, Post>(
                "SELECT p.* FROM posts p
                 JOIN post_categories pc ON pc.post_id = p.id
                 JOIN categories c ON c.id = pc.category_id
                 WHERE p.status = 1 AND c.name = ?
                 ORDER BY p.created_at DESC
                 LIMIT ? OFFSET ?",
            )
            .bind(name)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

            let total = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM posts p
                 JOIN post_categories pc ON pc.post_id = p.id
                 JOIN categories c ON c.id = pc.category_id
                 WHERE p.status = 1 AND c.name = ?",
            )
            .bind(name)
            .fetch_one(pool)
            .await?;

            (posts, total)
        }
        None => {
            let posts = sqlx::query_as::<_, Post>(
                "SELECT * FROM posts WHERE status = 1
                 ORDER BY created_at DESC
                 LIMIT ? OFFSET ?",
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

            let total =
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE status = 1")
                    .fetch_one(pool)
                    .await?;

            (posts, total)
        }
    };

    Ok(PostPage { posts, total })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> StoreResult<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(post)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> StoreResult<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(post)
}

/// Published post by slug, as the public detail page resolves it.
pub async fn find_published_by_slug(pool: &SqlitePool, slug: &str) -> StoreResult<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE slug = ? AND status = 1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(post)
}

/// Create a post. The slug is derived from the title; the post and its
/// category joins are written in one transaction.
pub async fn create(pool: &SqlitePool, author_id: i64, input: &PostInput) -> StoreResult<Post> {
    let now = Utc::now();
    let slug = slugify(&input.title);

    let mut tx = pool.begin().await?;

    let post = sqlx::query_as::<_, Post>(
        "INSERT INTO posts (title, slug, author_id, featured_image, content, excerpt, status, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(&input.title)
    .bind(&slug)
    .bind(author_id)
    .bind(&input.featured_image)
    .bind(&input.content)
    .bind(&input.excerpt)
    .bind(input.status)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(StoreError::on_conflict("post title"))?;

    for category_id in &input.categories {
        sqlx::query("INSERT INTO post_categories (post_id, category_id) VALUES (?, ?)")
            .bind(post.id)
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::on_missing("category"))?;
    }

    tx.commit().await?;
    tracing::info!(post_id = post.id, slug = %post.slug, "created post");
    Ok(post)
}

/// Edit a post. The slug is regenerated from the (possibly new) title
/// and the category set is replaced wholesale.
pub async fn update(pool: &SqlitePool, post_id: i64, input: &PostInput) -> StoreResult<Post> {
    let slug = slugify(&input.title);

    let mut tx = pool.begin().await?;

    let post = sqlx::query_as::<_, Post>(
        "UPDATE posts
         SET title = ?, slug = ?, featured_image = ?, content = ?, excerpt = ?, status = ?, updated_at = ?
         WHERE id = ?
         RETURNING *",
    )
    .bind(&input.title)
    .bind(&slug)
    .bind(&input.featured_image)
    .bind(&input.content)
    .bind(&input.excerpt)
    .bind(input.status)
    .bind(Utc::now())
    .bind(post_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(StoreError::on_conflict("post title"))?
    .ok_or(StoreError::NotFound("post"))?;

    sqlx::query("DELETE FROM post_categories WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;
    for category_id in &input.categories {
        sqlx::query("INSERT INTO post_categories (post_id, category_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::on_missing("category"))?;
    }

    tx.commit().await?;
    Ok(post)
}

/// Delete a post. Comments, likes, favorites, and category joins go
/// with it via the schema's cascades.
pub async fn delete(pool: &SqlitePool, post_id: i64) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(post_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("post"));
    }
    Ok(())
}

pub async fn categories_of(pool: &SqlitePool, post_id: i64) -> StoreResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT c.* FROM categories c
         JOIN post_categories pc ON pc.category_id = c.id
         WHERE pc.post_id = ?
         ORDER BY c.name",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

/// Of the given ids, the ones that are real categories. Lets callers
/// reject unknown ids before a write instead of tripping the foreign
/// key constraint.
pub async fn existing_category_ids(pool: &SqlitePool, ids: &[i64]) -> StoreResult<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id FROM categories WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    builder.push(")");

    let ids = builder.build_query_scalar::<i64>().fetch_all(pool).await?;
    Ok(ids)
}

pub async fn list_categories(pool: &SqlitePool) -> StoreResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(categories)
}

pub async fn create_category(pool: &SqlitePool, name: &str) -> StoreResult<Category> {
    sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES (?) RETURNING *")
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(StoreError::on_conflict("category"))
}
