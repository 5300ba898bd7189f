//! Accounts, profiles, and sessions.
//!
//! Registration provisions the profile row inside the same transaction
//! as the user insert, so profile reads never have to branch on
//! existence. Account edits update the user row and the profile row
//! atomically: if either half fails, nothing is written.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::SqlitePool;

use inkpress_core::policy::Actor;
use inkpress_core::{Profile, User};

use crate::error::{StoreError, StoreResult};

const SESSION_TOKEN_LEN: usize = 48;

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Input for an atomic user + profile update.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub username: String,
    pub email: String,
    pub profile_image: String,
    pub about: String,
}

/// Create the user and their profile in one transaction.
pub async fn register(pool: &SqlitePool, new: &NewUser, bcrypt_cost: u32) -> StoreResult<User> {
    let password_hash = bcrypt::hash(&new.password, bcrypt_cost)?;
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, is_staff, created_at)
         VALUES (?, ?, ?, 0, ?)
         RETURNING *",
    )
    .bind(&new.username)
    .bind(&new.email)
    .bind(&password_hash)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(StoreError::on_conflict("username"))?;

    sqlx::query("INSERT INTO profiles (user_id) VALUES (?)")
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(user_id = user.id, username = %user.username, "registered user");
    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Check a username/password pair, returning the user on success.
pub async fn verify_credentials(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> StoreResult<Option<User>> {
    let Some(user) = find_by_username(pool, username).await? else {
        return Ok(None);
    };
    if bcrypt::verify(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Issue a fresh session token for the user.
pub async fn create_session(pool: &SqlitePool, user_id: i64) -> StoreResult<String> {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect();

    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a session token to the actor it authenticates, if any.
pub async fn actor_for_token(pool: &SqlitePool, token: &str) -> StoreResult<Option<Actor>> {
    let actor = sqlx::query_as::<_, (i64, String, bool)>(
        "SELECT u.id, u.username, u.is_staff
         FROM sessions s JOIN users u ON u.id = s.user_id
         WHERE s.token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?
    .map(|(id, username, is_staff)| Actor {
        id,
        username,
        is_staff,
    });
    Ok(actor)
}

pub async fn delete_session(pool: &SqlitePool, token: &str) -> StoreResult<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// The user's profile. Always present: provisioning happens at
/// registration.
pub async fn profile_of(pool: &SqlitePool, user_id: i64) -> StoreResult<Profile> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound("profile"))
}

/// Update username/email and image/bio in one transaction.
pub async fn update_account(
    pool: &SqlitePool,
    user_id: i64,
    update: &AccountUpdate,
) -> StoreResult<(User, Profile)> {
    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET username = ?, email = ? WHERE id = ? RETURNING *",
    )
    .bind(&update.username)
    .bind(&update.email)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(StoreError::on_conflict("username"))?
    .ok_or(StoreError::NotFound("user"))?;

    let profile = sqlx::query_as::<_, Profile>(
        "UPDATE profiles SET profile_image = ?, about = ? WHERE user_id = ? RETURNING *",
    )
    .bind(&update.profile_image)
    .bind(&update.about)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(StoreError::NotFound("profile"))?;

    tx.commit().await?;
    Ok((user, profile))
}

/// Promote a user to staff. Used by deployment tooling and tests.
pub async fn set_staff(pool: &SqlitePool, user_id: i64, is_staff: bool) -> StoreResult<()> {
    let result = sqlx::query("UPDATE users SET is_staff = ? WHERE id = ?")
        .bind(is_staff)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("user"));
    }
    Ok(())
}
