//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a user with default mode, level and empty progress.
    ///
    /// Returns `None` if the username is already taken.
    pub async fn create_user(&self, user: &User, password_hash: &str) -> Result<Option<DbUser>> {
        let row = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (username, password_hash, mode, level, progress)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, password_hash, mode, level, progress, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(password_hash)
        .bind(user.mode.as_str())
        .bind(user.level.as_str())
        .bind(Json(&user.progress))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Get user by username
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<DbUser>> {
        let row = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, username, password_hash, mode, level, progress, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<DbUser>> {
        let row = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, username, password_hash, mode, level, progress, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrite the whole user document (mode, level, progress).
    pub async fn save_user(&self, user_id: Uuid, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET mode = $2, level = $3, progress = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(user.mode.as_str())
        .bind(user.level.as_str())
        .bind(Json(&user.progress))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Update only the progress document
    pub async fn update_progress(&self, user_id: Uuid, progress: &UserProgress) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET progress = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(Json(progress))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Update only the mode
    pub async fn update_mode(&self, user_id: Uuid, mode: Mode) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET mode = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(mode.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Update only the level
    pub async fn update_level(&self, user_id: Uuid, level: ProficiencyLevel) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET level = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(level.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a user and, by cascade, their sessions
    pub async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Session Repository ===

    /// Store a session token digest for a user
    pub async fn create_session(&self, user_id: Uuid, token_hash: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get session by token digest
    pub async fn get_session(&self, token_hash: &str) -> Result<Option<DbSession>> {
        let session = sqlx::query_as::<_, DbSession>(
            r#"
            SELECT token_hash, user_id, created_at, last_seen_at
            FROM sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Update session last_seen_at timestamp
    pub async fn touch_session(&self, token_hash: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET last_seen_at = NOW()
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a session
    pub async fn delete_session(&self, token_hash: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
