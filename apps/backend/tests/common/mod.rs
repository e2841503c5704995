//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the real router to a database and the bundled catalog
//! - Helpers for creating users and sessions directly in the database
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use serde_json::Value;
use uuid::Uuid;

use lingua_backend::config::default_data_path;
use lingua_backend::db::Database;
use lingua_backend::models::{User, UserProgress};
use lingua_backend::services::{auth, catalog};
use lingua_backend::{build_router, AppState};
use vocab_core::Catalog;

/// Test context containing database connection and router.
///
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    pub catalog: Arc<Catalog>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let catalog = catalog::load_catalog(
            &default_data_path("kid_words.json"),
            &default_data_path("adult_words.json"),
        )
        .await
        .expect("Failed to load bundled catalog");

        let state = AppState {
            db: Arc::new(db),
            catalog: Arc::new(catalog),
        };

        Self {
            db: state.db.clone(),
            catalog: state.catalog.clone(),
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user with a live session and return its ID and token.
    pub async fn create_test_user(&self) -> (Uuid, String) {
        let user = User::new(fixtures::unique_username("learner"));
        let row = self
            .db
            .create_user(&user, "not-a-real-hash")
            .await
            .expect("Failed to create test user")
            .expect("Generated username collided");

        let token = auth::new_session_token();
        self.db
            .create_session(row.id, &auth::hash_token(&token))
            .await
            .expect("Failed to create test session");

        (row.id, token)
    }

    /// Overwrite a user's stored progress document.
    pub async fn set_progress(&self, user_id: Uuid, progress: &UserProgress) {
        self.db
            .update_progress(user_id, progress)
            .await
            .expect("Failed to store progress");
    }

    /// Store a raw JSON progress value, bypassing the typed document.
    pub async fn set_raw_progress(&self, user_id: Uuid, progress: Value) {
        sqlx::query("UPDATE users SET progress = $2 WHERE id = $1")
            .bind(user_id)
            .bind(progress)
            .execute(self.db.pool())
            .await
            .expect("Failed to store raw progress");
    }

    /// Read the stored progress column as-is.
    pub async fn raw_progress(&self, user_id: Uuid) -> Option<Value> {
        sqlx::query_scalar::<_, Option<Value>>("SELECT progress FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to read progress")
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Clean up test data for a user. Sessions go with the user.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        let _ = self.db.delete_user(user_id).await;
    }
}
