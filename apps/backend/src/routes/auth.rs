//! Authentication middleware and account endpoints

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{AuthResponse, CredentialsRequest, User, UserResponse};
use crate::services::{auth, users};
use crate::AppState;

/// Authenticated user stored in request extensions
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub token_hash: String,
    pub user: User,
    /// Stored progress could not be decoded; writes to it are refused.
    pub progress_unreadable: bool,
}

/// Auth middleware - resolves the bearer token to a user document
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?;

    let token_hash = auth::hash_token(token);

    let session = state
        .db
        .get_session(&token_hash)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid session token".to_string()))?;

    let row = state
        .db
        .get_user(session.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    state.db.touch_session(&token_hash).await?;

    let loaded = users::load(&state.db, &row).await;

    request.extensions_mut().insert(CurrentUser {
        user_id: loaded.id,
        token_hash,
        user: loaded.user,
        progress_unreadable: loaded.progress_unreadable,
    });

    Ok(next.run(request).await)
}

/// POST /api/auth/register
/// Creates a user and signs them in
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>> {
    let username = payload.username.trim();
    auth::validate_credentials(username, &payload.password)?;

    let password_hash = auth::hash_password(&payload.password)?;
    let user = User::new(username);

    let row = state
        .db
        .create_user(&user, &password_hash)
        .await?
        .ok_or_else(|| ApiError::Conflict("User already exists".to_string()))?;

    tracing::info!(user_id = %row.id, "Registered new user");

    let token = start_session(&state, row.id).await?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>> {
    let username = payload.username.trim();
    auth::validate_credentials(username, &payload.password)?;

    let row = state
        .db
        .get_user_by_username(username)
        .await?
        .filter(|row| auth::verify_password(&payload.password, &row.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let loaded = users::load(&state.db, &row).await;
    let token = start_session(&state, loaded.id).await?;

    tracing::info!(user_id = %loaded.id, "User signed in");

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&loaded.user),
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.db.delete_session(&current.token_hash).await?;
    Ok(Json(serde_json::json!({ "logged_out": deleted })))
}

async fn start_session(state: &AppState, user_id: Uuid) -> Result<String> {
    let token = auth::new_session_token();
    state
        .db
        .create_session(user_id, &auth::hash_token(&token))
        .await?;
    Ok(token)
}
