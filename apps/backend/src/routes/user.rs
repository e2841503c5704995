//! Current user endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::CurrentUser;
use crate::AppState;

/// GET /api/me
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(&current.user))
}

/// PUT /api/me/mode
pub async fn update_mode(
    State(state): State<AppState>,
    Extension(mut current): Extension<CurrentUser>,
    Json(request): Json<UpdateModeRequest>,
) -> Result<Json<UserResponse>> {
    state.db.update_mode(current.user_id, request.mode).await?;
    current.user.mode = request.mode;
    Ok(Json(UserResponse::from(&current.user)))
}

/// PUT /api/me/level
pub async fn update_level(
    State(state): State<AppState>,
    Extension(mut current): Extension<CurrentUser>,
    Json(request): Json<UpdateLevelRequest>,
) -> Result<Json<UserResponse>> {
    state.db.update_level(current.user_id, request.level).await?;
    current.user.level = request.level;
    Ok(Json(UserResponse::from(&current.user)))
}

/// GET /api/dashboard
pub async fn dashboard(Extension(current): Extension<CurrentUser>) -> Json<DashboardResponse> {
    let user = &current.user;
    Json(DashboardResponse {
        mode: user.mode,
        level: user.level,
        stats: DashboardStats::for_progress(user.active_progress()),
    })
}
