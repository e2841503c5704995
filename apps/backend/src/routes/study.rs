//! Study and review endpoints

use axum::{extract::State, Extension, Json};
use vocab_core::{review_queue, study_queue};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::CurrentUser;
use crate::AppState;

/// GET /api/study/queue
/// Next batch of unseen words for the active mode and level
pub async fn queue(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Json<WordListResponse> {
    let user = &current.user;
    let pool = state.catalog.words_for(user.mode, user.level);
    let words = study_queue(&pool, user.active_progress());

    Json(WordListResponse::new(
        words
            .into_iter()
            .map(|w| WordView::for_mode(w, user.mode))
            .collect(),
    ))
}

/// GET /api/study/review
/// Learned words of the active mode and level, shuffled
pub async fn review(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Json<WordListResponse> {
    let user = &current.user;
    let pool = state.catalog.words_for(user.mode, user.level);
    let words = review_queue(&pool, user.active_progress(), &mut rand::thread_rng());

    Json(WordListResponse::new(
        words
            .into_iter()
            .map(|w| WordView::for_mode(w, user.mode))
            .collect(),
    ))
}

/// POST /api/study/commit
/// Merge a finished session into the active mode's progress.
/// IDs that are not words of the active mode are dropped and reported.
pub async fn commit(
    State(state): State<AppState>,
    Extension(mut current): Extension<CurrentUser>,
    Json(mut delta): Json<ProgressDelta>,
) -> Result<Json<CommitResponse>> {
    let mode = current.user.mode;
    let dropped_ids = delta.retain_known(|id| state.catalog.in_mode(mode, id));
    if !dropped_ids.is_empty() {
        tracing::warn!(
            user_id = %current.user_id,
            mode = mode.as_str(),
            dropped = ?dropped_ids,
            "Ignoring word IDs outside the active mode in commit"
        );
    }

    let user = &mut current.user;
    if !delta.is_empty() {
        if current.progress_unreadable {
            return Err(ApiError::Internal(
                "Stored progress could not be read; refusing to overwrite it".to_string(),
            ));
        }
        user.commit(&delta);
        state
            .db
            .update_progress(current.user_id, &user.progress)
            .await?;

        tracing::debug!(
            user_id = %current.user_id,
            mode = user.mode.as_str(),
            seen = delta.seen.len(),
            learned = delta.learned.len(),
            "Committed session progress"
        );
    }

    let progress = user.active_progress().clone();
    Ok(Json(CommitResponse {
        stats: DashboardStats::for_progress(&progress),
        progress,
        dropped_ids,
    }))
}
