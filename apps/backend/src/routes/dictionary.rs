//! Dictionary endpoint

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use vocab_core::dictionary;

use crate::models::*;
use crate::routes::auth::CurrentUser;
use crate::AppState;

/// GET /api/dictionary?view=mine|all&q=
pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<DictionaryQuery>,
) -> Json<DictionaryResponse> {
    let user = &current.user;
    let entries = dictionary(&state.catalog, &user.progress, query.view, &query.q)
        .into_iter()
        .map(|entry| DictionaryItem {
            word: WordView::for_mode(entry.word, user.mode),
            is_learned: entry.is_learned,
        })
        .collect();

    Json(DictionaryResponse {
        view: query.view,
        entries,
    })
}
