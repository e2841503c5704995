//! Loading user documents, with upgrades of older stored shapes.

use crate::db::Database;
use crate::models::{DbUser, LoadedUser};

/// Decode a user row, rewriting the stored document if it was upgraded.
///
/// A failed rewrite is logged and does not fail the request; the upgrade is
/// retried on the next load. Unreadable progress is logged and left in place.
pub async fn load(db: &Database, row: &DbUser) -> LoadedUser {
    let loaded = row.to_core_user();
    if loaded.progress_unreadable {
        tracing::warn!(
            user_id = %loaded.id,
            "Stored progress is unreadable; keeping it and serving empty progress"
        );
    } else if loaded.needs_rewrite {
        match db.save_user(loaded.id, &loaded.user).await {
            Ok(()) => tracing::info!(user_id = %loaded.id, "Upgraded stored user document"),
            Err(e) => {
                tracing::warn!(user_id = %loaded.id, error = %e, "Failed to rewrite user document")
            }
        }
    }
    loaded
}

