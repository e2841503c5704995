//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

use lingua_backend::models::{ModeProgress, ProgressDelta, UserProgress};
use vocab_core::{Catalog, Mode, ProficiencyLevel};

/// Generate a unique username to avoid collisions between runs.
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

/// Create a register/login request body.
pub fn credentials_request(username: &str, password: &str) -> serde_json::Value {
    json!({ "username": username, "password": password })
}

/// Create a commit request body.
pub fn commit_request(seen: &[&str], learned: &[&str]) -> serde_json::Value {
    json!({ "seen": seen, "learned": learned })
}

/// Create a score request body from `(word_id, answer)` pairs.
pub fn score_request(lang: &str, answers: &[(&str, &str)]) -> serde_json::Value {
    let answers: Vec<_> = answers
        .iter()
        .map(|(word_id, answer)| json!({ "word_id": word_id, "answer": answer }))
        .collect();
    json!({ "lang": lang, "answers": answers })
}

/// IDs of the first `count` words visible in a mode and level.
pub fn word_ids(catalog: &Catalog, mode: Mode, level: ProficiencyLevel, count: usize) -> Vec<String> {
    catalog
        .words_for(mode, level)
        .into_iter()
        .take(count)
        .map(|w| w.id.clone())
        .collect()
}

/// Mode progress where every given ID is seen and learned.
pub fn learned_progress(ids: &[String]) -> ModeProgress {
    let mut progress = ModeProgress::default();
    progress.merge(&ProgressDelta::from_ids(ids.to_vec(), ids.to_vec()));
    progress
}

/// Adult progress with `count` learned words, easy level first then medium.
pub fn adult_progress_with_learned(catalog: &Catalog, count: usize) -> UserProgress {
    let ids: Vec<String> = catalog
        .adult_words()
        .iter()
        .take(count)
        .map(|w| w.id.clone())
        .collect();
    UserProgress {
        kid: ModeProgress::default(),
        adult: learned_progress(&ids),
    }
}
