//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from vocab-core
pub use vocab_core::{
    DashboardStats, DictionaryView, Language, Mode, ModeProgress, ProficiencyLevel,
    ProgressDelta, QuizQuestion, QuizResult, StoredProgress, User, UserProgress, Word,
};

// === Database Entity Types ===

/// User row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub mode: String,
    pub level: String,
    pub progress: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User document decoded from a row.
#[derive(Debug, Clone)]
pub struct LoadedUser {
    pub id: Uuid,
    pub user: User,
    /// The stored row used an older or incomplete shape and should be rewritten.
    pub needs_rewrite: bool,
    /// The stored progress could not be decoded; `user.progress` is empty and
    /// must not be persisted over it.
    pub progress_unreadable: bool,
}

impl DbUser {
    /// Convert to the vocab-core user, filling gaps with defaults.
    pub fn to_core_user(&self) -> LoadedUser {
        let (progress, stored) = UserProgress::from_stored(self.progress.as_ref());
        let mode = Mode::from_str(&self.mode);
        let level = ProficiencyLevel::from_str(&self.level);
        let progress_unreadable = stored == StoredProgress::Unreadable;

        LoadedUser {
            id: self.id,
            needs_rewrite: !progress_unreadable
                && (stored == StoredProgress::Upgraded || mode.is_none() || level.is_none()),
            progress_unreadable,
            user: User {
                username: self.username.clone(),
                mode: mode.unwrap_or_default(),
                level: level.unwrap_or_default(),
                progress,
            },
        }
    }
}

/// Session row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbSession {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub mode: Mode,
    pub level: ProficiencyLevel,
    pub progress: UserProgress,
    pub stats: DashboardStats,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            mode: user.mode,
            level: user.level,
            progress: user.progress.clone(),
            stats: DashboardStats::for_progress(user.active_progress()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateModeRequest {
    pub mode: Mode,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateLevelRequest {
    pub level: ProficiencyLevel,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub mode: Mode,
    pub level: ProficiencyLevel,
    #[serde(flatten)]
    pub stats: DashboardStats,
}

/// Word as presented to a learner in a given mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordView {
    pub id: String,
    pub english: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    pub russian: String,
    pub armenian: String,
    pub level: ProficiencyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl WordView {
    pub fn for_mode(word: &Word, mode: Mode) -> Self {
        Self {
            id: word.id.clone(),
            english: word.english.clone(),
            transcription: (mode.shows_transcription() && !word.transcription.is_empty())
                .then(|| word.transcription.clone()),
            russian: word.russian.clone(),
            armenian: word.armenian.clone(),
            level: word.level,
            image: if mode.shows_images() {
                word.image.clone()
            } else {
                None
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<WordView>,
    /// Nothing available for this activity.
    pub empty: bool,
}

impl WordListResponse {
    pub fn new(words: Vec<WordView>) -> Self {
        Self {
            empty: words.is_empty(),
            words,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommitResponse {
    pub progress: ModeProgress,
    pub stats: DashboardStats,
    /// IDs that are not words of the active mode; these were not recorded.
    pub dropped_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<Language>,
}

/// Quiz question without the answer key.
#[derive(Debug, Serialize, Deserialize)]
pub struct TestQuestionView {
    pub word_id: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: Vec<String>,
}

impl TestQuestionView {
    pub fn new(question: QuizQuestion, word: &Word, mode: Mode) -> Self {
        let view = WordView::for_mode(word, mode);
        Self {
            word_id: question.word_id,
            prompt: question.prompt,
            transcription: view.transcription,
            image: view.image,
            options: question.options,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestResponse {
    pub lang: Language,
    pub questions: Vec<TestQuestionView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub word_id: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreTestRequest {
    #[serde(default)]
    pub lang: Language,
    pub answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryQuery {
    #[serde(default)]
    pub view: DictionaryView,
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryItem {
    #[serde(flatten)]
    pub word: WordView,
    pub is_learned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryResponse {
    pub view: DictionaryView,
    pub entries: Vec<DictionaryItem>,
}
