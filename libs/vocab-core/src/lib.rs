//! Core vocabulary library shared by the backend and any client.
//!
//! Provides:
//! - Word catalog partitioned into kid and adult sets
//! - Per-mode progress records with union-merge commits
//! - Selection rules for study, review, test and dictionary views
//! - Study session and quiz state machines

pub mod catalog;
pub mod error;
pub mod progress;
pub mod quiz;
pub mod selection;
pub mod session;
pub mod types;

pub use catalog::{Catalog, RawWord};
pub use error::{CatalogError, Result};
pub use progress::{
    DashboardStats, ModeProgress, ProgressDelta, StoredProgress, UserProgress,
    TEST_UNLOCK_THRESHOLD,
};
pub use quiz::{
    build_question, score_answers, Quiz, QuizQuestion, QuizResult, QuizState, DISTRACTOR_COUNT,
    PLACEHOLDER_OPTION,
};
pub use selection::{
    dictionary, review_queue, study_queue, test_set, test_set_len, DictionaryEntry,
    DictionaryView, STUDY_BATCH_SIZE, TEST_SET_SIZE,
};
pub use session::{Advance, SessionKind, StudySession};
pub use types::{Category, Language, Mode, ProficiencyLevel, User, Word, WordId};
