//! Core types for the vocabulary application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::{ModeProgress, ProgressDelta, UserProgress};

/// Stable word identifier, unique across the whole catalog.
pub type WordId = String;

/// Audience mode. Selects the catalog partition and presentation hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Kid,
    Adult,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Adult
    }
}

impl Mode {
    /// Get the mode name as stored in user documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kid => "KID",
            Self::Adult => "ADULT",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "KID" => Some(Self::Kid),
            "ADULT" => Some(Self::Adult),
            _ => None,
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Kid => Self::Adult,
            Self::Adult => Self::Kid,
        }
    }

    /// Transcriptions are hidden from kids.
    pub fn shows_transcription(self) -> bool {
        self == Self::Adult
    }

    /// Pictures accompany words only in kid mode.
    pub fn shows_images(self) -> bool {
        self == Self::Kid
    }
}

/// Difficulty tier. Only filters the adult partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    Easy,
    Medium,
    Advanced,
}

impl Default for ProficiencyLevel {
    fn default() -> Self {
        Self::Easy
    }
}

impl ProficiencyLevel {
    /// Get the level name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Map a free-form difficulty label from a catalog record.
    ///
    /// Unknown or missing labels fall back to `Easy`.
    pub fn from_difficulty(difficulty: Option<&str>) -> Self {
        match difficulty.unwrap_or_default().to_lowercase().as_str() {
            "medium" => Self::Medium,
            "advanced" | "hard" | "difficult" => Self::Advanced,
            _ => Self::Easy,
        }
    }
}

/// Display language for answers and translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "RU")]
    Ru,
    #[serde(rename = "AM")]
    Am,
}

impl Default for Language {
    fn default() -> Self {
        Self::Ru
    }
}

/// Coarse word category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Basic,
    Advanced,
}

impl Category {
    /// `advanced`, `hard` and `difficult` are advanced, everything else basic.
    pub fn from_difficulty(difficulty: Option<&str>) -> Self {
        match difficulty.unwrap_or_default().to_lowercase().as_str() {
            "advanced" | "hard" | "difficult" => Self::Advanced,
            _ => Self::Basic,
        }
    }
}

/// A vocabulary item. Immutable once loaded into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub english: String,
    pub transcription: String,
    pub russian: String,
    pub armenian: String,
    pub category: Category,
    pub level: ProficiencyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Word {
    /// Text of this word in the given language.
    pub fn text(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.english,
            Language::Ru => &self.russian,
            Language::Am => &self.armenian,
        }
    }

    /// Case-insensitive substring match against english or either translation.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.english.to_lowercase().contains(needle)
            || self.russian.to_lowercase().contains(needle)
            || self.armenian.to_lowercase().contains(needle)
    }
}

/// A learner and their per-mode progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub mode: Mode,
    pub level: ProficiencyLevel,
    pub progress: UserProgress,
}

impl User {
    /// Freshly registered user: adult mode, easy level, no progress.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            mode: Mode::default(),
            level: ProficiencyLevel::default(),
            progress: UserProgress::default(),
        }
    }

    /// Progress track for the active mode.
    pub fn active_progress(&self) -> &ModeProgress {
        self.progress.for_mode(self.mode)
    }

    /// Merge a finished session's delta into the active mode.
    pub fn commit(&mut self, delta: &ProgressDelta) {
        self.progress.commit(self.mode, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_labels_map_to_levels() {
        assert_eq!(ProficiencyLevel::from_difficulty(Some("easy")), ProficiencyLevel::Easy);
        assert_eq!(ProficiencyLevel::from_difficulty(Some("Medium")), ProficiencyLevel::Medium);
        assert_eq!(ProficiencyLevel::from_difficulty(Some("HARD")), ProficiencyLevel::Advanced);
        assert_eq!(ProficiencyLevel::from_difficulty(Some("difficult")), ProficiencyLevel::Advanced);
        assert_eq!(ProficiencyLevel::from_difficulty(Some("weird")), ProficiencyLevel::Easy);
        assert_eq!(ProficiencyLevel::from_difficulty(None), ProficiencyLevel::Easy);
    }

    #[test]
    fn difficulty_labels_map_to_categories() {
        assert_eq!(Category::from_difficulty(Some("hard")), Category::Advanced);
        assert_eq!(Category::from_difficulty(Some("medium")), Category::Basic);
        assert_eq!(Category::from_difficulty(None), Category::Basic);
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [Mode::Kid, Mode::Adult] {
            assert_eq!(Mode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(Mode::from_str("kid"), None);
    }

    #[test]
    fn mode_presentation_hints() {
        assert!(!Mode::Kid.shows_transcription());
        assert!(Mode::Kid.shows_images());
        assert!(Mode::Adult.shows_transcription());
        assert!(!Mode::Adult.shows_images());
        assert_eq!(Mode::Kid.toggled(), Mode::Adult);
    }

    #[test]
    fn serde_names_match_stored_documents() {
        assert_eq!(serde_json::to_string(&Mode::Kid).unwrap(), "\"KID\"");
        assert_eq!(serde_json::to_string(&ProficiencyLevel::Medium).unwrap(), "\"medium\"");
        assert_eq!(serde_json::to_string(&Language::Am).unwrap(), "\"AM\"");
    }

    #[test]
    fn new_user_has_defaults() {
        let user = User::new("learner");
        assert_eq!(user.mode, Mode::Adult);
        assert_eq!(user.level, ProficiencyLevel::Easy);
        assert!(user.active_progress().seen_word_ids.is_empty());
    }

    #[test]
    fn commit_goes_to_active_mode() {
        let mut user = User::new("learner");
        user.mode = Mode::Kid;
        user.commit(&ProgressDelta::from_ids(["k1"], ["k1"]));
        assert!(user.progress.kid.learned_word_ids.contains("k1"));
        assert!(user.progress.adult.learned_word_ids.is_empty());
    }
}
