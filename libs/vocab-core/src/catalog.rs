//! Word catalog, partitioned into a kid set and a levelled adult set.
//!
//! The catalog is built once from raw exported records and never changes
//! afterwards. Every lookup preserves the stored order.
//!
//! # Record format
//! ```json
//! [
//!   { "id": "w1", "english": "apple", "transcription": "ˈæp.əl",
//!     "russian": "яблоко", "armenian": "խնձոր", "difficulty": "easy" }
//! ]
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::types::{Category, Mode, ProficiencyLevel, Word, WordId};

/// Word record as exported by the dictionary editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWord {
    pub id: String,
    pub english: String,
    #[serde(default)]
    pub transcription: String,
    pub russian: String,
    pub armenian: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub image_base64: Option<String>,
}

impl RawWord {
    /// Convert into a catalog word. Kid words are never levelled.
    fn into_word(self, levelled: bool) -> Word {
        let difficulty = self.difficulty.as_deref();
        Word {
            category: Category::from_difficulty(difficulty),
            level: if levelled {
                ProficiencyLevel::from_difficulty(difficulty)
            } else {
                ProficiencyLevel::Easy
            },
            created_at: self.created_at.and_then(DateTime::<Utc>::from_timestamp_millis),
            id: self.id,
            english: self.english,
            transcription: self.transcription,
            russian: self.russian,
            armenian: self.armenian,
            image: self.image_base64,
        }
    }
}

/// The process-wide vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    kid: Vec<Word>,
    adult: Vec<Word>,
    index: HashMap<WordId, (Mode, usize)>,
}

impl Catalog {
    /// Build from raw records, rejecting empty or duplicate IDs.
    pub fn from_raw(kid: Vec<RawWord>, adult: Vec<RawWord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(kid.len() + adult.len());
        let partitions = [(Mode::Kid, &kid), (Mode::Adult, &adult)];
        let records = partitions.iter().flat_map(|(mode, words)| {
            words
                .iter()
                .enumerate()
                .map(move |(pos, raw)| (*mode, pos, raw))
        });
        for (record, (mode, pos, raw)) in records.enumerate() {
            if raw.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index: record });
            }
            if index.insert(raw.id.clone(), (mode, pos)).is_some() {
                return Err(CatalogError::DuplicateId { id: raw.id.clone() });
            }
        }

        Ok(Self {
            kid: kid.into_iter().map(|w| w.into_word(false)).collect(),
            adult: adult.into_iter().map(|w| w.into_word(true)).collect(),
            index,
        })
    }

    /// Build from two JSON arrays of raw records.
    pub fn from_json(kid_json: &str, adult_json: &str) -> Result<Self> {
        let kid: Vec<RawWord> = serde_json::from_str(kid_json)?;
        let adult: Vec<RawWord> = serde_json::from_str(adult_json)?;
        Self::from_raw(kid, adult)
    }

    /// Words visible in a mode. Level only applies to adults.
    pub fn words_for(&self, mode: Mode, level: ProficiencyLevel) -> Vec<&Word> {
        match mode {
            Mode::Kid => self.kid.iter().collect(),
            Mode::Adult => self.adult.iter().filter(|w| w.level == level).collect(),
        }
    }

    /// Kid words followed by adult words.
    pub fn all(&self) -> impl Iterator<Item = &Word> {
        self.kid.iter().chain(self.adult.iter())
    }

    pub fn get(&self, id: &str) -> Option<&Word> {
        let &(mode, pos) = self.index.get(id)?;
        self.partition(mode).get(pos)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Whether `id` belongs to the partition shown in `mode`, at any level.
    pub fn in_mode(&self, mode: Mode, id: &str) -> bool {
        matches!(self.index.get(id), Some((owner, _)) if *owner == mode)
    }

    fn partition(&self, mode: Mode) -> &[Word] {
        match mode {
            Mode::Kid => &self.kid,
            Mode::Adult => &self.adult,
        }
    }

    pub fn kid_words(&self) -> &[Word] {
        &self.kid
    }

    pub fn adult_words(&self) -> &[Word] {
        &self.adult
    }

    pub fn len(&self) -> usize {
        self.kid.len() + self.adult.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
