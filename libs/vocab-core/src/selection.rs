//! Word selection for each learning activity.
//!
//! All functions are pure given their inputs. Shuffling takes the random
//! source from the caller so tests can pass a seeded generator.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::progress::{ModeProgress, UserProgress};
use crate::types::Word;

/// Number of unseen words offered per study pass.
pub const STUDY_BATCH_SIZE: usize = 15;

/// Number of questions in a test.
pub const TEST_SET_SIZE: usize = 10;

/// Next batch of unseen words, in catalog order.
///
/// An empty result means there is nothing left to study.
pub fn study_queue<'a>(words: &[&'a Word], progress: &ModeProgress) -> Vec<&'a Word> {
    words
        .iter()
        .copied()
        .filter(|w| !progress.is_seen(&w.id))
        .take(STUDY_BATCH_SIZE)
        .collect()
}

/// All learned words of the slice, freshly shuffled.
pub fn review_queue<'a, R: Rng + ?Sized>(
    words: &[&'a Word],
    progress: &ModeProgress,
    rng: &mut R,
) -> Vec<&'a Word> {
    let mut learned = learned_words(words, progress);
    learned.shuffle(rng);
    learned
}

/// Up to [`TEST_SET_SIZE`] random learned words.
///
/// The unlock threshold is checked by the caller; with fewer learned words
/// this just returns a shorter list.
pub fn test_set<'a, R: Rng + ?Sized>(
    words: &[&'a Word],
    progress: &ModeProgress,
    rng: &mut R,
) -> Vec<&'a Word> {
    let mut learned = review_queue(words, progress, rng);
    learned.truncate(TEST_SET_SIZE);
    learned
}

/// How many questions [`test_set`] draws for this slice and progress.
pub fn test_set_len(words: &[&Word], progress: &ModeProgress) -> usize {
    learned_words(words, progress).len().min(TEST_SET_SIZE)
}

fn learned_words<'a>(words: &[&'a Word], progress: &ModeProgress) -> Vec<&'a Word> {
    words
        .iter()
        .copied()
        .filter(|w| progress.is_learned(&w.id))
        .collect()
}

/// Which words the dictionary lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryView {
    /// Words learned in either mode.
    #[default]
    Mine,
    /// The whole combined catalog.
    All,
}

/// Dictionary row.
#[derive(Debug, Clone, Serialize)]
pub struct DictionaryEntry<'a> {
    pub word: &'a Word,
    /// Learned in either mode.
    pub is_learned: bool,
}

/// Dictionary listing over the combined catalog, optionally text-filtered.
///
/// The query matches case-insensitively against english and both
/// translations; blank queries match everything.
pub fn dictionary<'a>(
    catalog: &'a Catalog,
    progress: &UserProgress,
    view: DictionaryView,
    query: &str,
) -> Vec<DictionaryEntry<'a>> {
    let learned = progress.learned_anywhere();
    let needle = query.trim().to_lowercase();

    catalog
        .all()
        .map(|word| DictionaryEntry {
            word,
            is_learned: learned.contains(word.id.as_str()),
        })
        .filter(|entry| view == DictionaryView::All || entry.is_learned)
        .filter(|entry| needle.is_empty() || entry.word.matches(&needle))
        .collect()
}
