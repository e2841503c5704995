//! Per-user, per-mode progress records.
//!
//! Each user carries two independent tracks, one per [`Mode`]. Tracks only
//! grow: a finished session is folded in with a set union, so replaying the
//! same delta is harmless.
//!
//! A learned word is always also a seen word. Merges and document loads
//! both restore that invariant.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Mode, WordId};

/// Learned words needed in the active mode before the test unlocks.
pub const TEST_UNLOCK_THRESHOLD: usize = 20;

/// Seen and learned word IDs for one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeProgress {
    #[serde(default)]
    pub seen_word_ids: BTreeSet<WordId>,
    #[serde(default)]
    pub learned_word_ids: BTreeSet<WordId>,
}

impl ModeProgress {
    /// Union-merge a delta. Learned IDs are marked seen as well.
    pub fn merge(&mut self, delta: &ProgressDelta) {
        self.seen_word_ids.extend(delta.seen.iter().cloned());
        self.seen_word_ids.extend(delta.learned.iter().cloned());
        self.learned_word_ids.extend(delta.learned.iter().cloned());
    }

    /// Restore `learned ⊆ seen`. Returns true if anything was added.
    pub fn normalize(&mut self) -> bool {
        let before = self.seen_word_ids.len();
        self.seen_word_ids.extend(self.learned_word_ids.iter().cloned());
        self.seen_word_ids.len() != before
    }

    pub fn is_seen(&self, id: &str) -> bool {
        self.seen_word_ids.contains(id)
    }

    pub fn is_learned(&self, id: &str) -> bool {
        self.learned_word_ids.contains(id)
    }
}

/// Both progress tracks of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub kid: ModeProgress,
    pub adult: ModeProgress,
}

impl UserProgress {
    pub fn for_mode(&self, mode: Mode) -> &ModeProgress {
        match mode {
            Mode::Kid => &self.kid,
            Mode::Adult => &self.adult,
        }
    }

    pub fn for_mode_mut(&mut self, mode: Mode) -> &mut ModeProgress {
        match mode {
            Mode::Kid => &mut self.kid,
            Mode::Adult => &mut self.adult,
        }
    }

    /// Merge a session delta into the given mode's track only.
    pub fn commit(&mut self, mode: Mode, delta: &ProgressDelta) {
        self.for_mode_mut(mode).merge(delta);
    }

    /// Learned IDs across both modes. Never mutates either track.
    pub fn learned_anywhere(&self) -> BTreeSet<&str> {
        self.kid
            .learned_word_ids
            .iter()
            .chain(self.adult.learned_word_ids.iter())
            .map(String::as_str)
            .collect()
    }

    /// Decode a stored progress document, upgrading older shapes.
    ///
    /// - `{kid, adult}` is the current shape and is only normalized;
    /// - top-level `seenWordIds`/`learnedWordIds` predate kid mode and are
    ///   moved under `adult`;
    /// - missing, null or `{}` means no progress yet.
    ///
    /// Anything else is [`StoredProgress::Unreadable`]: the returned progress
    /// is empty and must not be written back over the stored value.
    pub fn from_stored(value: Option<&Value>) -> (Self, StoredProgress) {
        let object = match value {
            None | Some(Value::Null) => return (Self::default(), StoredProgress::Upgraded),
            Some(Value::Object(object)) => object,
            Some(_) => return (Self::default(), StoredProgress::Unreadable),
        };

        if object.contains_key("kid") && object.contains_key("adult") {
            return match serde_json::from_value::<Self>(Value::Object(object.clone())) {
                Ok(mut progress) => {
                    let kid_changed = progress.kid.normalize();
                    let adult_changed = progress.adult.normalize();
                    let state = if kid_changed || adult_changed {
                        StoredProgress::Upgraded
                    } else {
                        StoredProgress::Current
                    };
                    (progress, state)
                }
                Err(_) => (Self::default(), StoredProgress::Unreadable),
            };
        }

        if object.contains_key("seenWordIds") || object.contains_key("learnedWordIds") {
            return match serde_json::from_value::<ModeProgress>(Value::Object(object.clone())) {
                Ok(mut adult) => {
                    adult.normalize();
                    let progress = Self {
                        kid: ModeProgress::default(),
                        adult,
                    };
                    (progress, StoredProgress::Upgraded)
                }
                Err(_) => (Self::default(), StoredProgress::Unreadable),
            };
        }

        if object.is_empty() {
            (Self::default(), StoredProgress::Upgraded)
        } else {
            (Self::default(), StoredProgress::Unreadable)
        }
    }
}

/// How a stored progress document relates to the decoded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredProgress {
    /// Stored as-is; nothing to write back.
    Current,
    /// Older or incomplete shape; the decoded progress should be persisted.
    Upgraded,
    /// Could not be decoded; keep the stored value untouched.
    Unreadable,
}

/// Seen/learned IDs accumulated by one study or review pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDelta {
    #[serde(default)]
    pub seen: BTreeSet<WordId>,
    #[serde(default)]
    pub learned: BTreeSet<WordId>,
}

impl ProgressDelta {
    /// Build a delta from ID lists.
    pub fn from_ids<S, L>(seen: S, learned: L) -> Self
    where
        S: IntoIterator,
        S::Item: Into<WordId>,
        L: IntoIterator,
        L::Item: Into<WordId>,
    {
        Self {
            seen: seen.into_iter().map(Into::into).collect(),
            learned: learned.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty() && self.learned.is_empty()
    }

    /// Keep only IDs accepted by the predicate. Returns the dropped IDs.
    pub fn retain_known(&mut self, known: impl Fn(&str) -> bool) -> Vec<WordId> {
        let dropped: BTreeSet<WordId> = self
            .seen
            .iter()
            .chain(self.learned.iter())
            .filter(|id| !known(id.as_str()))
            .cloned()
            .collect();
        self.seen.retain(|id| known(id.as_str()));
        self.learned.retain(|id| known(id.as_str()));
        dropped.into_iter().collect()
    }
}

/// Counters shown on the dashboard for the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub seen_count: usize,
    pub learned_count: usize,
    pub can_take_test: bool,
}

impl DashboardStats {
    pub fn for_progress(progress: &ModeProgress) -> Self {
        let learned_count = progress.learned_word_ids.len();
        Self {
            seen_count: progress.seen_word_ids.len(),
            learned_count,
            can_take_test: learned_count >= TEST_UNLOCK_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ids(values: &[&str]) -> BTreeSet<WordId> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merge_is_a_union() {
        let mut progress = ModeProgress {
            seen_word_ids: ids(&["a", "b"]),
            learned_word_ids: ids(&["a"]),
        };
        progress.merge(&ProgressDelta::from_ids(["b", "c"], ["b", "c"]));

        assert_eq!(progress.seen_word_ids, ids(&["a", "b", "c"]));
        assert_eq!(progress.learned_word_ids, ids(&["a", "b", "c"]));
    }

    #[test]
    fn merge_is_idempotent() {
        let delta = ProgressDelta::from_ids(["x", "y"], ["x"]);
        let mut once = ModeProgress::default();
        once.merge(&delta);
        let mut twice = once.clone();
        twice.merge(&delta);
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_marks_learned_as_seen() {
        let mut progress = ModeProgress::default();
        progress.merge(&ProgressDelta::from_ids(Vec::<String>::new(), ["z"]));
        assert!(progress.is_seen("z"));
        assert!(progress.is_learned("z"));
    }

    #[test]
    fn commit_touches_only_one_mode() {
        let mut progress = UserProgress::default();
        progress.commit(Mode::Adult, &ProgressDelta::from_ids(["w"], ["w"]));
        assert!(progress.kid.seen_word_ids.is_empty());
        assert_eq!(progress.adult.learned_word_ids, ids(&["w"]));
    }

    #[test]
    fn learned_anywhere_unions_modes() {
        let mut progress = UserProgress::default();
        progress.commit(Mode::Kid, &ProgressDelta::from_ids(["w1"], ["w1"]));
        progress.commit(Mode::Adult, &ProgressDelta::from_ids(["w2"], ["w2"]));
        let before = progress.clone();

        let learned = progress.learned_anywhere();
        assert_eq!(learned, BTreeSet::from(["w1", "w2"]));
        assert_eq!(progress, before);
    }

    #[test]
    fn stored_current_shape_is_kept() {
        let value = json!({
            "kid": { "seenWordIds": ["k1"], "learnedWordIds": ["k1"] },
            "adult": { "seenWordIds": [], "learnedWordIds": [] }
        });
        let (progress, state) = UserProgress::from_stored(Some(&value));
        assert_eq!(state, StoredProgress::Current);
        assert_eq!(progress.kid.learned_word_ids, ids(&["k1"]));
    }

    #[test]
    fn stored_current_shape_is_normalized() {
        let value = json!({
            "kid": { "seenWordIds": [], "learnedWordIds": ["k1"] },
            "adult": {}
        });
        let (progress, state) = UserProgress::from_stored(Some(&value));
        assert_eq!(state, StoredProgress::Upgraded);
        assert_eq!(progress.kid.seen_word_ids, ids(&["k1"]));
    }

    #[test]
    fn stored_flat_shape_moves_to_adult() {
        let value = json!({ "seenWordIds": ["a1", "a2"], "learnedWordIds": ["a1"] });
        let (progress, state) = UserProgress::from_stored(Some(&value));
        assert_eq!(state, StoredProgress::Upgraded);
        assert_eq!(progress.kid, ModeProgress::default());
        assert_eq!(progress.adult.seen_word_ids, ids(&["a1", "a2"]));
        assert_eq!(progress.adult.learned_word_ids, ids(&["a1"]));
    }

    #[test]
    fn stored_missing_progress_is_empty() {
        for value in [None, Some(json!(null)), Some(json!({}))] {
            let (progress, state) = UserProgress::from_stored(value.as_ref());
            assert_eq!(state, StoredProgress::Upgraded);
            assert_eq!(progress, UserProgress::default());
        }
    }

    #[test]
    fn stored_garbage_is_unreadable() {
        let values = [
            json!("nonsense"),
            json!({ "kid": { "seenWordIds": "k1" }, "adult": {} }),
            json!({ "kid": "k1", "adult": {} }),
            json!({ "seenWordIds": 42 }),
            json!({ "something": "else" }),
        ];
        for value in values {
            let (progress, state) = UserProgress::from_stored(Some(&value));
            assert_eq!(state, StoredProgress::Unreadable, "{value}");
            assert_eq!(progress, UserProgress::default());
        }
    }

    #[test]
    fn persisted_field_names() {
        let progress = UserProgress::default();
        let value = serde_json::to_value(&progress).unwrap();
        assert_eq!(
            value,
            json!({
                "kid": { "seenWordIds": [], "learnedWordIds": [] },
                "adult": { "seenWordIds": [], "learnedWordIds": [] }
            })
        );
    }

    #[test]
    fn retain_known_drops_unknown_ids() {
        let mut delta = ProgressDelta::from_ids(["a", "ghost"], ["a", "ghost"]);
        let dropped = delta.retain_known(|id| id != "ghost");
        assert_eq!(dropped, vec!["ghost".to_string()]);
        assert_eq!(delta, ProgressDelta::from_ids(["a"], ["a"]));
    }

    #[test]
    fn test_unlocks_at_threshold() {
        let mut progress = ModeProgress::default();
        let nineteen: Vec<String> = (0..19).map(|i| format!("w{i}")).collect();
        progress.merge(&ProgressDelta::from_ids(nineteen.clone(), nineteen));
        assert!(!DashboardStats::for_progress(&progress).can_take_test);

        progress.merge(&ProgressDelta::from_ids(["w19"], ["w19"]));
        let stats = DashboardStats::for_progress(&progress);
        assert!(stats.can_take_test);
        assert_eq!(stats.learned_count, 20);
        assert_eq!(stats.seen_count, 20);
    }
}
