//! Linear study/review pass over a fixed word list.
//!
//! A session is an ordinary value owned by whoever runs the activity. It is
//! consumed when the last word is passed, yielding the delta to commit;
//! dropping it earlier abandons the pass without touching progress.

use std::collections::BTreeSet;

use crate::progress::ProgressDelta;
use crate::types::{Word, WordId};

/// Which activity produced the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Study,
    Review,
}

/// A pass positioned at one word of a non-empty list.
#[derive(Debug, Clone)]
pub struct StudySession<'a> {
    kind: SessionKind,
    words: Vec<&'a Word>,
    index: usize,
    seen: BTreeSet<WordId>,
    learned: BTreeSet<WordId>,
}

/// Outcome of [`StudySession::advance`].
#[derive(Debug)]
pub enum Advance<'a> {
    /// Moved on to the next word.
    Next(StudySession<'a>),
    /// The last word was passed; commit this delta.
    Done(ProgressDelta),
}

impl<'a> StudySession<'a> {
    /// Start at the first word. `None` when there is nothing to show.
    pub fn start(kind: SessionKind, words: Vec<&'a Word>) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            words,
            index: 0,
            seen: BTreeSet::new(),
            learned: BTreeSet::new(),
        })
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn current(&self) -> &'a Word {
        self.words[self.index]
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.words.len()
    }

    /// Accumulated, uncommitted delta.
    pub fn pending(&self) -> ProgressDelta {
        ProgressDelta {
            seen: self.seen.clone(),
            learned: self.learned.clone(),
        }
    }

    /// Mark the current word seen and learned, then move on.
    pub fn advance(mut self) -> Advance<'a> {
        let id = self.current().id.clone();
        self.seen.insert(id.clone());
        self.learned.insert(id);

        if self.is_last() {
            Advance::Done(ProgressDelta {
                seen: self.seen,
                learned: self.learned,
            })
        } else {
            self.index += 1;
            Advance::Next(self)
        }
    }

    /// Step back one word, undoing its marks. No-op on the first word.
    pub fn retreat(&mut self) {
        if self.index == 0 {
            return;
        }
        self.index -= 1;
        let id = &self.words[self.index].id;
        self.seen.remove(id);
        self.learned.remove(id);
    }
}
