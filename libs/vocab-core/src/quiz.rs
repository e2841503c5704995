//! Multiple-choice test over a list of learned words.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Language, Word, WordId};

/// Wrong options offered per question.
pub const DISTRACTOR_COUNT: usize = 3;

/// Filler used when there are not enough distinct distractors.
pub const PLACEHOLDER_OPTION: &str = "???";

/// One question: pick the translation of `prompt` in the display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub word_id: WordId,
    pub prompt: String,
    pub correct: String,
    /// Always `DISTRACTOR_COUNT + 1` entries, in presentation order.
    pub options: Vec<String>,
}

/// Final tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

/// Build a question for `word`, drawing distractors from `candidates`.
///
/// Distractors are distinct texts that differ from the correct answer, so
/// exactly one option is correct.
pub fn build_question<R: Rng + ?Sized>(
    word: &Word,
    candidates: &[&Word],
    lang: Language,
    rng: &mut R,
) -> QuizQuestion {
    let correct = word.text(lang).to_string();

    let mut seen = HashSet::new();
    let mut pool: Vec<&str> = candidates
        .iter()
        .filter(|c| c.id != word.id)
        .map(|c| c.text(lang))
        .filter(|text| *text != correct && seen.insert(*text))
        .collect();
    pool.shuffle(rng);

    let mut options: Vec<String> = pool
        .into_iter()
        .take(DISTRACTOR_COUNT)
        .map(str::to_string)
        .collect();
    while options.len() < DISTRACTOR_COUNT {
        options.push(PLACEHOLDER_OPTION.to_string());
    }
    options.push(correct.clone());
    options.shuffle(rng);

    QuizQuestion {
        word_id: word.id.clone(),
        prompt: word.english.clone(),
        correct,
        options,
    }
}

/// Where the quiz currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    /// Waiting for an answer to the current question.
    Question,
    /// Answer recorded; input is locked until [`Quiz::proceed`].
    Answered { selected: String, correct: bool },
    /// All questions done.
    Results(QuizResult),
}

/// A running test. Questions are drawn up front.
#[derive(Debug, Clone)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    index: usize,
    score: usize,
    state: QuizState,
}

impl Quiz {
    /// Start a quiz over `words`. `None` when there are no words.
    pub fn new<R: Rng + ?Sized>(words: &[&Word], lang: Language, rng: &mut R) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        let questions = words
            .iter()
            .map(|w| build_question(w, words, lang, rng))
            .collect();
        Some(Self {
            questions,
            index: 0,
            score: 0,
            state: QuizState::Question,
        })
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Current question, or `None` once results are shown.
    pub fn current(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::Results(_) => None,
            _ => self.questions.get(self.index),
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Answer the current question. Returns `None` if input is locked.
    pub fn select(&mut self, option: &str) -> Option<bool> {
        if self.state != QuizState::Question {
            return None;
        }
        let correct = option == self.questions[self.index].correct;
        if correct {
            self.score += 1;
        }
        self.state = QuizState::Answered {
            selected: option.to_string(),
            correct,
        };
        Some(correct)
    }

    /// Leave the answered state: next question, or results after the last.
    pub fn proceed(&mut self) -> &QuizState {
        if matches!(self.state, QuizState::Answered { .. }) {
            if self.index + 1 < self.questions.len() {
                self.index += 1;
                self.state = QuizState::Question;
            } else {
                self.state = QuizState::Results(QuizResult {
                    score: self.score,
                    total: self.questions.len(),
                });
            }
        }
        &self.state
    }

    pub fn result(&self) -> Option<QuizResult> {
        match self.state {
            QuizState::Results(result) => Some(result),
            _ => None,
        }
    }
}

/// Score submitted answers without replaying the quiz.
///
/// Only the first answer per word counts, matching the input lock.
pub fn score_answers<'a>(
    answers: impl IntoIterator<Item = (&'a Word, &'a str)>,
    lang: Language,
) -> QuizResult {
    let mut answered = HashSet::new();
    let mut result = QuizResult { score: 0, total: 0 };
    for (word, answer) in answers {
        if !answered.insert(word.id.as_str()) {
            continue;
        }
        result.total += 1;
        if word.text(lang) == answer {
            result.score += 1;
        }
    }
    result
}
