//! Study analytics: session counters, daily streak, per-category accuracy,
//! struggling-word ranking, and session history.
//!
//! The update entry points are pure: they take the clock as an argument and
//! return a new record instead of mutating in place.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::VocabularyItem;

/// How many struggling words the ranked view returns by default.
pub const DEFAULT_STRUGGLING_LIMIT: usize = 5;

/// Correct/total tally for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAccuracy {
    pub correct: u32,
    pub total: u32,
}

/// One completed study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub date: DateTime<Local>,
    pub category: String,
    pub words_studied: u32,
}

/// A vocabulary item with a cumulative mistake count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrugglingWord {
    #[serde(flatten)]
    pub word: VocabularyItem,
    pub mistakes: u32,
}

/// The persisted analytics record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analytics {
    pub study_sessions: u32,
    pub total_words_studied: u32,
    pub daily_streak: u32,
    pub last_study_date: Option<NaiveDate>,
    pub accuracy_by_category: BTreeMap<String, CategoryAccuracy>,
    pub session_history: Vec<SessionRecord>,
    pub struggling_words: Vec<StrugglingWord>,
}

impl Analytics {
    /// Record a session start on the given calendar day.
    ///
    /// The session counter always increments. The daily streak only moves on
    /// the first session of a day: continued from exactly yesterday it
    /// increments, after any longer gap (or the first session ever) it
    /// resets to 1. Further sessions on the same day leave streak and date
    /// untouched.
    pub fn session_started(&self, today: NaiveDate) -> Self {
        let mut next = self.clone();
        next.study_sessions += 1;

        if next.last_study_date != Some(today) {
            let continued = next.last_study_date == today.pred_opt();
            next.daily_streak = if continued { next.daily_streak + 1 } else { 1 };
            next.last_study_date = Some(today);
        }

        next
    }

    /// Record one answered card.
    ///
    /// `category` is the session's category, tallied whether or not the
    /// answer was correct. Incorrect answers upsert the word into the
    /// struggling list.
    pub fn word_studied(&self, word: &VocabularyItem, correct: bool, category: &str) -> Self {
        let mut next = self.clone();
        next.total_words_studied += 1;

        let tally = next
            .accuracy_by_category
            .entry(category.to_string())
            .or_default();
        tally.total += 1;
        if correct {
            tally.correct += 1;
        }

        if !correct {
            match next.struggling_words.iter_mut().find(|w| w.word.id == word.id) {
                Some(existing) => existing.mistakes += 1,
                None => next.struggling_words.push(StrugglingWord {
                    word: word.clone(),
                    mistakes: 1,
                }),
            }
        }

        next
    }

    /// Record a finished session in the history.
    pub fn session_ended(&self, category: &str, words_studied: u32, now: DateTime<Local>) -> Self {
        let mut next = self.clone();
        next.session_history.push(SessionRecord {
            date: now,
            category: category.to_string(),
            words_studied,
        });
        next
    }
}

/// Whether two calendar days are exactly one day apart, in either direction.
/// Same day, gaps of two or more days, and missing inputs are all false.
pub fn are_consecutive_days(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (b - a).num_days().abs() == 1,
        _ => false,
    }
}

/// Accuracy across all categories as a rounded percentage, 0 when no
/// attempts exist anywhere.
pub fn overall_accuracy(by_category: &BTreeMap<String, CategoryAccuracy>) -> u32 {
    let correct: u32 = by_category.values().map(|c| c.correct).sum();
    let total: u32 = by_category.values().map(|c| c.total).sum();

    if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Accuracy for one category tally, 0 for a missing or empty tally.
pub fn category_accuracy(tally: Option<&CategoryAccuracy>) -> u32 {
    match tally {
        Some(t) if t.total > 0 => ((t.correct as f64 / t.total as f64) * 100.0).round() as u32,
        _ => 0,
    }
}

/// The `limit` most-missed words, descending by mistake count.
pub fn top_struggling(words: &[StrugglingWord], limit: usize) -> Vec<StrugglingWord> {
    let mut ranked = words.to_vec();
    ranked.sort_by(|a, b| b.mistakes.cmp(&a.mistakes));
    ranked.truncate(limit);
    ranked
}
