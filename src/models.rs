//! Data models for vocabulary, profile, and progress state.

use serde::{Deserialize, Serialize};

/// Bundled vocabulary: 115 English/Turkish word pairs in 4 categories.
const BUNDLED_VOCABULARY: &str = include_str!("../data/vocabulary.json");

/// User profile, created once at onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub emoji: String,
}

/// A single vocabulary entry. Static reference data, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: u32,
    pub english: String,
    pub turkish: String,
    pub pronunciation: String,
    pub category: String,
}

/// Cumulative study progress counters.
///
/// `level` is always derivable from `score` (see [`crate::score`]); the
/// persisted value is a cache that gets reconciled on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub streak: u32,
    pub level: u32,
    pub stars: u32,
    pub completed_sets: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            score: 0,
            streak: 0,
            level: 1,
            stars: 0,
            completed_sets: 0,
        }
    }
}

/// Ephemeral snapshot of the stats that drive badge evaluation.
///
/// `streak` is the consecutive-correct-answer streak, not the daily study
/// streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_words_studied: u32,
    pub streak: u32,
    pub completed_sets: u32,
    pub level: u32,
    pub favorites_count: u32,
}

/// Parse the bundled vocabulary list.
pub fn bundled_vocabulary() -> Vec<VocabularyItem> {
    serde_json::from_str(BUNDLED_VOCABULARY).expect("bundled vocabulary is valid JSON")
}

/// Distinct categories in first-appearance order.
pub fn categories(vocabulary: &[VocabularyItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for word in vocabulary {
        if !seen.contains(&word.category) {
            seen.push(word.category.clone());
        }
    }
    seen
}

/// All words belonging to one category.
pub fn words_in_category<'a>(
    vocabulary: &'a [VocabularyItem],
    category: &str,
) -> Vec<&'a VocabularyItem> {
    vocabulary.iter().filter(|w| w.category == category).collect()
}
