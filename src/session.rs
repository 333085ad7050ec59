//! Study sessions: card construction and in-session position tracking.
//!
//! A card's front/back orientation is decided once when the session is
//! built. Re-rolling the orientation on every flip or render would make a
//! card change language mid-session, so the assignment is stored on the
//! card itself.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::VocabularyItem;

/// Language of one card face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lang {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "tr")]
    Tr,
}

/// Which side of the pair faces up first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyMode {
    #[serde(rename = "en-tr")]
    EnglishToTurkish,
    #[serde(rename = "tr-en")]
    TurkishToEnglish,
    /// Coin-flip orientation per card.
    #[serde(rename = "shuffle")]
    Shuffle,
}

impl Default for StudyMode {
    fn default() -> Self {
        Self::EnglishToTurkish
    }
}

/// A vocabulary item with its orientation fixed for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyCard {
    pub word: VocabularyItem,
    pub front: String,
    pub back: String,
    pub front_lang: Lang,
    pub back_lang: Lang,
}

impl StudyCard {
    fn new(word: &VocabularyItem, english_front: bool) -> Self {
        let (front, back, front_lang, back_lang) = if english_front {
            (word.english.clone(), word.turkish.clone(), Lang::En, Lang::Tr)
        } else {
            (word.turkish.clone(), word.english.clone(), Lang::Tr, Lang::En)
        };

        Self {
            word: word.clone(),
            front,
            back,
            front_lang,
            back_lang,
        }
    }
}

/// Build the card list for a session: orientation per mode, then the card
/// order is shuffled.
pub fn build_study_cards<R: Rng>(
    words: &[VocabularyItem],
    mode: StudyMode,
    rng: &mut R,
) -> Vec<StudyCard> {
    let mut cards: Vec<StudyCard> = words
        .iter()
        .map(|word| {
            let english_front = match mode {
                StudyMode::EnglishToTurkish => true,
                StudyMode::TurkishToEnglish => false,
                StudyMode::Shuffle => rng.gen_bool(0.5),
            };
            StudyCard::new(word, english_front)
        })
        .collect();

    cards.shuffle(rng);
    cards
}

/// One active study run over a category.
#[derive(Debug, Clone)]
pub struct StudySession {
    category: String,
    cards: Vec<StudyCard>,
    position: usize,
}

impl StudySession {
    pub fn new(category: String, cards: Vec<StudyCard>) -> Self {
        Self {
            category,
            cards,
            position: 0,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The card currently facing the user, if any remain.
    pub fn current_card(&self) -> Option<&StudyCard> {
        self.cards.get(self.position)
    }

    /// Whether the current card is the final one.
    pub fn on_last_card(&self) -> bool {
        !self.cards.is_empty() && self.position == self.cards.len() - 1
    }

    /// Move to the next card.
    pub fn advance(&mut self) {
        if self.position < self.cards.len() {
            self.position += 1;
        }
    }
}
