//! Main application state and logic.
//!
//! Every UI event maps to one synchronous method: it runs the pure update
//! functions, persists the touched slices, and reports what happened so the
//! view can drive its reward popups.

use anyhow::Result;
use chrono::Local;
use rand::thread_rng;

use crate::analytics::{self, Analytics, StrugglingWord, DEFAULT_STRUGGLING_LIMIT};
use crate::badges::{self, Badge};
use crate::config::Config;
use crate::models::{self, Profile, Progress, StatsSnapshot, VocabularyItem};
use crate::score;
use crate::session::{build_study_cards, StudyCard, StudyMode, StudySession};
use crate::storage::{FileBackend, Store};

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

/// What a single answer changed, for the view's reward popups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Points awarded, 0 for an incorrect answer.
    pub points: u32,
    pub leveled_up: bool,
    pub new_badges: bool,
    pub session_complete: bool,
}

pub struct App {
    store: Store,
    config: Config,
    vocabulary: Vec<VocabularyItem>,

    profile: Profile,
    progress: Progress,
    badges: Vec<Badge>,
    favorites: Vec<u32>,
    difficult_words: Vec<u32>,
    easy_words: Vec<u32>,
    analytics: Analytics,

    session: Option<StudySession>,
}

impl App {
    pub fn new(store: Store, config: Config) -> Self {
        Self::with_vocabulary(store, config, models::bundled_vocabulary())
    }

    /// Build an app over a custom word list instead of the bundled one.
    pub fn with_vocabulary(
        store: Store,
        config: Config,
        vocabulary: Vec<VocabularyItem>,
    ) -> Self {
        let profile = store.profile();
        let mut progress = Progress {
            score: store.score(),
            streak: store.streak(),
            level: store.level(),
            stars: store.stars(),
            completed_sets: store.completed_sets(),
        };
        // The persisted level is only a cache of the score
        progress.level = score::level_for_score(progress.score);

        let badges = store.badges(&badges::default_badges());
        let favorites = store.favorites();
        let difficult_words = store.difficult_words();
        let easy_words = store.easy_words();
        let analytics = store.analytics();

        Self {
            store,
            config,
            vocabulary,
            profile,
            progress,
            badges,
            favorites,
            difficult_words,
            easy_words,
            analytics,
            session: None,
        }
    }

    /// Open the store at the configured (or default) location.
    pub fn open_default() -> Result<Self> {
        let config = Config::load().unwrap_or_default();
        let data_dir = config
            .data_dir
            .clone()
            .unwrap_or_else(FileBackend::default_path);
        let store = Store::open(data_dir)?;
        Ok(Self::new(store, config))
    }

    // ══════════════════════════════════════════════════════════════════════
    // Events
    // ══════════════════════════════════════════════════════════════════════

    /// Replace the profile. Called once at onboarding.
    pub fn create_profile(&mut self, name: &str, emoji: &str) -> Result<()> {
        self.profile = Profile {
            name: name.to_string(),
            emoji: emoji.to_string(),
        };
        self.store.set_profile(&self.profile)
    }

    /// Begin a study run over one category.
    pub fn start_session(&mut self, category: &str, mode: StudyMode) -> Result<()> {
        let words: Vec<VocabularyItem> = models::words_in_category(&self.vocabulary, category)
            .into_iter()
            .cloned()
            .collect();
        let cards = build_study_cards(&words, mode, &mut thread_rng());
        self.session = Some(StudySession::new(category.to_string(), cards));

        self.analytics = self.analytics.session_started(Local::now().date_naive());
        self.store.set_analytics(&self.analytics)
    }

    /// Answer the current card. Returns `None` when no card is up.
    pub fn answer(&mut self, correct: bool) -> Result<Option<AnswerOutcome>> {
        let (word, category, on_last, session_len) = match &self.session {
            Some(session) => match session.current_card() {
                Some(card) => (
                    card.word.clone(),
                    session.category().to_string(),
                    session.on_last_card(),
                    session.len() as u32,
                ),
                None => return Ok(None),
            },
            None => return Ok(None),
        };

        let mut outcome = AnswerOutcome::default();

        if correct {
            let points = score::bonus_points(self.progress.streak);
            self.progress.score += points;
            self.progress.streak += 1;
            self.progress.stars += 1;
            outcome.points = points;

            // A word answered correctly is no longer difficult
            if !self.easy_words.contains(&word.id) {
                self.easy_words.push(word.id);
            }
            self.difficult_words.retain(|&id| id != word.id);
        } else {
            self.progress.streak = 0;

            if !self.difficult_words.contains(&word.id) {
                self.difficult_words.push(word.id);
            }
            self.easy_words.retain(|&id| id != word.id);
        }

        self.analytics = self.analytics.word_studied(&word, correct, &category);

        if score::should_level_up(self.progress.score, self.progress.level) {
            self.progress.level = score::level_for_score(self.progress.score);
            outcome.leveled_up = true;
        }

        if on_last {
            self.progress.completed_sets += 1;
            self.analytics = self
                .analytics
                .session_ended(&category, session_len, Local::now());
            self.session = None;
            outcome.session_complete = true;
        } else if let Some(session) = self.session.as_mut() {
            session.advance();
        }

        // Badges see the fully updated counters, including set completion
        let check = badges::check_badges(&self.badges, &self.stats_snapshot());
        outcome.new_badges = check.newly_earned;
        self.badges = check.badges;

        self.persist_progress()?;
        self.store.set_easy_words(&self.easy_words)?;
        self.store.set_difficult_words(&self.difficult_words)?;
        self.store.set_analytics(&self.analytics)?;
        self.store.set_badges(&self.badges)?;

        Ok(Some(outcome))
    }

    /// Toggle a word's favorite flag. Returns whether it is now favorited.
    pub fn toggle_favorite(&mut self, word_id: u32) -> Result<bool> {
        let added = match self.favorites.iter().position(|&id| id == word_id) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(word_id);
                true
            }
        };
        self.store.set_favorites(&self.favorites)?;

        // The favorites count feeds a badge threshold
        let check = badges::check_badges(&self.badges, &self.stats_snapshot());
        self.badges = check.badges;
        if check.newly_earned {
            self.store.set_badges(&self.badges)?;
        }

        Ok(added)
    }

    /// Wipe every persisted slice and return to the fresh-user state.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear_all()?;
        self.profile = Profile::default();
        self.progress = Progress::default();
        self.badges = badges::default_badges();
        self.favorites.clear();
        self.difficult_words.clear();
        self.easy_words.clear();
        self.analytics = Analytics::default();
        self.session = None;
        Ok(())
    }

    fn persist_progress(&mut self) -> Result<()> {
        self.store.set_score(self.progress.score)?;
        self.store.set_streak(self.progress.streak)?;
        self.store.set_level(self.progress.level)?;
        self.store.set_stars(self.progress.stars)?;
        self.store.set_completed_sets(self.progress.completed_sets)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Views
    // ══════════════════════════════════════════════════════════════════════

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn favorites(&self) -> &[u32] {
        &self.favorites
    }

    pub fn is_favorite(&self, word_id: u32) -> bool {
        self.favorites.contains(&word_id)
    }

    pub fn difficult_words(&self) -> &[u32] {
        &self.difficult_words
    }

    pub fn easy_words(&self) -> &[u32] {
        &self.easy_words
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn vocabulary(&self) -> &[VocabularyItem] {
        &self.vocabulary
    }

    pub fn categories(&self) -> Vec<String> {
        models::categories(&self.vocabulary)
    }

    pub fn words_in_category(&self, category: &str) -> Vec<&VocabularyItem> {
        models::words_in_category(&self.vocabulary, category)
    }

    pub fn current_card(&self) -> Option<&StudyCard> {
        self.session.as_ref().and_then(|s| s.current_card())
    }

    pub fn session(&self) -> Option<&StudySession> {
        self.session.as_ref()
    }

    pub fn stats_snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_words_studied: self.analytics.total_words_studied,
            streak: self.progress.streak,
            completed_sets: self.progress.completed_sets,
            level: self.progress.level,
            favorites_count: self.favorites.len() as u32,
        }
    }

    /// The most-missed words, capped at `DEFAULT_STRUGGLING_LIMIT`.
    pub fn struggling_words(&self) -> Vec<StrugglingWord> {
        analytics::top_struggling(&self.analytics.struggling_words, DEFAULT_STRUGGLING_LIMIT)
    }

    pub fn overall_accuracy(&self) -> u32 {
        analytics::overall_accuracy(&self.analytics.accuracy_by_category)
    }

    pub fn category_accuracy(&self, category: &str) -> u32 {
        analytics::category_accuracy(self.analytics.accuracy_by_category.get(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::is_earned;

    fn word(id: u32, category: &str) -> VocabularyItem {
        VocabularyItem {
            id,
            english: format!("word-{id}"),
            turkish: format!("kelime-{id}"),
            pronunciation: String::new(),
            category: category.to_string(),
        }
    }

    fn app_with_words(words: Vec<VocabularyItem>) -> App {
        App::with_vocabulary(Store::in_memory(), Config::default(), words)
    }

    fn bundled_app() -> App {
        App::new(Store::in_memory(), Config::default())
    }

    #[test]
    fn new_user_earns_first_word_only() {
        let mut app = bundled_app();
        app.start_session("Academic & General", StudyMode::EnglishToTurkish)
            .unwrap();

        let outcome = app.answer(true).unwrap().unwrap();

        assert_eq!(outcome.points, 10);
        assert!(outcome.new_badges);
        assert!(!outcome.leveled_up);
        assert!(!outcome.session_complete);

        assert!(is_earned(app.badges(), "first_word"));
        assert_eq!(badges::earned_count(app.badges()), 1);

        assert_eq!(app.progress().score, 10);
        assert_eq!(app.progress().streak, 1);
        assert_eq!(app.progress().stars, 1);
        assert_eq!(app.analytics().total_words_studied, 1);
        assert_eq!(app.analytics().study_sessions, 1);
        assert_eq!(app.category_accuracy("Academic & General"), 100);
    }

    #[test]
    fn incorrect_answer_resets_streak_and_marks_difficult() {
        let mut app = app_with_words(vec![word(1, "X"), word(2, "X")]);
        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();

        app.answer(true).unwrap().unwrap();
        assert_eq!(app.progress().streak, 1);

        let answered = app.current_card().unwrap().word.id;
        let outcome = app.answer(false).unwrap().unwrap();

        assert_eq!(outcome.points, 0);
        assert_eq!(app.progress().streak, 0);
        assert_eq!(app.difficult_words(), &[answered]);
        assert_eq!(app.struggling_words().len(), 1);
        assert_eq!(app.struggling_words()[0].mistakes, 1);
    }

    #[test]
    fn correct_answer_moves_word_from_difficult_to_easy() {
        let mut app = app_with_words(vec![word(1, "X")]);

        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();
        app.answer(false).unwrap().unwrap();
        assert_eq!(app.difficult_words(), &[1]);
        assert!(app.easy_words().is_empty());

        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();
        app.answer(true).unwrap().unwrap();
        assert!(app.difficult_words().is_empty());
        assert_eq!(app.easy_words(), &[1]);
    }

    #[test]
    fn incorrect_answer_moves_word_from_easy_to_difficult() {
        let mut app = app_with_words(vec![word(1, "X")]);

        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();
        app.answer(true).unwrap().unwrap();
        assert_eq!(app.easy_words(), &[1]);

        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();
        app.answer(false).unwrap().unwrap();
        assert_eq!(app.difficult_words(), &[1]);
        assert!(app.easy_words().is_empty());
    }

    #[test]
    fn finishing_the_last_card_completes_the_set() {
        let mut app = app_with_words(vec![word(1, "X")]);
        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();

        let outcome = app.answer(true).unwrap().unwrap();

        assert!(outcome.session_complete);
        assert_eq!(app.progress().completed_sets, 1);
        assert!(app.session().is_none());
        assert!(is_earned(app.badges(), "perfect_set"));

        let history = &app.analytics().session_history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].category, "X");
        assert_eq!(history[0].words_studied, 1);
    }

    #[test]
    fn answer_without_a_session_is_a_no_op() {
        let mut app = bundled_app();
        assert!(app.answer(true).unwrap().is_none());
    }

    #[test]
    fn streak_bonus_kicks_in_at_five() {
        let mut store = Store::in_memory();
        store.set_streak(5).unwrap();
        let mut app =
            App::with_vocabulary(store, Config::default(), vec![word(1, "X"), word(2, "X")]);

        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();
        let outcome = app.answer(true).unwrap().unwrap();
        assert_eq!(outcome.points, 15);
    }

    #[test]
    fn crossing_a_score_band_levels_up_once() {
        let mut store = Store::in_memory();
        store.set_score(195).unwrap();
        let mut app =
            App::with_vocabulary(store, Config::default(), vec![word(1, "X"), word(2, "X")]);
        assert_eq!(app.progress().level, 1);

        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();
        let outcome = app.answer(true).unwrap().unwrap();

        assert!(outcome.leveled_up);
        assert_eq!(app.progress().level, 2);
        assert_eq!(app.progress().score, 205);

        let outcome = app.answer(true).unwrap().unwrap();
        assert!(!outcome.leveled_up);
    }

    #[test]
    fn loading_reconciles_a_stale_level_cache() {
        let mut store = Store::in_memory();
        store.set_score(450).unwrap();
        store.set_level(1).unwrap();

        let app = App::with_vocabulary(store, Config::default(), Vec::new());
        assert_eq!(app.progress().level, 3);
    }

    #[test]
    fn toggling_favorites_adds_then_removes() {
        let mut app = bundled_app();
        assert!(app.toggle_favorite(7).unwrap());
        assert!(app.is_favorite(7));
        assert!(!app.toggle_favorite(7).unwrap());
        assert!(!app.is_favorite(7));
    }

    #[test]
    fn tenth_favorite_earns_the_collector_badge() {
        let mut app = bundled_app();
        for id in 1..=9 {
            app.toggle_favorite(id).unwrap();
        }
        assert!(!is_earned(app.badges(), "favorites_10"));

        app.toggle_favorite(10).unwrap();
        assert!(is_earned(app.badges(), "favorites_10"));
    }

    #[test]
    fn profile_creation_persists() {
        let mut app = bundled_app();
        app.create_profile("Elif", "🌸").unwrap();
        assert_eq!(app.profile().name, "Elif");
        assert_eq!(app.profile().emoji, "🌸");
    }

    #[test]
    fn reset_returns_to_fresh_defaults() {
        let mut app = app_with_words(vec![word(1, "X")]);
        app.create_profile("Can", "⭐").unwrap();
        app.start_session("X", StudyMode::EnglishToTurkish).unwrap();
        app.answer(true).unwrap().unwrap();
        app.toggle_favorite(1).unwrap();

        app.reset().unwrap();

        assert_eq!(app.profile(), &Profile::default());
        assert_eq!(app.progress(), Progress::default());
        assert!(app.favorites().is_empty());
        assert!(app.easy_words().is_empty());
        assert_eq!(app.analytics(), &Analytics::default());
        assert_eq!(badges::earned_count(app.badges()), 0);
    }

    #[test]
    fn state_survives_a_reload_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let words = vec![word(1, "X"), word(2, "X")];

        {
            let store = Store::open(dir.path().to_path_buf()).unwrap();
            let mut app = App::with_vocabulary(store, Config::default(), words.clone());
            app.start_session("X", StudyMode::EnglishToTurkish).unwrap();
            app.answer(true).unwrap().unwrap();
            app.toggle_favorite(2).unwrap();
        }

        let store = Store::open(dir.path().to_path_buf()).unwrap();
        let app = App::with_vocabulary(store, Config::default(), words);

        assert_eq!(app.progress().score, 10);
        assert_eq!(app.progress().streak, 1);
        assert!(app.is_favorite(2));
        assert_eq!(app.analytics().total_words_studied, 1);
        assert!(is_earned(app.badges(), "first_word"));
    }
}
