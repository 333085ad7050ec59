//! Vokabi - English/Turkish vocabulary flashcard trainer core
//!
//! Headless engine for a flashcard trainer: a user studies word pairs,
//! marks answers correct or incorrect, and accumulates score, streaks,
//! levels, badges, and per-category accuracy analytics. Every state
//! transition is a pure function; [`App`] wires them to a key-value
//! [`storage::Store`] so a view layer only has to forward events and
//! render the results.

pub mod analytics;
pub mod app;
pub mod badges;
pub mod config;
pub mod models;
pub mod score;
pub mod session;
pub mod storage;

pub use analytics::Analytics;
pub use app::{AnswerOutcome, App};
pub use badges::{Badge, BadgeCheck, BadgeProgress};
pub use config::Config;
pub use models::{Profile, Progress, StatsSnapshot, VocabularyItem};
pub use session::{Lang, StudyCard, StudyMode, StudySession};
pub use storage::{Backend, FileBackend, MemoryBackend, Store};
