//! Key-value persistence for every state slice.
//!
//! Each slice lives under a stable string key and is independently
//! readable and writable; there is no transactional grouping. Reads never
//! fail: a missing, unreadable, or malformed value falls back to the
//! slice's documented default, since losing one slice of progress beats
//! losing the session.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::analytics::Analytics;
use crate::badges::Badge;
use crate::models::Profile;

pub const KEY_PROFILE: &str = "profile";
pub const KEY_SCORE: &str = "score";
pub const KEY_STREAK: &str = "streak";
pub const KEY_LEVEL: &str = "level";
pub const KEY_STARS: &str = "stars";
pub const KEY_BADGES: &str = "badges";
pub const KEY_FAVORITES: &str = "favorites";
pub const KEY_DIFFICULT: &str = "difficult";
pub const KEY_EASY: &str = "easy";
pub const KEY_COMPLETED: &str = "completed";
pub const KEY_ANALYTICS: &str = "analytics";

/// Every key the store may write, for bulk clearing.
pub const ALL_KEYS: [&str; 11] = [
    KEY_PROFILE,
    KEY_SCORE,
    KEY_STREAK,
    KEY_LEVEL,
    KEY_STARS,
    KEY_BADGES,
    KEY_FAVORITES,
    KEY_DIFFICULT,
    KEY_EASY,
    KEY_COMPLETED,
    KEY_ANALYTICS,
];

/// Raw string-keyed persistence port. Swappable so the core stays testable
/// against an in-memory map.
pub trait Backend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-per-key backend under a data directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {:?}", dir))?;
        Ok(Self { dir })
    }

    /// Get default storage location.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vokabi")
    }

    fn slice_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slice_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read slice: {:?}", path))?;
        Ok(Some(value))
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slice_path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write slice: {:?}", path))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.slice_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove slice: {:?}", path))?;
        }
        Ok(())
    }
}

/// In-memory backend for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Typed accessors over a backend, one getter/setter pair per slice.
///
/// Numeric slices are stored as decimal strings, structured slices as JSON.
pub struct Store {
    backend: Box<dyn Backend>,
}

impl Store {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Open a file-backed store, creating the directory if needed.
    pub fn open(dir: PathBuf) -> Result<Self> {
        Ok(Self::new(FileBackend::new(dir)?))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("reading {key} failed, using default: {err:#}");
                None
            }
        }
    }

    fn read_u32(&self, key: &str, default: u32) -> u32 {
        let Some(raw) = self.read_raw(key) else {
            return default;
        };
        match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("{key} holds a non-numeric value, using default");
                default
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("{key} holds malformed JSON, using default: {err}");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.put(key, &json)
    }

    pub fn profile(&self) -> Profile {
        self.read_json(KEY_PROFILE).unwrap_or_default()
    }

    pub fn set_profile(&mut self, profile: &Profile) -> Result<()> {
        self.write_json(KEY_PROFILE, profile)
    }

    pub fn score(&self) -> u32 {
        self.read_u32(KEY_SCORE, 0)
    }

    pub fn set_score(&mut self, score: u32) -> Result<()> {
        self.backend.put(KEY_SCORE, &score.to_string())
    }

    pub fn streak(&self) -> u32 {
        self.read_u32(KEY_STREAK, 0)
    }

    pub fn set_streak(&mut self, streak: u32) -> Result<()> {
        self.backend.put(KEY_STREAK, &streak.to_string())
    }

    /// Level defaults to 1, not 0: a fresh user is on the first level.
    pub fn level(&self) -> u32 {
        self.read_u32(KEY_LEVEL, 1)
    }

    pub fn set_level(&mut self, level: u32) -> Result<()> {
        self.backend.put(KEY_LEVEL, &level.to_string())
    }

    pub fn stars(&self) -> u32 {
        self.read_u32(KEY_STARS, 0)
    }

    pub fn set_stars(&mut self, stars: u32) -> Result<()> {
        self.backend.put(KEY_STARS, &stars.to_string())
    }

    /// The badge list, or the caller-supplied default when absent.
    pub fn badges(&self, default: &[Badge]) -> Vec<Badge> {
        self.read_json(KEY_BADGES)
            .unwrap_or_else(|| default.to_vec())
    }

    pub fn set_badges(&mut self, badges: &[Badge]) -> Result<()> {
        self.write_json(KEY_BADGES, &badges)
    }

    pub fn favorites(&self) -> Vec<u32> {
        self.read_json(KEY_FAVORITES).unwrap_or_default()
    }

    pub fn set_favorites(&mut self, favorites: &[u32]) -> Result<()> {
        self.write_json(KEY_FAVORITES, &favorites)
    }

    pub fn difficult_words(&self) -> Vec<u32> {
        self.read_json(KEY_DIFFICULT).unwrap_or_default()
    }

    pub fn set_difficult_words(&mut self, ids: &[u32]) -> Result<()> {
        self.write_json(KEY_DIFFICULT, &ids)
    }

    pub fn easy_words(&self) -> Vec<u32> {
        self.read_json(KEY_EASY).unwrap_or_default()
    }

    pub fn set_easy_words(&mut self, ids: &[u32]) -> Result<()> {
        self.write_json(KEY_EASY, &ids)
    }

    pub fn completed_sets(&self) -> u32 {
        self.read_u32(KEY_COMPLETED, 0)
    }

    pub fn set_completed_sets(&mut self, completed: u32) -> Result<()> {
        self.backend.put(KEY_COMPLETED, &completed.to_string())
    }

    pub fn analytics(&self) -> Analytics {
        self.read_json(KEY_ANALYTICS).unwrap_or_default()
    }

    pub fn set_analytics(&mut self, analytics: &Analytics) -> Result<()> {
        self.write_json(KEY_ANALYTICS, analytics)
    }

    /// Remove every known key, resetting all getters to their defaults.
    pub fn clear_all(&mut self) -> Result<()> {
        for key in ALL_KEYS {
            self.backend.remove(key)?;
        }
        debug!("cleared all persisted slices");
        Ok(())
    }
}
