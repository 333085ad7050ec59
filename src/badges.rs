//! Achievement badges.
//!
//! Each badge is a one-way flag: once `earned` flips to true it never
//! reverts. Earning thresholds are resolved by badge id, so list position
//! carries no meaning beyond display order.

use serde::{Deserialize, Serialize};

use crate::models::StatsSnapshot;

/// A single achievement badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub requirement: String,
    pub earned: bool,
}

impl Badge {
    fn new(id: &str, name: &str, icon: &str, requirement: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            requirement: requirement.to_string(),
            earned: false,
        }
    }
}

/// Result of a badge evaluation sweep.
#[derive(Debug, Clone)]
pub struct BadgeCheck {
    pub badges: Vec<Badge>,
    pub newly_earned: bool,
}

/// Progress toward a single badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeProgress {
    pub current: u32,
    pub required: u32,
    pub percentage: u32,
}

/// The fixed badge list, all unearned.
pub fn default_badges() -> Vec<Badge> {
    vec![
        Badge::new("first_word", "İlk Kelime", "🎯", "İlk kelimeyi öğren"),
        Badge::new("ten_words", "10 Kelime", "⭐", "10 kelime öğren"),
        Badge::new("fifty_words", "50 Kelime Ustası", "🏆", "50 kelime öğren"),
        Badge::new("hundred_words", "100 Kelime Kahramanı", "👑", "100 kelime öğren"),
        Badge::new("streak_3", "3 Günlük Çalışma", "🔥", "3 gün üst üste çalış"),
        Badge::new("streak_7", "Bir Hafta", "💪", "7 gün üst üste çalış"),
        Badge::new("perfect_set", "Mükemmel Set", "💯", "Bir seti %100 doğru tamamla"),
        Badge::new("level_5", "Seviye 5", "🌟", "5. seviyeye ulaş"),
        Badge::new("speed_master", "Hız Ustası", "⚡", "50 kelimeyi 10 dakikada çalış"),
        Badge::new("favorites_10", "Favori Toplayıcı", "❤️", "10 favori ekle"),
    ]
}

/// (current, required) pair for a badge id, or None for badges with no
/// earning threshold. `speed_master` has none: session duration is not
/// tracked, so it stays permanently locked.
fn threshold(badge_id: &str, stats: &StatsSnapshot) -> Option<(u32, u32)> {
    match badge_id {
        "first_word" => Some((stats.total_words_studied, 1)),
        "ten_words" => Some((stats.total_words_studied, 10)),
        "fifty_words" => Some((stats.total_words_studied, 50)),
        "hundred_words" => Some((stats.total_words_studied, 100)),
        "streak_3" => Some((stats.streak, 3)),
        "streak_7" => Some((stats.streak, 7)),
        "perfect_set" => Some((stats.completed_sets, 1)),
        "level_5" => Some((stats.level, 5)),
        "favorites_10" => Some((stats.favorites_count, 10)),
        _ => None,
    }
}

/// Evaluate every unearned badge against the snapshot.
///
/// Several badges may newly earn in one sweep; already-earned badges are
/// never re-flagged.
pub fn check_badges(badges: &[Badge], stats: &StatsSnapshot) -> BadgeCheck {
    let mut updated = badges.to_vec();
    let mut newly_earned = false;

    for badge in &mut updated {
        if badge.earned {
            continue;
        }
        if let Some((current, required)) = threshold(&badge.id, stats) {
            if current >= required {
                badge.earned = true;
                newly_earned = true;
            }
        }
    }

    BadgeCheck {
        badges: updated,
        newly_earned,
    }
}

/// Number of earned badges.
pub fn earned_count(badges: &[Badge]) -> usize {
    badges.iter().filter(|b| b.earned).count()
}

/// Find a badge by id.
pub fn badge_by_id<'a>(badges: &'a [Badge], badge_id: &str) -> Option<&'a Badge> {
    badges.iter().find(|b| b.id == badge_id)
}

/// Whether a specific badge is earned.
pub fn is_earned(badges: &[Badge], badge_id: &str) -> bool {
    badge_by_id(badges, badge_id).map_or(false, |b| b.earned)
}

/// Fractional progress toward a badge. Unknown ids (and `speed_master`,
/// which has no threshold) report `0 / 1`.
pub fn badge_progress(badge_id: &str, stats: &StatsSnapshot) -> BadgeProgress {
    let Some((current, required)) = threshold(badge_id, stats) else {
        return BadgeProgress {
            current: 0,
            required: 1,
            percentage: 0,
        };
    };

    let percentage = ((current as f64 / required as f64) * 100.0).round() as u32;
    BadgeProgress {
        current,
        required,
        percentage: percentage.min(100),
    }
}
