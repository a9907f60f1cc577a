//! User profile and preferences.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

/// The local user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub stats: UserStats,
}

impl UserProfile {
    /// A new profile with default preferences and empty stats.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            username: username.into(),
            email: String::new(),
            avatar: None,
            created_at: now,
            last_login: now,
            preferences: UserPreferences::default(),
            stats: UserStats::default(),
        }
    }
}

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// User-selectable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default)]
    pub auto_submit: bool,
    #[serde(default = "default_true")]
    pub show_explanations: bool,
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,
    #[serde(default)]
    pub preferred_categories: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sound_enabled: true,
            auto_submit: false,
            show_explanations: true,
            default_difficulty: default_difficulty(),
            preferred_categories: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

/// Long-running per-user counters kept on the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub total_quizzes_taken: u32,
    pub total_questions_answered: u32,
    pub average_score: f64,
    pub best_score: f64,
    pub total_time_spent: u64,
    pub streak: u32,
    pub longest_streak: u32,
    pub achievements: Vec<Achievement>,
    pub level: u32,
    pub experience: u64,
}

/// An unlocked achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon_url: String,
    pub unlocked_at: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
}
