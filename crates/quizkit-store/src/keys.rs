//! The fixed set of persisted record keys.

use std::fmt;
use std::str::FromStr;

/// Logical record classes, each stored under one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    UserProfile,
    QuizAttempts,
    /// Map of quiz id to in-flight progress.
    QuizProgress,
    UserPreferences,
    QuizStats,
    CurrentSession,
}

impl StorageKey {
    pub const ALL: [StorageKey; 6] = [
        StorageKey::UserProfile,
        StorageKey::QuizAttempts,
        StorageKey::QuizProgress,
        StorageKey::UserPreferences,
        StorageKey::QuizStats,
        StorageKey::CurrentSession,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::UserProfile => "quiz_user_profile",
            StorageKey::QuizAttempts => "quiz_attempts",
            StorageKey::QuizProgress => "quiz_progress",
            StorageKey::UserPreferences => "user_preferences",
            StorageKey::QuizStats => "quiz_stats",
            StorageKey::CurrentSession => "current_quiz_session",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown storage key: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_strings() {
        for key in StorageKey::ALL {
            assert_eq!(key.as_str().parse::<StorageKey>().unwrap(), key);
        }
        assert!("quiz_everything".parse::<StorageKey>().is_err());
    }
}
