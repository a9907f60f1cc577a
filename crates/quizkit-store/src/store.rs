//! Typed persistence on top of a [`StorageProvider`].
//!
//! Every record class lives under its own [`StorageKey`] as a JSON document.
//! Provider and (de)serialization faults are logged and absorbed here: reads
//! fall back to a default and failed writes are dropped, so callers never
//! handle storage errors.

use std::collections::BTreeMap;

use quizkit_core::attempt::Attempt;
use quizkit_core::model::Category;
use quizkit_core::progress::QuizProgress;
use quizkit_core::statistics::QuizStats;
use quizkit_core::user::{UserPreferences, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::keys::StorageKey;
use crate::provider::StorageProvider;

/// In-flight progress, keyed by quiz id.
pub type ProgressMap = BTreeMap<String, QuizProgress>;

/// Quiz data persisted through an injected storage provider.
pub struct QuizStore<P: StorageProvider = Box<dyn StorageProvider>> {
    provider: P,
}

impl<P: StorageProvider> QuizStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Read and decode the record under `key`, or `default` if it is missing
    /// or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        let raw = match self.provider.get(key.as_str()) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(e) => {
                tracing::error!("error reading {key} from {}: {e}", self.provider.name());
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("error decoding {key}: {e}");
                default
            }
        }
    }

    /// Encode and store `value` under `key`. Failures are logged and the
    /// write is dropped.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: StorageKey, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("error encoding {key}: {e}");
                return;
            }
        };
        self.write_raw(key, &raw);
    }

    fn write_raw(&mut self, key: StorageKey, raw: &str) {
        match self.provider.set(key.as_str(), raw) {
            Ok(()) => tracing::debug!("stored {key} ({} bytes)", raw.len()),
            Err(e) => tracing::error!("error writing {key} to {}: {e}", self.provider.name()),
        }
    }

    fn remove(&mut self, key: StorageKey) {
        if let Err(e) = self.provider.remove(key.as_str()) {
            tracing::error!("error removing {key} from {}: {e}", self.provider.name());
        }
    }

    // --- user profile ---

    pub fn user_profile(&self) -> Option<UserProfile> {
        self.get(StorageKey::UserProfile, None)
    }

    pub fn set_user_profile(&mut self, profile: &UserProfile) {
        self.set(StorageKey::UserProfile, profile);
    }

    pub fn clear_user_profile(&mut self) {
        self.remove(StorageKey::UserProfile);
    }

    // --- attempts ---

    /// Every stored attempt, oldest first.
    pub fn attempts(&self) -> Vec<Attempt> {
        self.get(StorageKey::QuizAttempts, Vec::new())
    }

    /// Replace the stored attempt with the same id, or append a new one.
    pub fn save_attempt(&mut self, attempt: &Attempt) {
        let mut attempts = self.attempts();
        match attempts.iter_mut().find(|a| a.id == attempt.id) {
            Some(existing) => *existing = attempt.clone(),
            None => attempts.push(attempt.clone()),
        }
        self.set(StorageKey::QuizAttempts, &attempts);
    }

    pub fn attempts_for_quiz(&self, quiz_id: &str) -> Vec<Attempt> {
        self.attempts()
            .into_iter()
            .filter(|a| a.quiz_id == quiz_id)
            .collect()
    }

    pub fn attempts_for_user(&self, user_id: &str) -> Vec<Attempt> {
        self.attempts()
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect()
    }

    // --- progress ---

    pub fn all_progress(&self) -> ProgressMap {
        self.get(StorageKey::QuizProgress, ProgressMap::new())
    }

    pub fn progress(&self, quiz_id: &str) -> Option<QuizProgress> {
        self.all_progress().remove(quiz_id)
    }

    pub fn save_progress(&mut self, quiz_id: &str, progress: &QuizProgress) {
        let mut all = self.all_progress();
        all.insert(quiz_id.to_string(), progress.clone());
        self.set(StorageKey::QuizProgress, &all);
    }

    pub fn clear_progress(&mut self, quiz_id: &str) {
        let mut all = self.all_progress();
        if all.remove(quiz_id).is_some() {
            self.set(StorageKey::QuizProgress, &all);
        }
    }

    pub fn clear_all_progress(&mut self) {
        self.remove(StorageKey::QuizProgress);
    }

    // --- preferences ---

    pub fn preferences(&self) -> UserPreferences {
        self.get(StorageKey::UserPreferences, UserPreferences::default())
    }

    pub fn set_preferences(&mut self, preferences: &UserPreferences) {
        self.set(StorageKey::UserPreferences, preferences);
    }

    /// Read-modify-write the stored preferences.
    pub fn update_preferences(&mut self, update: impl FnOnce(&mut UserPreferences)) {
        let mut preferences = self.preferences();
        update(&mut preferences);
        self.set_preferences(&preferences);
    }

    // --- statistics ---

    pub fn stats(&self) -> QuizStats {
        self.get(StorageKey::QuizStats, QuizStats::default())
    }

    /// Fold `attempt` into the stored statistics.
    pub fn record_stats(&mut self, attempt: &Attempt, category: Option<Category>) {
        let mut stats = self.stats();
        stats.record(attempt, category);
        self.set(StorageKey::QuizStats, &stats);
    }

    /// Store a finished attempt: save it, fold it into the statistics and
    /// drop the quiz's in-flight progress.
    pub fn finish_attempt(&mut self, attempt: &Attempt, category: Option<Category>) {
        self.save_attempt(attempt);
        self.record_stats(attempt, category);
        self.clear_progress(&attempt.quiz_id);
        tracing::info!(
            "recorded attempt {} on {} ({}%)",
            attempt.id,
            attempt.quiz_id,
            attempt.percentage
        );
    }

    // --- session ---

    pub fn current_session(&self) -> Option<Value> {
        self.get(StorageKey::CurrentSession, None)
    }

    pub fn set_current_session(&mut self, session: &Value) {
        self.set(StorageKey::CurrentSession, session);
    }

    pub fn clear_current_session(&mut self) {
        self.remove(StorageKey::CurrentSession);
    }

    // --- bulk ---

    /// Snapshot every stored record, keyed by storage key.
    ///
    /// Records that are not valid JSON are exported as raw strings.
    pub fn export_all(&self) -> BTreeMap<String, Value> {
        let mut data = BTreeMap::new();
        for key in StorageKey::ALL {
            let raw = match self.provider.get(key.as_str()) {
                Ok(Some(raw)) if !raw.is_empty() => raw,
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!("error exporting {key}: {e}");
                    continue;
                }
            };
            let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            data.insert(key.to_string(), value);
        }
        data
    }

    /// Restore records from a snapshot made by [`export_all`](Self::export_all).
    ///
    /// Unknown keys and failed writes are logged and skipped.
    pub fn import_all(&mut self, data: &BTreeMap<String, Value>) {
        for (name, value) in data {
            match name.parse::<StorageKey>() {
                Ok(key) => self.set(key, value),
                Err(e) => tracing::warn!("skipping import: {e}"),
            }
        }
    }

    /// Remove every record.
    pub fn clear_all(&mut self) {
        for key in StorageKey::ALL {
            self.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MemoryStorage, NoopStorage};
    use chrono::{TimeZone, Utc};
    use quizkit_core::answer::{Answer, Answers};
    use quizkit_core::user::Theme;
    use serde_json::json;

    fn store() -> QuizStore<MemoryStorage> {
        QuizStore::new(MemoryStorage::new())
    }

    fn attempt(id: &str, quiz_id: &str, percentage: f64, completed: bool) -> Attempt {
        Attempt {
            id: id.into(),
            quiz_id: quiz_id.into(),
            user_id: "user_1".into(),
            start_time: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            end_time: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 2, 0).unwrap()),
            answers: Answers::from([("q1".to_string(), Answer::Choice("a".into()))]),
            score: 10,
            percentage,
            time_spent: 120,
            completed,
            passed: percentage >= 70.0,
        }
    }

    #[test]
    fn get_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set("quiz_stats", "{not json").unwrap();
        storage.set("quiz_attempts", "").unwrap();
        let store = QuizStore::new(storage);
        assert_eq!(store.stats(), QuizStats::default());
        assert!(store.attempts().is_empty());
        assert!(store.user_profile().is_none());
    }

    #[test]
    fn stats_scenario_from_empty() {
        let mut store = store();
        let stats = store.stats();
        assert_eq!(
            (stats.total_quizzes, stats.completed_quizzes, stats.best_score, stats.average_score),
            (0, 0, 0.0, 0.0)
        );

        store.record_stats(&attempt("a1", "math", 80.0, true), Some(Category::Mathematics));
        let stats = store.stats();
        assert_eq!(
            (stats.total_quizzes, stats.completed_quizzes, stats.best_score, stats.average_score),
            (1, 1, 80.0, 80.0)
        );
        assert_eq!(stats.category_stats[&Category::Mathematics].completed, 1);
    }

    #[test]
    fn save_attempt_upserts_by_id() {
        let mut store = store();
        store.save_attempt(&attempt("a1", "math", 50.0, true));
        store.save_attempt(&attempt("a2", "science", 60.0, true));
        store.save_attempt(&attempt("a1", "math", 90.0, true));

        let attempts = store.attempts();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].id, "a1");
        assert_eq!(attempts[0].percentage, 90.0);
        assert_eq!(attempts[1].id, "a2");

        assert_eq!(store.attempts_for_quiz("science").len(), 1);
        assert_eq!(store.attempts_for_user("user_1").len(), 2);
        assert!(store.attempts_for_user("nobody").is_empty());
    }

    #[test]
    fn progress_is_kept_per_quiz() {
        let mut store = store();
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut progress = QuizProgress::start(start);
        progress.advance(3);
        store.save_progress("math", &progress);
        store.save_progress("science", &QuizProgress::start(start));

        assert_eq!(store.progress("math").unwrap().current_question_index, 1);
        store.clear_progress("math");
        assert!(store.progress("math").is_none());
        assert!(store.progress("science").is_some());

        store.clear_all_progress();
        assert!(store.all_progress().is_empty());
    }

    #[test]
    fn finish_attempt_records_and_clears_progress() {
        let mut store = store();
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        store.save_progress("math", &QuizProgress::start(start));

        store.finish_attempt(&attempt("a1", "math", 100.0, true), Some(Category::Mathematics));
        assert_eq!(store.attempts().len(), 1);
        assert_eq!(store.stats().best_score, 100.0);
        assert!(store.progress("math").is_none());
    }

    #[test]
    fn preferences_update_in_place() {
        let mut store = store();
        assert_eq!(store.preferences(), UserPreferences::default());
        store.update_preferences(|p| {
            p.theme = Theme::Dark;
            p.sound_enabled = false;
        });
        let prefs = store.preferences();
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(!prefs.sound_enabled);
        assert!(prefs.show_explanations);
    }

    #[test]
    fn profile_and_session_lifecycle() {
        let mut store = store();
        let profile = UserProfile::new("user_1", "ada");
        store.set_user_profile(&profile);
        assert_eq!(store.user_profile(), Some(profile));
        store.clear_user_profile();
        assert!(store.user_profile().is_none());

        let session = json!({"quiz_id": "math", "step": 2});
        store.set_current_session(&session);
        assert_eq!(store.current_session(), Some(session));
        store.clear_current_session();
        assert!(store.current_session().is_none());
    }

    #[test]
    fn export_import_round_trip() {
        let mut store = store();
        store.set_user_profile(&UserProfile::new("user_1", "ada"));
        store.finish_attempt(&attempt("a1", "math", 80.0, true), Some(Category::Mathematics));
        store.save_progress(
            "science",
            &QuizProgress::start(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
        );
        store.update_preferences(|p| p.theme = Theme::Dark);
        store.set_current_session(&json!("opaque"));

        let snapshot = store.export_all();
        assert_eq!(snapshot.len(), 6);

        let mut restored = QuizStore::new(MemoryStorage::new());
        restored.import_all(&snapshot);
        assert_eq!(restored.user_profile(), store.user_profile());
        assert_eq!(restored.attempts(), store.attempts());
        assert_eq!(restored.all_progress(), store.all_progress());
        assert_eq!(restored.preferences(), store.preferences());
        assert_eq!(restored.stats(), store.stats());
        assert_eq!(restored.current_session(), Some(json!("opaque")));
        assert_eq!(restored.export_all(), snapshot);
    }

    #[test]
    fn export_keeps_unparseable_records_as_strings() {
        let mut storage = MemoryStorage::new();
        storage.set("quiz_stats", "{broken").unwrap();
        let store = QuizStore::new(storage);
        let snapshot = store.export_all();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["quiz_stats"], json!("{broken"));
    }

    #[test]
    fn import_skips_unknown_keys() {
        let mut store = store();
        let data = BTreeMap::from([
            ("mystery".to_string(), json!(1)),
            ("user_preferences".to_string(), json!({"theme": "dark"})),
        ]);
        store.import_all(&data);
        assert_eq!(store.preferences().theme, Theme::Dark);
        assert_eq!(store.provider().len(), 1);
    }

    #[test]
    fn clear_all_removes_every_record() {
        let mut store = store();
        store.save_attempt(&attempt("a1", "math", 80.0, true));
        store.update_preferences(|p| p.auto_submit = true);
        store.clear_all();
        assert!(store.provider().is_empty());
        assert!(store.export_all().is_empty());
    }

    #[test]
    fn failed_writes_are_dropped() {
        let mut store = QuizStore::new(MemoryStorage::new().with_quota(64));
        store.save_attempt(&attempt("a1", "math", 80.0, true));
        assert!(store.attempts().is_empty());
        store.update_preferences(|p| p.theme = Theme::Dark);
        assert_eq!(store.preferences().theme, Theme::Light);
    }

    #[test]
    fn noop_storage_returns_defaults() {
        let mut store = QuizStore::new(NoopStorage);
        store.save_attempt(&attempt("a1", "math", 80.0, true));
        store.record_stats(&attempt("a1", "math", 80.0, true), None);
        assert!(store.attempts().is_empty());
        assert_eq!(store.stats(), QuizStats::default());
        assert!(store.export_all().is_empty());
    }

    #[test]
    fn boxed_provider_is_the_default_parameter() {
        let mut store: QuizStore = QuizStore::new(Box::new(MemoryStorage::new()));
        store.save_attempt(&attempt("a1", "math", 80.0, true));
        assert_eq!(store.attempts().len(), 1);
    }
}
