//! The `quizkit prefs` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::model::{Category, Difficulty};
use quizkit_core::user::{Theme, UserPreferences};

use super::Session;

pub struct PrefsArgs {
    pub theme: Option<Theme>,
    pub sound: Option<bool>,
    pub auto_submit: Option<bool>,
    pub explanations: Option<bool>,
    pub difficulty: Option<Difficulty>,
    pub categories: Vec<Category>,
}

impl PrefsArgs {
    fn is_empty(&self) -> bool {
        self.theme.is_none()
            && self.sound.is_none()
            && self.auto_submit.is_none()
            && self.explanations.is_none()
            && self.difficulty.is_none()
            && self.categories.is_empty()
    }

    fn apply(self, prefs: &mut UserPreferences) {
        if let Some(theme) = self.theme {
            prefs.theme = theme;
        }
        if let Some(sound) = self.sound {
            prefs.sound_enabled = sound;
        }
        if let Some(auto_submit) = self.auto_submit {
            prefs.auto_submit = auto_submit;
        }
        if let Some(explanations) = self.explanations {
            prefs.show_explanations = explanations;
        }
        if let Some(difficulty) = self.difficulty {
            prefs.default_difficulty = difficulty;
        }
        if !self.categories.is_empty() {
            prefs.preferred_categories = self
                .categories
                .iter()
                .map(|c| c.as_str().to_string())
                .collect();
        }
    }
}

pub fn execute(config_path: Option<PathBuf>, args: PrefsArgs) -> Result<()> {
    let mut session = Session::open(config_path)?;

    if !args.is_empty() {
        session.store.update_preferences(|prefs| args.apply(prefs));
        println!("Preferences updated.");
    }

    let prefs = session.store.preferences();
    println!("theme = {}", prefs.theme);
    println!("sound = {}", prefs.sound_enabled);
    println!("auto_submit = {}", prefs.auto_submit);
    println!("explanations = {}", prefs.show_explanations);
    println!("difficulty = {}", prefs.default_difficulty);
    println!("categories = [{}]", prefs.preferred_categories.join(", "));

    Ok(())
}
