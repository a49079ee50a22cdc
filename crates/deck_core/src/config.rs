//! Deck configuration

use crate::command::CommandId;
use crate::DeckError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main deck configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub general: GeneralConfig,
    pub deck: DeckSettings,
    pub input: InputConfig,
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            deck: DeckSettings::default(),
            input: InputConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: "fr".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckSettings {
    /// Number of slides in the deck
    pub total_slides: usize,
    /// Delay between hiding the old slide and showing the new one; 0 disables it
    pub transition_delay_ms: u64,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            total_slides: 36,
            transition_delay_ms: 50,
        }
    }
}

impl DeckSettings {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum horizontal travel (px) for a swipe to count
    pub swipe_threshold_px: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
        }
    }
}

impl DeckConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self, DeckError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self, DeckError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), DeckError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), DeckError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "SlideDeck", "SlideDeck")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();

    // Navigation (nav.*)
    kb.insert(CommandId::NAV_PREV.into(), vec!["Left".into(), "Up".into()]);
    kb.insert(
        CommandId::NAV_NEXT.into(),
        vec!["Right".into(), "Down".into(), "Space".into()],
    );
    kb.insert(CommandId::NAV_FIRST.into(), vec!["Home".into()]);
    kb.insert(CommandId::NAV_LAST.into(), vec!["End".into()]);

    // App (app.*)
    kb.insert(CommandId::APP_HELP.into(), vec!["h".into()]);
    kb.insert(CommandId::APP_TOGGLE_FULLSCREEN.into(), vec!["f".into()]);
    kb.insert(CommandId::APP_CLOSE_HELP.into(), vec!["Escape".into()]);

    kb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeckConfig::default();
        assert_eq!(config.deck.total_slides, 36);
        assert_eq!(config.deck.transition_delay(), Duration::from_millis(50));
        assert_eq!(config.general.language, "fr");
        assert_eq!(config.keybindings[CommandId::NAV_FIRST], vec!["Home".to_string()]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: DeckConfig = toml::from_str("[deck]\ntotal_slides = 12\n").unwrap();
        assert_eq!(config.deck.total_slides, 12);
        assert_eq!(config.deck.transition_delay_ms, 50);
        assert_eq!(config.input.swipe_threshold_px, 50.0);
        assert!(config.keybindings.contains_key(CommandId::NAV_NEXT));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = DeckConfig::default();
        config.general.language = "en".into();
        config.deck.transition_delay_ms = 0;
        config.save_to(&path).unwrap();

        let loaded = DeckConfig::load_from(&path).unwrap();
        assert_eq!(loaded.general.language, "en");
        assert_eq!(loaded.deck.transition_delay_ms, 0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeckConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.deck.total_slides, 36);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[deck\ntotal_slides = ").unwrap();
        assert!(matches!(DeckConfig::load_from(&path), Err(DeckError::ConfigParse(_))));
    }
}
