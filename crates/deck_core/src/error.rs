//! Deck error types

use thiserror::Error;

/// Main deck error type
///
/// Invalid navigation targets are not errors: the navigator drops them and
/// reports an [`crate::IgnoreReason`] instead.
#[derive(Error, Debug)]
pub enum DeckError {
    // ===== Construction =====
    #[error("A deck needs at least one slide")]
    EmptyDeck,

    // ===== Configuration =====
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    // ===== Localization =====
    #[error("Locale error: {0}")]
    Locale(String),
}

impl DeckError {
    /// Can the caller fall back to defaults and keep going?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DeckError::Io(_) | DeckError::ConfigParse(_) | DeckError::Locale(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}
