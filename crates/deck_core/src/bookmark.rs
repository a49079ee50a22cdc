//! Bookmark tokens (`slide-<N>`) used to persist the current position

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

const PREFIX: &str = "slide-";

/// Why a token could not be read as a bookmark
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    #[error("missing `slide-` prefix in {0:?}")]
    MissingPrefix(String),

    #[error("invalid slide number in {0:?}")]
    InvalidNumber(String),

    #[error("slide numbers start at 1")]
    Zero,
}

/// A 1-based slide position in its persisted form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bookmark(NonZeroUsize);

impl Bookmark {
    /// Returns `None` for position 0
    pub fn new(position: usize) -> Option<Self> {
        NonZeroUsize::new(position).map(Self)
    }

    pub fn position(&self) -> usize {
        self.0.get()
    }

    /// Parse an optional raw token, treating any malformed shape as absent
    pub fn parse_lenient(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        match raw.parse() {
            Ok(bookmark) => Some(bookmark),
            Err(e) => {
                tracing::trace!("Ignoring bookmark token {:?}: {}", raw, e);
                None
            }
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.0)
    }
}

impl FromStr for Bookmark {
    type Err = BookmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // URL fragments carry a leading '#'
        let token = s.strip_prefix('#').unwrap_or(s);

        let digits = token
            .strip_prefix(PREFIX)
            .ok_or_else(|| BookmarkError::MissingPrefix(s.to_string()))?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BookmarkError::InvalidNumber(s.to_string()));
        }

        let value: usize = digits
            .parse()
            .map_err(|_| BookmarkError::InvalidNumber(s.to_string()))?;

        Self::new(value).ok_or(BookmarkError::Zero)
    }
}
