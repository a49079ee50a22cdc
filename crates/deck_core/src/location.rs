//! Location store abstraction (persisted navigation token)

use crate::bookmark::Bookmark;

/// Where the current position is persisted between sessions
pub trait LocationStore {
    /// Current persisted token, if any
    fn read(&self) -> Option<String>;

    /// Push a new token for `position`
    fn write(&mut self, position: usize);
}

/// In-memory navigation history of bookmark tokens
///
/// `write` pushes a new entry and drops the forward entries, like a browser
/// history. `back`/`forward` only move the cursor; the owner of the navigator
/// must then call [`crate::SlideNavigator::on_location_changed`].
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History starting at an arbitrary raw token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            entries: vec![token.into()],
            cursor: Some(0),
        }
    }

    /// Move one entry back
    pub fn back(&mut self) -> bool {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Move one entry forward
    pub fn forward(&mut self) -> bool {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LocationStore for MemoryHistory {
    fn read(&self) -> Option<String> {
        self.cursor.and_then(|i| self.entries.get(i)).cloned()
    }

    fn write(&mut self, position: usize) {
        let Some(bookmark) = Bookmark::new(position) else {
            return;
        };

        if Bookmark::parse_lenient(self.read().as_deref()) == Some(bookmark) {
            return;
        }

        let next = self.cursor.map_or(0, |i| i + 1);
        self.entries.truncate(next);
        self.entries.push(bookmark.to_string());
        self.cursor = Some(next);
    }
}
