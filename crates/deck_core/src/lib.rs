//! SlideDeck Core Domain Logic
//!
//! This crate contains:
//! - Slide navigation state machine
//! - Bookmark tokens
//! - Display surface and location store abstractions
//! - Input mapping (keys, swipes)
//! - Configuration
//! - Localized labels
//! - Error types

pub mod bookmark;
pub mod command;
pub mod config;
pub mod error;
pub mod i18n;
pub mod input;
pub mod location;
pub mod navigator;
pub mod presentation;
pub mod surface;

pub use bookmark::{Bookmark, BookmarkError};
pub use command::{Command, CommandId, CommandParams};
pub use config::{DeckConfig, DeckSettings, GeneralConfig, InputConfig};
pub use error::DeckError;
pub use i18n::I18n;
pub use input::{classify_swipe, InputHandler, SwipeTracker};
pub use location::{LocationStore, MemoryHistory};
pub use navigator::{IgnoreReason, NavOutcome, SlideInfo, SlideNavigator};
pub use presentation::{Presentation, Response};
pub use surface::{ControlState, DisplaySurface, MemorySurface};
