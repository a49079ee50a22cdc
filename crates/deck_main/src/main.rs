//! SlideDeck - keyboard/touch driven slide navigator
//!
//! Console front end: reads key names and gestures from stdin.

mod app;
mod console;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slide_deck", version, about = "Step through a slide deck from the console")]
struct Args {
    /// Number of slides (overrides the config file)
    #[arg(long)]
    slides: Option<usize>,

    /// Starting bookmark token, e.g. `slide-10` or `#slide-10`
    #[arg(long)]
    bookmark: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transition delay in milliseconds (0 disables it)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Label language (fr, en)
    #[arg(long)]
    lang: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging and panic hook first
    deck_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = deck_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("SlideDeck starting...");

    // Load configuration
    let loaded = match &args.config {
        Some(path) => deck_core::DeckConfig::load_from(path),
        None => deck_core::DeckConfig::load(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => {
            tracing::warn!("Falling back to default configuration: {}", e);
            deck_core::DeckConfig::default()
        }
    };

    if let Some(slides) = args.slides {
        config.deck.total_slides = slides;
    }
    if let Some(delay) = args.delay_ms {
        config.deck.transition_delay_ms = delay;
    }
    if let Some(lang) = args.lang {
        config.general.language = lang;
    }

    app::run(&config, args.bookmark)
}
