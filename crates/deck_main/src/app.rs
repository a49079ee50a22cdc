//! Console event loop

use crate::console::ConsoleSurface;
use deck_core::{Command, DeckConfig, MemoryHistory, NavOutcome, Presentation, Response};
use std::io::BufRead;
use std::time::Instant;

/// One line of console input
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Key(String),
    Swipe { dx: f32, dy: f32 },
    Goto(i64),
    Back,
    Forward,
    Quit,
}

fn parse_line(line: &str) -> Option<Input> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;

    let input = match head {
        "quit" | "exit" => Input::Quit,
        "back" => Input::Back,
        "forward" => Input::Forward,
        "goto" => Input::Goto(parts.next()?.parse().ok()?),
        "swipe" => {
            let dx = parts.next()?.parse().ok()?;
            let dy = parts.next().map_or(Some(0.0), |v| v.parse().ok())?;
            Input::Swipe { dx, dy }
        }
        key => Input::Key(key.to_string()),
    };

    if parts.next().is_some() {
        return None;
    }
    Some(input)
}

/// Run the deck until stdin closes or `quit` is entered
pub fn run(config: &DeckConfig, bookmark: Option<String>) -> anyhow::Result<()> {
    let history = bookmark.map(MemoryHistory::with_token).unwrap_or_default();
    let surface = ConsoleSurface::new(config.deck.total_slides);
    let mut presentation = Presentation::new(surface, history, config)?;

    println!("{}", presentation.navigator().i18n().keyboard_help());

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        presentation.tick(Instant::now());

        let Some(input) = parse_line(&line) else {
            if !line.trim().is_empty() {
                println!("?? {}", line.trim());
            }
            continue;
        };

        let now = Instant::now();
        let response = match input {
            Input::Quit => break,
            Input::Key(key) => presentation.handle_key(&key, now),
            Input::Swipe { dx, dy } => {
                presentation.touch_start(0.0, 0.0);
                presentation.touch_end(dx, dy, now)
            }
            Input::Goto(n) => presentation.dispatch(&Command::goto(n), now),
            Input::Back => history_step(&mut presentation, |h| h.back()),
            Input::Forward => history_step(&mut presentation, |h| h.forward()),
        };
        report(&response);

        // Let the exit animation finish before reading the next line
        if let Some(due) = presentation.navigator().pending_deadline() {
            std::thread::sleep(due.saturating_duration_since(Instant::now()));
            presentation.tick(Instant::now());
        }
    }

    presentation.navigator_mut().settle();
    let info = presentation.navigator().info();
    tracing::info!(
        "Leaving at slide {}/{} ({:.1}%), active panels {:?}",
        info.current,
        info.total,
        info.progress,
        presentation.navigator().surface().active_panels()
    );
    Ok(())
}

fn history_step(
    presentation: &mut Presentation<ConsoleSurface, MemoryHistory>,
    step: impl FnOnce(&mut MemoryHistory) -> bool,
) -> Response {
    if step(presentation.navigator_mut().location_mut()) {
        presentation.on_location_changed()
    } else {
        println!("(no history)");
        Response::Unhandled
    }
}

fn report(response: &Response) {
    match response {
        Response::Help(text) => println!("{}", text),
        Response::Fullscreen(on) => println!("fullscreen: {}", if *on { "on" } else { "off" }),
        Response::Navigated(NavOutcome::Ignored(reason)) => {
            tracing::debug!("Navigation ignored: {:?}", reason)
        }
        Response::Navigated(_)
        | Response::Restored(_)
        | Response::HelpClosed
        | Response::Suppressed
        | Response::Unhandled => {}
    }
}
