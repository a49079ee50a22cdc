//! Input handling: keybinding resolution and swipe detection

use crate::command::{Command, CommandId};
use std::collections::HashMap;

/// Input handler that maps key names to commands
pub struct InputHandler {
    /// Key bindings: lowercase key string -> command ID
    bindings: HashMap<String, String>,
}

impl InputHandler {
    /// Create a new input handler with bindings
    pub fn new(bindings: &HashMap<String, Vec<String>>) -> Self {
        // Invert the bindings map: command -> keys becomes key -> command
        let mut key_to_command = HashMap::new();

        for (command, keys) in bindings {
            for key in keys {
                if let Some(previous) = key_to_command.insert(key.to_lowercase(), command.clone()) {
                    tracing::warn!("Key {} bound to both {} and {}", key, previous, command);
                }
            }
        }

        Self {
            bindings: key_to_command,
        }
    }

    /// Resolve a key name such as `Right`, `Space` or `h`
    pub fn handle_key(&self, key: &str) -> Option<Command> {
        let key = normalize_key(key);
        tracing::debug!("Key pressed: {}", key);

        self.bindings
            .get(&key.to_lowercase())
            .map(|cmd_id| Command::new(cmd_id))
    }
}

/// Map host key names onto the binding vocabulary
fn normalize_key(key: &str) -> &str {
    match key {
        " " => "Space",
        "ArrowLeft" => "Left",
        "ArrowRight" => "Right",
        "ArrowUp" => "Up",
        "ArrowDown" => "Down",
        "Esc" => "Escape",
        _ => key,
    }
}

/// Horizontal swipe detection from touch start/end points
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture; a rightward drag goes back, a leftward one forward
    pub fn touch_end(&mut self, x: f32, y: f32) -> Option<Command> {
        let (start_x, start_y) = self.start.take()?;
        classify_swipe(x - start_x, y - start_y, self.threshold)
    }
}

/// Horizontal travel must beat both the threshold and the vertical travel
pub fn classify_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Command> {
    if dx.abs() > threshold && dx.abs() > dy.abs() {
        let id = if dx > 0.0 {
            CommandId::NAV_PREV
        } else {
            CommandId::NAV_NEXT
        };
        Some(Command::new(id))
    } else {
        None
    }
}
