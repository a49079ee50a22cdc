//! Console rendering of the deck

use deck_core::{ControlState, DisplaySurface, MemorySurface};

const BAR_WIDTH: usize = 30;

/// Surface printing every change to stdout
pub struct ConsoleSurface {
    inner: MemorySurface,
}

impl ConsoleSurface {
    pub fn new(panel_count: usize) -> Self {
        Self {
            inner: MemorySurface::new(panel_count),
        }
    }

    pub fn active_panels(&self) -> Vec<usize> {
        self.inner.active_panels()
    }
}

impl DisplaySurface for ConsoleSurface {
    fn panel_count(&self) -> usize {
        self.inner.panel_count()
    }

    fn activate(&mut self, index: usize) {
        self.inner.activate(index);
        let label = self.inner.label(index).unwrap_or_default();
        println!(">> {}", label);
    }

    fn deactivate(&mut self, index: usize) {
        self.inner.deactivate(index);
    }

    fn is_active(&self, index: usize) -> bool {
        self.inner.is_active(index)
    }

    fn update_controls(&mut self, state: &ControlState) {
        self.inner.update_controls(state);
        println!("{}", status_line(state));
    }

    fn describe_panel(&mut self, index: usize, label: &str) {
        self.inner.describe_panel(index, label);
    }

    fn describe_navigation(&mut self, label: &str) {
        self.inner.describe_navigation(label);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.inner.set_fullscreen(fullscreen);
    }
}

/// `[ 3/36] #####......  8.3%  < Diapositive 2 | Diapositive 4 >`
pub fn status_line(state: &ControlState) -> String {
    let prev = if state.prev_disabled { " " } else { "<" };
    let next = if state.next_disabled { " " } else { ">" };
    format!(
        "[{:>3}/{}] {} {:5.1}%  {} {} | {} {}",
        state.counter,
        state.total,
        progress_bar(state.progress_percent, BAR_WIDTH),
        state.progress_percent,
        prev,
        state.prev_title,
        state.next_title,
        next,
    )
}

pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}
