//! Display surface abstraction
//!
//! The navigator never renders anything itself. It marks panels active or
//! inactive and pushes a [`ControlState`] after every position change.

/// Indicator values derived from `(current, total)`
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    /// Counter text value (1-based)
    pub counter: usize,
    pub total: usize,
    /// Linear progress, `100 * counter / total`
    pub progress_percent: f64,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    /// Tooltip naming the previous panel or the first-slide boundary
    pub prev_title: String,
    /// Tooltip naming the next panel or the last-slide boundary
    pub next_title: String,
}

/// Rendering side of the deck
pub trait DisplaySurface {
    /// Number of panel handles actually available
    fn panel_count(&self) -> usize;

    /// Mark the panel at the 1-based `index` as shown
    fn activate(&mut self, index: usize);

    /// Mark the panel at the 1-based `index` as hidden
    fn deactivate(&mut self, index: usize);

    fn is_active(&self, index: usize) -> bool;

    /// Refresh counter, progress bar and navigation buttons
    fn update_controls(&mut self, state: &ControlState);

    /// Attach an accessibility label to a panel
    fn describe_panel(&mut self, _index: usize, _label: &str) {}

    /// Attach an accessibility label to the navigation controls
    fn describe_navigation(&mut self, _label: &str) {}

    fn set_fullscreen(&mut self, _fullscreen: bool) {}
}

/// In-memory surface keeping panel flags and the last pushed controls
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    active: Vec<bool>,
    labels: Vec<String>,
    navigation_label: Option<String>,
    controls: Option<ControlState>,
    fullscreen: bool,
}

impl MemorySurface {
    pub fn new(panel_count: usize) -> Self {
        Self {
            active: vec![false; panel_count],
            labels: vec![String::new(); panel_count],
            navigation_label: None,
            controls: None,
            fullscreen: false,
        }
    }

    /// 1-based indices of every active panel
    pub fn active_panels(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| i + 1)
            .collect()
    }

    pub fn controls(&self) -> Option<&ControlState> {
        self.controls.as_ref()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    pub fn navigation_label(&self) -> Option<&str> {
        self.navigation_label.as_deref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn slot(&mut self, index: usize) -> Option<&mut bool> {
        index.checked_sub(1).and_then(|i| self.active.get_mut(i))
    }
}

impl DisplaySurface for MemorySurface {
    fn panel_count(&self) -> usize {
        self.active.len()
    }

    fn activate(&mut self, index: usize) {
        if let Some(flag) = self.slot(index) {
            *flag = true;
        }
    }

    fn deactivate(&mut self, index: usize) {
        if let Some(flag) = self.slot(index) {
            *flag = false;
        }
    }

    fn is_active(&self, index: usize) -> bool {
        index
            .checked_sub(1)
            .and_then(|i| self.active.get(i))
            .copied()
            .unwrap_or(false)
    }

    fn update_controls(&mut self, state: &ControlState) {
        self.controls = Some(state.clone());
    }

    fn describe_panel(&mut self, index: usize, label: &str) {
        if let Some(slot) = index.checked_sub(1).and_then(|i| self.labels.get_mut(i)) {
            *slot = label.to_string();
        }
    }

    fn describe_navigation(&mut self, label: &str) {
        self.navigation_label = Some(label.to_string());
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }
}
