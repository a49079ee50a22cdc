//! Presentation session: navigator plus input mapping and viewer toggles

use crate::command::{Command, CommandId};
use crate::config::DeckConfig;
use crate::i18n::I18n;
use crate::input::{InputHandler, SwipeTracker};
use crate::location::LocationStore;
use crate::navigator::{NavOutcome, SlideNavigator};
use crate::surface::DisplaySurface;
use crate::DeckError;
use std::time::Instant;

/// What an input event led to
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Navigated(NavOutcome),
    /// Navigation input arrived mid-transition and was dropped
    Suppressed,
    /// Keyboard help should be shown
    Help(String),
    HelpClosed,
    Fullscreen(bool),
    /// Position re-read from the location store
    Restored(usize),
    /// No binding for this input
    Unhandled,
}

/// One running slideshow
pub struct Presentation<D: DisplaySurface, L: LocationStore> {
    navigator: SlideNavigator<D, L>,
    input: InputHandler,
    swipe: SwipeTracker,
    fullscreen: bool,
    help_visible: bool,
}

impl<D: DisplaySurface, L: LocationStore> Presentation<D, L> {
    pub fn new(mut surface: D, location: L, config: &DeckConfig) -> Result<Self, DeckError> {
        let i18n = I18n::new(&config.general.language)?;

        let panels = surface.panel_count();
        for index in 1..=panels {
            surface.describe_panel(index, &i18n.panel_label(index, panels));
        }
        surface.describe_navigation(&i18n.get("nav-region-label"));

        let navigator = SlideNavigator::new(surface, location, &config.deck, i18n)?;

        Ok(Self {
            navigator,
            input: InputHandler::new(&config.keybindings),
            swipe: SwipeTracker::new(config.input.swipe_threshold_px),
            fullscreen: false,
            help_visible: false,
        })
    }

    pub fn navigator(&self) -> &SlideNavigator<D, L> {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut SlideNavigator<D, L> {
        &mut self.navigator
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn handle_key(&mut self, key: &str, now: Instant) -> Response {
        match self.input.handle_key(key) {
            Some(cmd) => self.dispatch(&cmd, now),
            None => Response::Unhandled,
        }
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.swipe.touch_start(x, y);
    }

    pub fn touch_end(&mut self, x: f32, y: f32, now: Instant) -> Response {
        match self.swipe.touch_end(x, y) {
            Some(cmd) => self.dispatch(&cmd, now),
            None => Response::Unhandled,
        }
    }

    /// Forward a back/forward notification from the location
    pub fn on_location_changed(&mut self) -> Response {
        if self.navigator.on_location_changed() {
            Response::Restored(self.navigator.current())
        } else {
            Response::Unhandled
        }
    }

    /// Advance time; commits a finished transition
    pub fn tick(&mut self, now: Instant) -> bool {
        self.navigator.poll(now)
    }

    pub fn dispatch(&mut self, cmd: &Command, now: Instant) -> Response {
        if cmd.id.is_navigation() {
            if self.navigator.is_transitioning() {
                tracing::trace!("Dropping {} during transition", cmd.id.as_str());
                return Response::Suppressed;
            }
            return match self.navigator.execute(cmd, now) {
                Some(outcome) => Response::Navigated(outcome),
                None => {
                    tracing::warn!("Unknown command: {}", cmd.id.as_str());
                    Response::Unhandled
                }
            };
        }

        match cmd.id.as_str() {
            CommandId::APP_HELP => {
                self.help_visible = true;
                let help = self.navigator.i18n().keyboard_help();
                tracing::info!("{}", help);
                Response::Help(help)
            }
            CommandId::APP_CLOSE_HELP => {
                self.help_visible = false;
                Response::HelpClosed
            }
            CommandId::APP_TOGGLE_FULLSCREEN => {
                self.fullscreen = !self.fullscreen;
                self.navigator.surface_mut().set_fullscreen(self.fullscreen);
                Response::Fullscreen(self.fullscreen)
            }
            other => {
                tracing::warn!("Unknown command: {}", other);
                Response::Unhandled
            }
        }
    }
}
