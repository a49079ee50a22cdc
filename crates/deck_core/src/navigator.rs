//! Slide navigation state machine
//!
//! A navigator is either idle or transitioning. A successful [`SlideNavigator::go_to`]
//! hides the old panel at once and schedules the new panel to be shown after the
//! configured delay; [`SlideNavigator::poll`] commits it. Requests arriving in
//! between are dropped, not queued.
//!
//! Time is passed in explicitly so the owner's event loop decides what "now" is.

use crate::bookmark::Bookmark;
use crate::command::{Command, CommandId};
use crate::config::DeckSettings;
use crate::i18n::I18n;
use crate::location::LocationStore;
use crate::surface::{ControlState, DisplaySurface};
use crate::DeckError;
use std::time::{Duration, Instant};

/// Why a navigation request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Target outside `1..=total`
    OutOfRange,
    /// Target is already the current slide
    AlreadyCurrent,
    /// A transition is still in flight
    Transitioning,
}

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved { from: usize, to: usize },
    Ignored(IgnoreReason),
}

impl NavOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, NavOutcome::Moved { .. })
    }
}

/// Snapshot of the position, for status displays and debugging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideInfo {
    pub current: usize,
    pub total: usize,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy)]
struct PendingActivation {
    index: usize,
    due: Instant,
}

/// Owns the current slide and keeps the surface and location in step with it
pub struct SlideNavigator<D: DisplaySurface, L: LocationStore> {
    surface: D,
    location: L,
    i18n: I18n,
    current: usize,
    total: usize,
    delay: Duration,
    pending: Option<PendingActivation>,
}

impl<D: DisplaySurface, L: LocationStore> SlideNavigator<D, L> {
    /// Create a navigator positioned from the location's token, or at slide 1
    pub fn new(surface: D, location: L, settings: &DeckSettings, i18n: I18n) -> Result<Self, DeckError> {
        if settings.total_slides == 0 {
            return Err(DeckError::EmptyDeck);
        }

        if surface.panel_count() != settings.total_slides {
            tracing::warn!(
                "Deck has {} slides but the surface provides {} panels",
                settings.total_slides,
                surface.panel_count()
            );
        }

        let mut navigator = Self {
            surface,
            location,
            i18n,
            current: 1,
            total: settings.total_slides,
            delay: settings.transition_delay(),
            pending: None,
        };

        if !navigator.on_location_changed() {
            navigator.show_exclusively(navigator.current);
            navigator.sync();
        }

        tracing::info!("Navigator ready at slide {}/{}", navigator.current, navigator.total);
        Ok(navigator)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// When the in-flight transition will be committed
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    pub fn progress_percent(&self) -> f64 {
        self.current as f64 / self.total as f64 * 100.0
    }

    pub fn info(&self) -> SlideInfo {
        SlideInfo {
            current: self.current,
            total: self.total,
            progress: self.progress_percent(),
        }
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    /// Move to slide `target` (1-based)
    pub fn go_to(&mut self, target: usize, now: Instant) -> NavOutcome {
        if let Some(reason) = self.reject(target) {
            tracing::trace!("Ignoring navigation to {}: {:?}", target, reason);
            return NavOutcome::Ignored(reason);
        }

        let from = self.current;
        self.surface.deactivate(from);
        self.current = target;

        if target > self.surface.panel_count() {
            tracing::debug!("No panel for slide {}, skipping activation", target);
        } else if self.delay.is_zero() {
            self.surface.activate(target);
        } else {
            self.pending = Some(PendingActivation {
                index: target,
                due: now + self.delay,
            });
        }

        tracing::debug!("Slide {} -> {}", from, target);

        self.sync();
        self.persist();

        NavOutcome::Moved { from, to: target }
    }

    /// Move to the next slide; no-op on the last one
    pub fn advance(&mut self, now: Instant) -> NavOutcome {
        self.go_to(self.current + 1, now)
    }

    /// Move to the previous slide; no-op on the first one
    pub fn retreat(&mut self, now: Instant) -> NavOutcome {
        // 0 is rejected as out of range
        self.go_to(self.current - 1, now)
    }

    /// Run a `nav.*` command; other commands return `None`
    pub fn execute(&mut self, cmd: &Command, now: Instant) -> Option<NavOutcome> {
        let outcome = match cmd.id.as_str() {
            CommandId::NAV_NEXT => self.advance(now),
            CommandId::NAV_PREV => self.retreat(now),
            CommandId::NAV_FIRST => self.go_to(1, now),
            CommandId::NAV_LAST => self.go_to(self.total, now),
            CommandId::NAV_GOTO => {
                let target = cmd
                    .params
                    .int_value
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(0);
                self.go_to(target, now)
            }
            _ => return None,
        };
        Some(outcome)
    }

    /// Commit the pending activation once its delay has elapsed
    ///
    /// Returns `true` when a transition finished during this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if now >= pending.due => {
                self.finish(pending);
                true
            }
            _ => false,
        }
    }

    /// Commit the pending activation immediately
    pub fn settle(&mut self) -> bool {
        match self.pending {
            Some(pending) => {
                self.finish(pending);
                true
            }
            None => false,
        }
    }

    /// Push counter, progress and button state to the surface
    pub fn sync(&mut self) {
        let state = self.control_state();
        self.surface.update_controls(&state);
    }

    /// Values the surface shows for the current position
    pub fn control_state(&self) -> ControlState {
        ControlState {
            counter: self.current,
            total: self.total,
            progress_percent: self.progress_percent(),
            prev_disabled: self.current == 1,
            next_disabled: self.current == self.total,
            prev_title: self.i18n.prev_title(self.current),
            next_title: self.i18n.next_title(self.current, self.total),
        }
    }

    /// Store the current position unless the location already holds it
    pub fn persist(&mut self) {
        let stored = Bookmark::parse_lenient(self.location.read().as_deref()).map(|b| b.position());

        if stored != Some(self.current) {
            self.location.write(self.current);
        }
    }

    /// Jump to the position encoded in `raw`
    ///
    /// Malformed or out-of-range tokens leave everything untouched and return `false`.
    pub fn restore_from_location(&mut self, raw: Option<&str>) -> bool {
        let Some(position) = Bookmark::parse_lenient(raw).map(|b| b.position()) else {
            return false;
        };

        if position > self.total {
            tracing::trace!("Bookmarked slide {} is beyond {}", position, self.total);
            return false;
        }

        // A restore replaces whatever the in-flight transition was about to show
        self.settle();

        self.current = position;
        self.show_exclusively(position);
        self.sync();

        tracing::debug!("Restored slide {} from location", position);
        true
    }

    /// Back/forward handler: re-read the location's token
    pub fn on_location_changed(&mut self) -> bool {
        let raw = self.location.read();
        self.restore_from_location(raw.as_deref())
    }

    fn reject(&self, target: usize) -> Option<IgnoreReason> {
        if self.is_transitioning() {
            Some(IgnoreReason::Transitioning)
        } else if target < 1 || target > self.total {
            Some(IgnoreReason::OutOfRange)
        } else if target == self.current {
            Some(IgnoreReason::AlreadyCurrent)
        } else {
            None
        }
    }

    fn finish(&mut self, pending: PendingActivation) {
        self.surface.activate(pending.index);
        self.pending = None;
        tracing::trace!("Transition to {} committed", pending.index);
    }

    /// Clear every active mark, then show `index`
    fn show_exclusively(&mut self, index: usize) {
        for i in 1..=self.surface.panel_count() {
            if self.surface.is_active(i) {
                self.surface.deactivate(i);
            }
        }

        if index <= self.surface.panel_count() {
            self.surface.activate(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::MemoryHistory;
    use crate::surface::MemorySurface;

    const DELAY: Duration = Duration::from_millis(50);

    fn settings(total: usize) -> DeckSettings {
        DeckSettings {
            total_slides: total,
            transition_delay_ms: 50,
        }
    }

    fn navigator(total: usize, token: Option<&str>) -> SlideNavigator<MemorySurface, MemoryHistory> {
        let history = token.map(MemoryHistory::with_token).unwrap_or_default();
        SlideNavigator::new(
            MemorySurface::new(total),
            history,
            &settings(total),
            I18n::new("fr").unwrap(),
        )
        .unwrap()
    }

    /// Location store counting writes
    #[derive(Default)]
    struct CountingStore {
        token: Option<String>,
        writes: usize,
    }

    impl LocationStore for CountingStore {
        fn read(&self) -> Option<String> {
            self.token.clone()
        }

        fn write(&mut self, position: usize) {
            self.writes += 1;
            self.token = Some(format!("slide-{}", position));
        }
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let result = SlideNavigator::new(
            MemorySurface::new(0),
            MemoryHistory::new(),
            &settings(0),
            I18n::new("fr").unwrap(),
        );
        assert!(matches!(result, Err(DeckError::EmptyDeck)));
    }

    #[test]
    fn test_initial_state() {
        let nav = navigator(36, None);
        assert_eq!(nav.current(), 1);
        assert!(!nav.is_transitioning());
        assert_eq!(nav.surface().active_panels(), vec![1]);

        let controls = nav.surface().controls().unwrap();
        assert!(controls.prev_disabled);
        assert!(!controls.next_disabled);
        assert_eq!(controls.prev_title, "Première diapositive");
        assert_eq!(controls.next_title, "Diapositive 2");
    }

    #[test]
    fn test_go_to_law() {
        let t0 = Instant::now();
        for target in 0..=6 {
            let mut nav = navigator(5, None);
            let outcome = nav.go_to(target, t0);
            if (1..=5).contains(&target) && target != 1 {
                assert_eq!(outcome, NavOutcome::Moved { from: 1, to: target });
                assert_eq!(nav.current(), target);
            } else {
                assert!(!outcome.moved());
                assert_eq!(nav.current(), 1);
            }
        }
    }

    #[test]
    fn test_go_to_current_does_not_persist() {
        let store = CountingStore::default();
        let mut nav = SlideNavigator::new(
            MemorySurface::new(10),
            store,
            &settings(10),
            I18n::new("fr").unwrap(),
        )
        .unwrap();

        let outcome = nav.go_to(1, Instant::now());
        assert_eq!(outcome, NavOutcome::Ignored(IgnoreReason::AlreadyCurrent));
        assert_eq!(nav.location().writes, 0);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn test_persist_skips_unchanged_token() {
        let mut nav = SlideNavigator::new(
            MemorySurface::new(10),
            CountingStore::default(),
            &settings(10),
            I18n::new("fr").unwrap(),
        )
        .unwrap();

        nav.go_to(3, Instant::now());
        assert_eq!(nav.location().writes, 1);

        nav.persist();
        assert_eq!(nav.location().writes, 1);
        assert_eq!(nav.location().read().as_deref(), Some("slide-3"));
    }

    #[test]
    fn test_persist_treats_fragment_token_as_same_position() {
        let mut nav = navigator(36, Some("#slide-10"));
        assert_eq!(nav.current(), 10);

        nav.persist();
        assert_eq!(nav.location().len(), 1);
        assert_eq!(nav.location().read().as_deref(), Some("#slide-10"));
    }

    #[test]
    fn test_boundaries() {
        let t0 = Instant::now();
        let mut nav = navigator(3, None);
        assert_eq!(nav.retreat(t0), NavOutcome::Ignored(IgnoreReason::OutOfRange));

        let mut nav = navigator(3, Some("slide-3"));
        assert_eq!(nav.advance(t0), NavOutcome::Ignored(IgnoreReason::OutOfRange));
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn test_progress_is_linear_and_monotonic() {
        let mut now = Instant::now();
        let mut nav = navigator(8, None);
        let mut last = 0.0;

        loop {
            let controls = nav.surface().controls().unwrap().clone();
            let expected = 100.0 * nav.current() as f64 / 8.0;
            assert!((controls.progress_percent - expected).abs() < 1e-9);
            assert!(controls.progress_percent > last && controls.progress_percent <= 100.0);
            last = controls.progress_percent;

            if !nav.advance(now).moved() {
                break;
            }
            now += DELAY;
            nav.poll(now);
        }

        assert_eq!(last, 100.0);
    }

    #[test]
    fn test_transition_guard() {
        let t0 = Instant::now();
        let mut nav = navigator(36, None);

        assert!(nav.go_to(5, t0).moved());
        assert!(nav.is_transitioning());
        assert!(nav.surface().active_panels().is_empty());

        let second = nav.go_to(6, t0 + Duration::from_millis(10));
        assert_eq!(second, NavOutcome::Ignored(IgnoreReason::Transitioning));
        assert_eq!(nav.current(), 5);

        assert!(!nav.poll(t0 + Duration::from_millis(49)));
        assert!(nav.is_transitioning());

        assert!(nav.poll(t0 + DELAY));
        assert!(!nav.is_transitioning());
        assert_eq!(nav.surface().active_panels(), vec![5]);

        assert!(nav.go_to(6, t0 + DELAY).moved());
    }

    #[test]
    fn test_sync_and_persist_happen_before_activation() {
        let t0 = Instant::now();
        let mut nav = navigator(36, None);
        nav.go_to(4, t0);

        assert!(nav.is_transitioning());
        assert_eq!(nav.surface().controls().unwrap().counter, 4);
        assert_eq!(nav.location().read().as_deref(), Some("slide-4"));
    }

    #[test]
    fn test_settle_always_clears_guard() {
        let mut nav = navigator(4, None);
        nav.go_to(2, Instant::now());
        assert!(nav.settle());
        assert!(!nav.is_transitioning());
        assert!(!nav.settle());
        assert_eq!(nav.surface().active_panels(), vec![2]);
    }

    #[test]
    fn test_missing_panel_resets_guard_immediately() {
        let mut nav = SlideNavigator::new(
            MemorySurface::new(3),
            MemoryHistory::new(),
            &settings(5),
            I18n::new("fr").unwrap(),
        )
        .unwrap();

        assert!(nav.go_to(5, Instant::now()).moved());
        assert_eq!(nav.current(), 5);
        assert!(!nav.is_transitioning());
        assert!(nav.surface().active_panels().is_empty());
    }

    #[test]
    fn test_zero_delay_activates_immediately() {
        let mut nav = SlideNavigator::new(
            MemorySurface::new(4),
            MemoryHistory::new(),
            &DeckSettings {
                total_slides: 4,
                transition_delay_ms: 0,
            },
            I18n::new("fr").unwrap(),
        )
        .unwrap();

        nav.go_to(3, Instant::now());
        assert!(!nav.is_transitioning());
        assert_eq!(nav.surface().active_panels(), vec![3]);
    }

    #[test]
    fn test_walk_whole_deck() {
        let mut now = Instant::now();
        let mut nav = navigator(36, None);

        for _ in 0..35 {
            assert!(nav.advance(now).moved());
            now += DELAY;
            assert!(nav.poll(now));
        }

        assert_eq!(nav.current(), 36);
        let controls = nav.surface().controls().unwrap();
        assert!(controls.next_disabled);
        assert!(!controls.prev_disabled);
        assert_eq!(controls.progress_percent, 100.0);
        assert_eq!(controls.next_title, "Dernière diapositive");

        assert!(!nav.advance(now).moved());
        assert_eq!(nav.current(), 36);
    }

    #[test]
    fn test_bookmark_in_range() {
        let nav = navigator(36, Some("slide-10"));
        assert_eq!(nav.current(), 10);
        assert_eq!(nav.surface().active_panels(), vec![10]);

        let controls = nav.surface().controls().unwrap();
        assert!(!controls.prev_disabled);
        assert!(!controls.next_disabled);
        assert_eq!(controls.prev_title, "Diapositive 9");
        assert_eq!(controls.next_title, "Diapositive 11");
    }

    #[test]
    fn test_bookmark_out_of_range_falls_back() {
        let nav = navigator(36, Some("slide-99"));
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.surface().active_panels(), vec![1]);
    }

    #[test]
    fn test_malformed_bookmark_falls_back() {
        for token in ["", "slide-", "slide-x", "slide-0", "page-3"] {
            let nav = navigator(36, Some(token));
            assert_eq!(nav.current(), 1, "token {:?}", token);
        }
    }

    #[test]
    fn test_restore_clears_stray_active_panels() {
        let mut nav = navigator(6, None);
        nav.surface_mut().activate(3);
        nav.surface_mut().activate(5);

        assert!(nav.restore_from_location(Some("#slide-4")));
        assert_eq!(nav.current(), 4);
        assert_eq!(nav.surface().active_panels(), vec![4]);
        assert_eq!(nav.surface().controls().unwrap().counter, 4);
    }

    #[test]
    fn test_restore_ignores_bad_tokens() {
        let mut nav = navigator(6, Some("slide-2"));
        assert!(!nav.restore_from_location(Some("slide-7")));
        assert!(!nav.restore_from_location(None));
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_restore_during_transition_commits_it_first() {
        let mut nav = navigator(6, None);
        nav.go_to(2, Instant::now());

        assert!(nav.restore_from_location(Some("slide-5")));
        assert!(!nav.is_transitioning());
        assert_eq!(nav.surface().active_panels(), vec![5]);
    }

    #[test]
    fn test_round_trip_through_location() {
        let mut first = navigator(12, None);
        first.go_to(7, Instant::now());
        first.settle();
        let token = first.location().read();

        let second = navigator(12, token.as_deref());
        assert_eq!(second.current(), 7);
    }

    #[test]
    fn test_back_navigation_restores_position() {
        let mut now = Instant::now();
        let mut nav = navigator(10, None);
        for target in [3, 6] {
            nav.go_to(target, now);
            now += DELAY;
            nav.poll(now);
        }

        assert!(nav.location_mut().back());
        assert!(nav.on_location_changed());
        assert_eq!(nav.current(), 3);
        assert_eq!(nav.surface().active_panels(), vec![3]);

        // Restoring does not push a new history entry
        assert!(nav.location_mut().forward());
    }

    #[test]
    fn test_execute_commands() {
        let mut now = Instant::now();
        let mut nav = navigator(10, None);

        let outcome = nav.execute(&Command::new(CommandId::NAV_LAST), now);
        assert_eq!(outcome, Some(NavOutcome::Moved { from: 1, to: 10 }));
        now += DELAY;
        nav.poll(now);

        nav.execute(&Command::goto(4), now);
        assert_eq!(nav.current(), 4);
        now += DELAY;
        nav.poll(now);

        let negative = nav.execute(&Command::goto(-2), now);
        assert_eq!(negative, Some(NavOutcome::Ignored(IgnoreReason::OutOfRange)));

        assert_eq!(nav.execute(&Command::new(CommandId::APP_HELP), now), None);
    }

    #[test]
    fn test_info() {
        let nav = navigator(4, Some("slide-2"));
        let info = nav.info();
        assert_eq!(info.current, 2);
        assert_eq!(info.total, 4);
        assert_eq!(info.progress, 50.0);
    }
}
