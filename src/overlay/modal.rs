//! Stack-aware modal manager.
//!
//! The manager owns every modal's lifecycle: which are open, their stacking
//! order, enter/exit animation phases, the page scroll-lock, and focus
//! containment. Hosts register a surface per modal id, then drive the
//! manager with `show`/`hide` requests and a per-frame `tick`.
//!
//! Animation phases are settled by `tick(now)` against deadlines stamped at
//! request time. Each request bumps a sequence token, so a completion that
//! belongs to a superseded request (rapid show-then-hide) is discarded
//! instead of resurrecting stale state.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::constants::{CLOSE_ANIMATION, OPEN_ANIMATION};
use crate::focus::{FocusId, FocusTrap};
use crate::overlay::{LifecyclePhase, ModalPhase, OverlayError, OverlayEvent, rect_contains};
use crate::state::PageState;
use crate::surface::{OverlaySurface, SurfaceContext};

/// Per-show behavior of a modal. Defaults match a plain dialog: dismissable
/// from the backdrop and Escape, locks page scrolling, traps focus.
#[derive(Debug, Clone, Copy)]
pub struct ModalConfig {
    /// Close when a pointer-down lands outside the surface's content rect.
    pub close_on_backdrop: bool,
    /// Close when Escape reaches this modal as the top of the stack. When
    /// false the modal still consumes Escape so it cannot fall through to
    /// overlays beneath it.
    pub close_on_escape: bool,
    /// Suspend page scrolling while this modal is on the stack (including
    /// during its exit animation).
    pub prevent_body_scroll: bool,
    /// Install a [`FocusTrap`] over the surface's focusable ids for the
    /// duration of the show/hide cycle.
    pub focus_trap: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            close_on_backdrop: true,
            close_on_escape: true,
            prevent_body_scroll: true,
            focus_trap: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    seq: u64,
    deadline: Instant,
}

/// Live state for one stacked modal. Entries exist only while the modal is
/// on the stack (`Opening`, `Open`, or `Closing`).
#[derive(Debug)]
struct ModalEntry {
    config: ModalConfig,
    phase: ModalPhase,
    seq: u64,
    pending: Option<Pending>,
    /// A `show` arrived while this entry was closing; restart the open
    /// cycle once the close completes.
    reopen: bool,
    trap: Option<FocusTrap>,
}

/// Owns the modal stack for one page. `I` is the host's modal identifier.
pub struct ModalManager<I: Copy + Eq + Ord + fmt::Debug> {
    surfaces: BTreeMap<I, Box<dyn OverlaySurface>>,
    entries: BTreeMap<I, ModalEntry>,
    /// Bottom-to-top stacking order. Render walks it forward; dismissal
    /// walks it backward.
    stack: Vec<I>,
    /// Focus owner when no trap is installed, and the restore target once
    /// the last trap is released.
    page_focus: Option<FocusId>,
    state: PageState,
    events: Vec<OverlayEvent<I>>,
    seq: u64,
    open_animation: Duration,
    close_animation: Duration,
}

impl<I: Copy + Eq + Ord + fmt::Debug> Default for ModalManager<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Copy + Eq + Ord + fmt::Debug> ModalManager<I> {
    pub fn new() -> Self {
        Self::with_animations(OPEN_ANIMATION, CLOSE_ANIMATION)
    }

    /// Construct with explicit animation durations. `Duration::ZERO` makes
    /// every transition settle on the next `tick`.
    pub fn with_animations(open_animation: Duration, close_animation: Duration) -> Self {
        Self {
            surfaces: BTreeMap::new(),
            entries: BTreeMap::new(),
            stack: Vec::new(),
            page_focus: None,
            state: PageState::new(),
            events: Vec::new(),
            seq: 0,
            open_animation,
            close_animation,
        }
    }

    /// Register the surface rendered for `id`. Each id holds at most one
    /// surface; a second registration is rejected rather than silently
    /// replacing the first.
    pub fn register_surface(
        &mut self,
        id: I,
        surface: Box<dyn OverlaySurface>,
    ) -> Result<(), OverlayError> {
        if self.surfaces.contains_key(&id) {
            return Err(OverlayError::AlreadyRegistered);
        }
        self.surfaces.insert(id, surface);
        Ok(())
    }

    /// Unregister `id`, returning its surface. An active entry is dropped
    /// without close notifications; use `hide` first for a clean teardown.
    pub fn remove_surface(&mut self, id: I) -> Option<Box<dyn OverlaySurface>> {
        self.entries.remove(&id);
        self.stack.retain(|stacked| *stacked != id);
        let surface = self.surfaces.remove(&id);
        self.refresh_scroll_lock();
        surface
    }

    pub fn surface(&self, id: I) -> Option<&dyn OverlaySurface> {
        self.surfaces.get(&id).map(Box::as_ref)
    }

    pub fn surface_mut(&mut self, id: I) -> Option<&mut dyn OverlaySurface> {
        self.surfaces.get_mut(&id).map(Box::as_mut)
    }

    /// Request that `id` open above everything currently stacked. A show
    /// for a modal that is already open (or opening) restarts it: the entry
    /// closes out and reopens once the exit animation completes. Returns
    /// false only when no surface is registered for `id`.
    pub fn show(&mut self, id: I, options: Option<ModalConfig>) -> bool {
        if !self.surfaces.contains_key(&id) {
            tracing::warn!(modal_id = ?id, "show requested for unregistered modal");
            return false;
        }
        let now = Instant::now();
        if let Some(entry) = self.entries.get_mut(&id) {
            if let Some(config) = options {
                entry.config = config;
            }
            if entry.phase == ModalPhase::Closing {
                entry.reopen = true;
                return true;
            }
            self.begin_close(id, now, true);
            return true;
        }
        self.begin_open(id, options.unwrap_or_default(), now);
        true
    }

    /// Request that `id` close. Returns false when `id` is not on the stack
    /// or is already closing (an already-closing hide also cancels any
    /// pending reopen).
    pub fn hide(&mut self, id: I) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if entry.phase == ModalPhase::Closing {
            entry.reopen = false;
            return false;
        }
        self.begin_close(id, Instant::now(), false);
        true
    }

    /// Close the top-most modal that is not already closing.
    pub fn close_top(&mut self) -> bool {
        match self.top() {
            Some(id) => {
                self.begin_close(id, Instant::now(), false);
                true
            }
            None => false,
        }
    }

    /// Escape pressed. The top-most non-closing modal decides: close if its
    /// config allows, but consume the key either way so Escape never falls
    /// through a modal to overlays (or page handlers) beneath it. Returns
    /// true when the key was consumed.
    pub fn handle_escape(&mut self) -> bool {
        let Some(id) = self.top() else {
            return false;
        };
        let closes = self
            .entries
            .get(&id)
            .is_some_and(|entry| entry.config.close_on_escape);
        if closes {
            self.begin_close(id, Instant::now(), false);
        }
        true
    }

    /// Close every stacked modal, top-down.
    pub fn close_all(&mut self) {
        let order: Vec<I> = self.stack.iter().rev().copied().collect();
        let now = Instant::now();
        for id in order {
            if self
                .entries
                .get(&id)
                .is_some_and(|entry| entry.phase != ModalPhase::Closing)
            {
                self.begin_close(id, now, false);
            }
        }
    }

    pub fn has_active(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Stacked ids, bottom to top (closing entries included).
    pub fn active_ids(&self) -> Vec<I> {
        self.stack.clone()
    }

    /// The top-most modal that is open or opening.
    pub fn top(&self) -> Option<I> {
        self.stack.iter().rev().copied().find(|id| {
            self.entries
                .get(id)
                .is_some_and(|entry| entry.phase != ModalPhase::Closing)
        })
    }

    pub fn phase(&self, id: I) -> ModalPhase {
        self.entries
            .get(&id)
            .map_or(ModalPhase::Closed, |entry| entry.phase)
    }

    /// Whether `id` reads as expanded to the host's trigger element. False
    /// as soon as a close is requested, not just once it completes.
    pub fn is_expanded(&self, id: I) -> bool {
        matches!(self.phase(id), ModalPhase::Opening | ModalPhase::Open)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.state.scroll_locked()
    }

    /// Drain the scroll-lock transition, if one happened since the last
    /// call. See [`PageState::take_scroll_lock_change`].
    pub fn take_scroll_lock_change(&mut self) -> Option<bool> {
        self.state.take_scroll_lock_change()
    }

    /// Tell the manager which page element holds focus, so it can be saved
    /// and restored across a modal cycle.
    pub fn set_focus(&mut self, focused: Option<FocusId>) {
        self.page_focus = focused;
    }

    /// The id that currently holds focus: the top-most trap's cursor, or
    /// the page focus when nothing traps.
    pub fn current_focus(&self) -> Option<FocusId> {
        for id in self.stack.iter().rev() {
            if let Some(trap) = self.entries.get(id).and_then(|entry| entry.trap.as_ref()) {
                return trap.current();
            }
        }
        self.page_focus
    }

    /// Move focus forward/backward within the top-most trap. Returns the
    /// newly focused id, or None when no trap is installed (the host's own
    /// Tab order applies).
    pub fn focus_advance(&mut self, forward: bool) -> Option<FocusId> {
        for id in self.stack.iter().rev() {
            if let Some(entry) = self.entries.get_mut(id)
                && entry.phase != ModalPhase::Closing
                && let Some(trap) = entry.trap.as_mut()
            {
                trap.advance(forward);
                return trap.current();
            }
        }
        None
    }

    /// Settle any animation whose deadline has passed. Call once per frame
    /// with a monotonic `now`.
    pub fn tick(&mut self, now: Instant) {
        let due: Vec<I> = self
            .entries
            .iter()
            .filter_map(|(id, entry)| {
                entry
                    .pending
                    .as_ref()
                    .is_some_and(|pending| pending.deadline <= now && pending.seq == entry.seq)
                    .then_some(*id)
            })
            .collect();
        for id in due {
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            entry.pending = None;
            match entry.phase {
                ModalPhase::Opening => {
                    entry.phase = ModalPhase::Open;
                    self.events.push(OverlayEvent {
                        id,
                        phase: LifecyclePhase::Opened,
                    });
                    tracing::debug!(modal_id = ?id, "modal open");
                }
                ModalPhase::Closing => self.complete_close(id, now),
                _ => {}
            }
        }
    }

    /// Drain lifecycle notifications accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<OverlayEvent<I>> {
        std::mem::take(&mut self.events)
    }

    /// A pointer-down at (`column`, `row`) with the page occupying `area`.
    /// Returns true when an active modal claimed the click as a backdrop
    /// click (closing itself if its config allows); false when the click
    /// hit the top modal's content or no modal is active.
    pub fn handle_backdrop_click(&mut self, column: u16, row: u16, area: Rect) -> bool {
        let Some(id) = self.top() else {
            return false;
        };
        let Some(surface) = self.surfaces.get(&id) else {
            return false;
        };
        if rect_contains(surface.content_rect(area), column, row) {
            return false;
        }
        let closes = self
            .entries
            .get(&id)
            .is_some_and(|entry| entry.config.close_on_backdrop);
        if closes {
            self.begin_close(id, Instant::now(), false);
        }
        true
    }

    /// Route an input event to the top modal's surface. Returns true when
    /// the surface consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Some(id) = self.top() else {
            return false;
        };
        let ctx = SurfaceContext {
            phase: self.phase(id),
            focused: self.current_focus(),
            top: true,
        };
        match self.surfaces.get_mut(&id) {
            Some(surface) => surface.handle_event(event, &ctx),
            None => false,
        }
    }

    /// Dim the page once, then render the stack bottom to top. Closing
    /// entries still render (their exit animation) but are never `top`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.stack.is_empty() {
            return;
        }
        let buf = frame.buffer_mut();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(Style::new().add_modifier(Modifier::DIM));
                }
            }
        }
        let top = self.top();
        let order = self.stack.clone();
        for id in order {
            let Some(entry) = self.entries.get(&id) else {
                continue;
            };
            let ctx = SurfaceContext {
                phase: entry.phase,
                focused: entry.trap.as_ref().and_then(FocusTrap::current),
                top: top == Some(id),
            };
            if let Some(surface) = self.surfaces.get_mut(&id) {
                surface.render(frame, area, &ctx);
            }
        }
    }

    fn begin_open(&mut self, id: I, config: ModalConfig, now: Instant) {
        let saved = self.current_focus();
        let focusables = self
            .surfaces
            .get(&id)
            .map(|surface| surface.focusable_ids())
            .unwrap_or_default();
        let trap = config
            .focus_trap
            .then(|| FocusTrap::new(saved, focusables));
        self.seq += 1;
        self.entries.insert(
            id,
            ModalEntry {
                config,
                phase: ModalPhase::Opening,
                seq: self.seq,
                pending: Some(Pending {
                    seq: self.seq,
                    deadline: now + self.open_animation,
                }),
                reopen: false,
                trap,
            },
        );
        self.stack.push(id);
        self.refresh_scroll_lock();
        self.events.push(OverlayEvent {
            id,
            phase: LifecyclePhase::Opening,
        });
        tracing::debug!(modal_id = ?id, depth = self.stack.len(), "modal opening");
    }

    fn begin_close(&mut self, id: I, now: Instant, reopen: bool) {
        self.seq += 1;
        let seq = self.seq;
        let deadline = now + self.close_animation;
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.phase = ModalPhase::Closing;
            entry.seq = seq;
            entry.pending = Some(Pending { seq, deadline });
            entry.reopen = reopen;
        }
        self.events.push(OverlayEvent {
            id,
            phase: LifecyclePhase::Closing,
        });
        tracing::debug!(modal_id = ?id, reopen, "modal closing");
    }

    fn complete_close(&mut self, id: I, now: Instant) {
        let Some(mut entry) = self.entries.remove(&id) else {
            return;
        };
        self.stack.retain(|stacked| *stacked != id);
        if let Some(trap) = entry.trap.take() {
            self.restore_focus(trap.saved());
        }
        self.refresh_scroll_lock();
        self.events.push(OverlayEvent {
            id,
            phase: LifecyclePhase::Closed,
        });
        tracing::debug!(modal_id = ?id, depth = self.stack.len(), "modal closed");
        if entry.reopen {
            self.begin_open(id, entry.config, now);
        }
    }

    /// Hand focus back after a trap is released: into the next trap down
    /// when the closed modal was nested, otherwise to the page.
    fn restore_focus(&mut self, saved: Option<FocusId>) {
        let Some(saved) = saved else {
            return;
        };
        for id in self.stack.iter().rev() {
            if let Some(trap) = self.entries.get_mut(id).and_then(|entry| entry.trap.as_mut()) {
                trap.restore_into(saved);
                return;
            }
        }
        self.page_focus = Some(saved);
    }

    /// Scroll stays locked while any stacked entry (closing included) asked
    /// for it; released only once the last such entry finishes closing.
    fn refresh_scroll_lock(&mut self) {
        let locked = self
            .entries
            .values()
            .any(|entry| entry.config.prevent_body_scroll);
        self.state.set_scroll_locked(locked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ModalSurface;

    struct StubSurface {
        rect: Rect,
        focusables: Vec<FocusId>,
    }

    impl StubSurface {
        fn boxed(rect: Rect) -> Box<dyn OverlaySurface> {
            Box::new(Self {
                rect,
                focusables: Vec::new(),
            })
        }

        fn boxed_with_focus(rect: Rect, focusables: Vec<FocusId>) -> Box<dyn OverlaySurface> {
            Box::new(Self { rect, focusables })
        }
    }

    impl ModalSurface for StubSurface {
        fn content_rect(&self, _area: Rect) -> Rect {
            self.rect
        }

        fn focusable_ids(&self) -> Vec<FocusId> {
            self.focusables.clone()
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect, _ctx: &SurfaceContext) {}
    }

    fn manager() -> ModalManager<&'static str> {
        ModalManager::with_animations(OPEN_ANIMATION, CLOSE_ANIMATION)
    }

    fn far() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    fn phases(events: &[OverlayEvent<&'static str>]) -> Vec<LifecyclePhase> {
        events.iter().map(|event| event.phase).collect()
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut m = manager();
        m.register_surface("dialog", StubSurface::boxed(Rect::new(10, 5, 30, 8)))
            .unwrap();
        let err = m
            .register_surface("dialog", StubSurface::boxed(Rect::new(0, 0, 10, 4)))
            .unwrap_err();
        assert!(matches!(err, OverlayError::AlreadyRegistered));
    }

    #[test]
    fn show_for_unregistered_id_is_refused() {
        let mut m = manager();
        assert!(!m.show("missing", None));
        assert!(!m.has_active());
        assert!(m.take_events().is_empty());
    }

    #[test]
    fn show_tick_hide_full_cycle() {
        let mut m = manager();
        m.register_surface("dialog", StubSurface::boxed(Rect::new(10, 5, 30, 8)))
            .unwrap();
        assert!(m.show("dialog", None));
        assert_eq!(m.phase("dialog"), ModalPhase::Opening);
        assert!(m.is_scroll_locked());
        m.tick(far());
        assert_eq!(m.phase("dialog"), ModalPhase::Open);
        assert!(m.hide("dialog"));
        assert_eq!(m.phase("dialog"), ModalPhase::Closing);
        assert!(m.is_scroll_locked());
        m.tick(far());
        assert_eq!(m.phase("dialog"), ModalPhase::Closed);
        assert!(!m.has_active());
        assert!(!m.is_scroll_locked());
        assert_eq!(
            phases(&m.take_events()),
            vec![
                LifecyclePhase::Opening,
                LifecyclePhase::Opened,
                LifecyclePhase::Closing,
                LifecyclePhase::Closed,
            ]
        );
    }

    #[test]
    fn hide_before_open_completes_discards_opened() {
        let mut m = manager();
        m.register_surface("dialog", StubSurface::boxed(Rect::new(10, 5, 30, 8)))
            .unwrap();
        m.show("dialog", None);
        m.hide("dialog");
        m.tick(far());
        assert_eq!(m.phase("dialog"), ModalPhase::Closed);
        // the superseded open must not fire
        assert_eq!(
            phases(&m.take_events()),
            vec![
                LifecyclePhase::Opening,
                LifecyclePhase::Closing,
                LifecyclePhase::Closed,
            ]
        );
    }

    #[test]
    fn hide_is_idempotent_while_closing() {
        let mut m = manager();
        m.register_surface("dialog", StubSurface::boxed(Rect::new(10, 5, 30, 8)))
            .unwrap();
        m.show("dialog", None);
        m.tick(far());
        assert!(m.hide("dialog"));
        assert!(!m.hide("dialog"));
        m.tick(far());
        assert_eq!(
            phases(&m.take_events()),
            vec![
                LifecyclePhase::Opening,
                LifecyclePhase::Opened,
                LifecyclePhase::Closing,
                LifecyclePhase::Closed,
            ]
        );
    }

    #[test]
    fn reshow_closes_then_reopens_once() {
        let mut m = manager();
        m.register_surface("dialog", StubSurface::boxed(Rect::new(10, 5, 30, 8)))
            .unwrap();
        m.show("dialog", None);
        m.tick(far());
        assert!(m.show("dialog", None));
        assert_eq!(m.phase("dialog"), ModalPhase::Closing);
        let settle = far();
        m.tick(settle);
        // close completed and the reopen started its own enter animation
        assert_eq!(m.phase("dialog"), ModalPhase::Opening);
        m.tick(settle + Duration::from_secs(60));
        assert_eq!(m.phase("dialog"), ModalPhase::Open);
        assert_eq!(
            phases(&m.take_events()),
            vec![
                LifecyclePhase::Opening,
                LifecyclePhase::Opened,
                LifecyclePhase::Closing,
                LifecyclePhase::Closed,
                LifecyclePhase::Opening,
                LifecyclePhase::Opened,
            ]
        );
    }

    #[test]
    fn stack_orders_and_close_top() {
        let mut m = manager();
        m.register_surface("first", StubSurface::boxed(Rect::new(5, 5, 20, 6)))
            .unwrap();
        m.register_surface("second", StubSurface::boxed(Rect::new(8, 8, 20, 6)))
            .unwrap();
        m.show("first", None);
        m.show("second", None);
        m.tick(far());
        assert_eq!(m.active_ids(), vec!["first", "second"]);
        assert_eq!(m.top(), Some("second"));
        assert!(m.close_top());
        m.tick(far());
        assert_eq!(m.active_ids(), vec!["first"]);
        assert_eq!(m.top(), Some("first"));
    }

    #[test]
    fn escape_consumed_even_when_close_disabled() {
        let mut m = manager();
        m.register_surface("sticky", StubSurface::boxed(Rect::new(5, 5, 20, 6)))
            .unwrap();
        m.show(
            "sticky",
            Some(ModalConfig {
                close_on_escape: false,
                ..ModalConfig::default()
            }),
        );
        m.tick(far());
        assert!(m.handle_escape());
        assert_eq!(m.phase("sticky"), ModalPhase::Open);
    }

    #[test]
    fn backdrop_click_outside_content_closes() {
        let mut m = manager();
        m.register_surface("dialog", StubSurface::boxed(Rect::new(10, 5, 30, 8)))
            .unwrap();
        m.show("dialog", None);
        m.tick(far());
        let area = Rect::new(0, 0, 80, 24);
        // inside the dialog box: not a backdrop click
        assert!(!m.handle_backdrop_click(15, 7, area));
        assert_eq!(m.phase("dialog"), ModalPhase::Open);
        // outside: claimed and closed
        assert!(m.handle_backdrop_click(2, 2, area));
        assert_eq!(m.phase("dialog"), ModalPhase::Closing);
    }

    #[test]
    fn backdrop_click_claimed_but_ignored_when_disabled() {
        let mut m = manager();
        m.register_surface("dialog", StubSurface::boxed(Rect::new(10, 5, 30, 8)))
            .unwrap();
        m.show(
            "dialog",
            Some(ModalConfig {
                close_on_backdrop: false,
                ..ModalConfig::default()
            }),
        );
        m.tick(far());
        assert!(m.handle_backdrop_click(2, 2, Rect::new(0, 0, 80, 24)));
        assert_eq!(m.phase("dialog"), ModalPhase::Open);
    }

    #[test]
    fn focus_trapped_then_restored() {
        let mut m = manager();
        m.register_surface(
            "dialog",
            StubSurface::boxed_with_focus(Rect::new(10, 5, 30, 8), vec![10, 20]),
        )
        .unwrap();
        m.set_focus(Some(5));
        m.show("dialog", None);
        assert_eq!(m.current_focus(), Some(10));
        m.focus_advance(true);
        assert_eq!(m.current_focus(), Some(20));
        m.focus_advance(true);
        assert_eq!(m.current_focus(), Some(10));
        m.hide("dialog");
        m.tick(far());
        assert_eq!(m.current_focus(), Some(5));
    }

    #[test]
    fn nested_close_restores_into_lower_trap() {
        let mut m = manager();
        m.register_surface(
            "outer",
            StubSurface::boxed_with_focus(Rect::new(5, 5, 30, 10), vec![1, 2]),
        )
        .unwrap();
        m.register_surface(
            "inner",
            StubSurface::boxed_with_focus(Rect::new(10, 7, 20, 6), vec![7, 8]),
        )
        .unwrap();
        m.show("outer", None);
        m.focus_advance(true);
        assert_eq!(m.current_focus(), Some(2));
        m.show("inner", None);
        assert_eq!(m.current_focus(), Some(7));
        m.hide("inner");
        m.tick(far());
        assert_eq!(m.current_focus(), Some(2));
    }

    #[test]
    fn close_all_unwinds_top_down() {
        let mut m = manager();
        m.register_surface("first", StubSurface::boxed(Rect::new(5, 5, 20, 6)))
            .unwrap();
        m.register_surface("second", StubSurface::boxed(Rect::new(8, 8, 20, 6)))
            .unwrap();
        m.show("first", None);
        m.show("second", None);
        m.tick(far());
        m.take_events();
        m.close_all();
        m.tick(far());
        let events = m.take_events();
        let closing: Vec<&'static str> = events
            .iter()
            .filter(|event| event.phase == LifecyclePhase::Closing)
            .map(|event| event.id)
            .collect();
        assert_eq!(closing, vec!["second", "first"]);
        assert!(!m.has_active());
        assert!(!m.is_scroll_locked());
    }
}
