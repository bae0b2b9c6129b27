//! Shared dismissal coordinator.
//!
//! One place owns the "how do overlays close" rules so modal and dropdown
//! hosts do not each re-wire Escape, outside clicks, scroll, and resize:
//!
//! - Escape goes to the top-most modal first; only when no modal is active
//!   does it close the open dropdown.
//! - A pointer-down outside an overlay dismisses it (modals per their
//!   backdrop config, dropdowns always).
//! - Scroll and resize close the open dropdown (its anchored position is
//!   stale) but never modals.
//!
//! The coordinator is a plain value threaded through the host's event loop;
//! constructing it twice cannot double-register anything.

use std::fmt;

use crossterm::event::{Event, KeyEventKind, MouseEventKind};
use ratatui::layout::Rect;

use crate::keybindings::{Action, KeyBindings};
use crate::overlay::dropdown::DropdownManager;
use crate::overlay::modal::ModalManager;

pub struct DismissCoordinator {
    viewport: Rect,
    bindings: KeyBindings,
}

impl DismissCoordinator {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            bindings: KeyBindings::default(),
        }
    }

    pub fn with_bindings(viewport: Rect, bindings: KeyBindings) -> Self {
        Self { viewport, bindings }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Apply the dismissal rules to one input event. Returns true when the
    /// event was consumed by an overlay; the host should skip its own
    /// handling for consumed events.
    pub fn handle_event<M, D>(
        &mut self,
        event: &Event,
        modals: &mut ModalManager<M>,
        dropdowns: &mut DropdownManager<D>,
    ) -> bool
    where
        M: Copy + Eq + Ord + fmt::Debug,
        D: Copy + Eq + Ord + fmt::Debug,
    {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.bindings.matches(Action::Dismiss, key) {
                    // modal-over-dropdown priority: a modal consumes the
                    // key even when its config keeps it open
                    if modals.handle_escape() {
                        return true;
                    }
                    return dropdowns.close();
                }
                false
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) => {
                    let mut handled = false;
                    if dropdowns.open().is_some() {
                        if dropdowns.contains(mouse.column, mouse.row) {
                            // the open menu sits above everything else; let
                            // it handle its own click
                            return false;
                        }
                        dropdowns.close();
                        handled = true;
                    }
                    if modals.handle_backdrop_click(mouse.column, mouse.row, self.viewport) {
                        handled = true;
                    }
                    handled
                }
                MouseEventKind::ScrollUp
                | MouseEventKind::ScrollDown
                | MouseEventKind::ScrollLeft
                | MouseEventKind::ScrollRight => dropdowns.close(),
                _ => false,
            },
            Event::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, *width, *height);
                dropdowns.close();
                false
            }
            _ => false,
        }
    }
}
