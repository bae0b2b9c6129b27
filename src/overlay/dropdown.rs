//! Single-slot dropdown manager and its viewport-aware menu positioner.
//!
//! At most one dropdown is open at a time: opening a second one closes the
//! first, and the lifecycle events come out in close-then-open order so
//! hosts observing the drained queue see the handoff explicitly.

use std::collections::BTreeMap;
use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;

use crate::constants::MENU_VIEWPORT_MARGIN;
use crate::overlay::{LifecyclePhase, OverlayError, OverlayEvent, rect_contains};
use crate::surface::MenuSurface;

/// The currently open dropdown: which trigger it belongs to and where the
/// positioner placed its menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDropdown<I> {
    pub trigger: I,
    pub trigger_rect: Rect,
    pub menu_rect: Rect,
}

/// Owns the open/closed state of every dropdown trigger on a page. `I` is
/// the host's trigger identifier.
pub struct DropdownManager<I: Copy + Eq + Ord + fmt::Debug> {
    surfaces: BTreeMap<I, Box<dyn MenuSurface>>,
    open: Option<OpenDropdown<I>>,
    margin: u16,
    events: Vec<OverlayEvent<I>>,
}

impl<I: Copy + Eq + Ord + fmt::Debug> Default for DropdownManager<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Copy + Eq + Ord + fmt::Debug> DropdownManager<I> {
    pub fn new() -> Self {
        Self {
            surfaces: BTreeMap::new(),
            open: None,
            margin: MENU_VIEWPORT_MARGIN,
            events: Vec::new(),
        }
    }

    /// Override the viewport gutter used by the positioner.
    pub fn with_margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }

    pub fn set_margin(&mut self, margin: u16) {
        self.margin = margin;
    }

    /// Register the menu rendered for trigger `id`.
    pub fn register_surface(
        &mut self,
        id: I,
        surface: Box<dyn MenuSurface>,
    ) -> Result<(), OverlayError> {
        if self.surfaces.contains_key(&id) {
            return Err(OverlayError::AlreadyRegistered);
        }
        self.surfaces.insert(id, surface);
        Ok(())
    }

    /// Unregister trigger `id`, closing its menu if it is the open one.
    pub fn remove_surface(&mut self, id: I) -> Option<Box<dyn MenuSurface>> {
        if self.open.is_some_and(|open| open.trigger == id) {
            self.close();
        }
        self.surfaces.remove(&id)
    }

    /// Toggle trigger `id`: close it when it is the open dropdown, open it
    /// (closing any other open dropdown first) otherwise. Returns true when
    /// the dropdown ends up open.
    pub fn toggle(&mut self, id: I, trigger_rect: Rect, viewport: Rect) -> bool {
        if self.open.is_some_and(|open| open.trigger == id) {
            self.close();
            return false;
        }
        let Some(surface) = self.surfaces.get(&id) else {
            tracing::warn!(trigger_id = ?id, "toggle requested for unregistered dropdown");
            return false;
        };
        let menu = surface.menu_size();
        self.close();
        let menu_rect = place_menu(trigger_rect, menu, viewport, self.margin);
        self.open = Some(OpenDropdown {
            trigger: id,
            trigger_rect,
            menu_rect,
        });
        self.events.push(OverlayEvent {
            id,
            phase: LifecyclePhase::Opened,
        });
        tracing::debug!(trigger_id = ?id, menu_rect = ?menu_rect, "dropdown opened");
        true
    }

    /// Close the open dropdown, if any. Returns true when one was open.
    pub fn close(&mut self) -> bool {
        match self.open.take() {
            Some(open) => {
                self.events.push(OverlayEvent {
                    id: open.trigger,
                    phase: LifecyclePhase::Closed,
                });
                tracing::debug!(trigger_id = ?open.trigger, "dropdown closed");
                true
            }
            None => false,
        }
    }

    pub fn open(&self) -> Option<OpenDropdown<I>> {
        self.open
    }

    /// Whether trigger `id` reads as expanded to the host.
    pub fn is_expanded(&self, id: I) -> bool {
        self.open.is_some_and(|open| open.trigger == id)
    }

    /// Whether a cell falls inside the open dropdown's trigger or menu; a
    /// pointer-down anywhere else is an outside click.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.open.is_some_and(|open| {
            rect_contains(open.trigger_rect, column, row)
                || rect_contains(open.menu_rect, column, row)
        })
    }

    /// Drain lifecycle notifications accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<OverlayEvent<I>> {
        std::mem::take(&mut self.events)
    }

    /// Route an input event to the open menu. Returns the trigger id and
    /// selected item index when the user activated an item.
    pub fn handle_event(&mut self, event: &Event) -> Option<(I, usize)> {
        let open = self.open?;
        let surface = self.surfaces.get_mut(&open.trigger)?;
        surface
            .handle_event(event, open.menu_rect)
            .map(|index| (open.trigger, index))
    }

    /// Render the open menu above whatever the host already drew.
    pub fn render(&mut self, frame: &mut Frame) {
        let Some(open) = self.open else {
            return;
        };
        if let Some(surface) = self.surfaces.get_mut(&open.trigger) {
            frame.render_widget(Clear, open.menu_rect);
            surface.render(frame, open.menu_rect);
        }
    }
}

/// Place a menu of preferred size `menu` next to `trigger` inside
/// `viewport`, keeping `margin` cells clear of every viewport edge.
///
/// Vertical: below the trigger when the menu fits there (or when below has
/// strictly more room than above); otherwise flipped above, bottom edge
/// pinned to the trigger's top. Horizontal: right edges aligned when that
/// keeps the menu in bounds, else left edges, else centered on the trigger.
/// A final clamp on both axes guarantees the result never crosses the
/// margin-inset bounds even for oversized menus or off-screen triggers.
pub fn place_menu(trigger: Rect, menu: (u16, u16), viewport: Rect, margin: u16) -> Rect {
    let bounds = Rect {
        x: viewport.x.saturating_add(margin),
        y: viewport.y.saturating_add(margin),
        width: viewport.width.saturating_sub(margin.saturating_mul(2)),
        height: viewport.height.saturating_sub(margin.saturating_mul(2)),
    };
    let width = menu.0.min(bounds.width);
    let height = menu.1.min(bounds.height);

    let trigger_bottom = trigger.y.saturating_add(trigger.height);
    let space_below = bounds.bottom().saturating_sub(trigger_bottom);
    let space_above = trigger.y.saturating_sub(bounds.y);
    let y = if space_below >= height || space_below > space_above {
        trigger_bottom
    } else {
        trigger.y.saturating_sub(height)
    };

    let trigger_right = trigger.x.saturating_add(trigger.width);
    let x = if trigger_right >= bounds.x.saturating_add(width) {
        // right edges aligned
        trigger_right - width
    } else if trigger.x.saturating_add(width) <= bounds.right() {
        // left edges aligned
        trigger.x
    } else {
        // centered on the trigger
        let center = trigger.x.saturating_add(trigger.width / 2);
        center.saturating_sub(width / 2)
    };

    let max_x = bounds.right().saturating_sub(width).max(bounds.x);
    let max_y = bounds.bottom().saturating_sub(height).max(bounds.y);
    Rect {
        x: x.clamp(bounds.x, max_x),
        y: y.clamp(bounds.y, max_y),
        width,
        height,
    }
}
