use std::any::Any;

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::focus::FocusId;
use crate::overlay::ModalPhase;

/// Per-render/per-event context handed to a modal surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceContext {
    /// Where the owning modal is in its open/close cycle.
    pub phase: ModalPhase,
    /// The focusable id that currently holds keyboard focus, if any.
    pub focused: Option<FocusId>,
    /// Whether the owning modal is the top of the stack (only the top
    /// receives input).
    pub top: bool,
}

/// A modal's visual element. The manager owns placement of the page-wide
/// backdrop; the surface owns the dialog box drawn inside it.
pub trait ModalSurface {
    /// The dialog box inside the page-wide `area`. A pointer-down inside
    /// this rect is a content click; a pointer-down outside it counts as a
    /// backdrop click for outside-dismissal.
    fn content_rect(&self, area: Rect) -> Rect;

    /// Focusable descendants, in Tab order. The first entry receives focus
    /// when the modal opens. Empty means the modal has no interactive
    /// elements and installs an empty trap (focus still cannot escape).
    fn focusable_ids(&self) -> Vec<FocusId> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &SurfaceContext);

    /// Handle an event routed to this surface while it is the top modal.
    /// Returns true when the event was consumed.
    fn handle_event(&mut self, _event: &Event, _ctx: &SurfaceContext) -> bool {
        false
    }
}

/// Storage trait for registered modal surfaces: `ModalSurface` plus
/// downcasting, so hosts can reach a concrete surface (e.g. to read a
/// confirm dialog's pending action) after registration.
pub trait OverlaySurface: ModalSurface + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: ModalSurface + Any> OverlaySurface for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A dropdown's floating menu element.
pub trait MenuSurface {
    /// Preferred (width, height) of the menu; the positioner clamps this to
    /// the viewport when space is short.
    fn menu_size(&self) -> (u16, u16);

    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Handle an event routed to the open menu. Returns the selected item
    /// index when the user activated an item; the host dispatches its
    /// action and then requests `close`.
    fn handle_event(&mut self, _event: &Event, _area: Rect) -> Option<usize> {
        None
    }
}
