//! The overlay subsystem: a stack-aware modal manager, a viewport-aware
//! dropdown manager with its menu positioner, and the shared dismissal
//! coordinator that arbitrates Escape, outside clicks, scroll, and resize
//! between them.

pub mod dismiss;
pub mod dropdown;
pub mod modal;

pub use dismiss::DismissCoordinator;
pub use dropdown::{DropdownManager, OpenDropdown, place_menu};
pub use modal::{ModalConfig, ModalManager};

use ratatui::layout::Rect;
use thiserror::Error;

/// Animation state of a single modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    /// Mounted and animating in; already on the stack.
    Opening,
    Open,
    /// Animating out; still rendered (dimmed) but no longer interactive.
    Closing,
}

/// Lifecycle edge reported through the drained event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Opening,
    Opened,
    Closing,
    Closed,
}

/// A lifecycle notification for overlay `id`. Drained by the host via
/// `take_events` each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayEvent<I> {
    pub id: I,
    pub phase: LifecyclePhase,
}

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("a surface is already registered for this overlay id")]
    AlreadyRegistered,
}

/// Whether a terminal cell coordinate falls inside `rect`.
pub(crate) fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(rect_contains(rect, 2, 3));
        assert!(rect_contains(rect, 5, 4));
        assert!(!rect_contains(rect, 6, 3));
        assert!(!rect_contains(rect, 2, 5));
    }
}
