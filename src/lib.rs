//! Stack-aware overlay subsystem for terminal UIs.
//!
//! Three cooperating components, each usable independently but sharing one
//! dismissal policy:
//!
//! - [`overlay::modal::ModalManager`] owns the open/closed state of every
//!   modal dialog, enforces stacking order, drives enter/exit animation
//!   phases, and manages the page scroll-lock and focus containment.
//! - [`overlay::dropdown::DropdownManager`] positions a single floating menu
//!   relative to a trigger rectangle, flipping and clamping so the menu
//!   never leaves the viewport.
//! - [`overlay::dismiss::DismissCoordinator`] routes Escape, outside
//!   pointer-down, scroll, and resize events to the right overlay so host
//!   pages do not re-wire these rules themselves.
//!
//! Hosts provide visual elements through the [`surface::ModalSurface`] and
//! [`surface::MenuSurface`] traits; ready-made surfaces live in
//! [`surfaces`]. Managers are constructed explicitly and passed by
//! reference (no global singletons); lifecycle notifications are drained
//! via `take_events`.

pub mod actions;
pub mod constants;
pub mod focus;
pub mod keybindings;
pub mod overlay;
pub mod state;
pub mod surface;
pub mod surfaces;
pub mod theme;
pub mod tracing_sub;

pub use focus::{FocusId, FocusRing, FocusTrap};
pub use overlay::{
    DismissCoordinator, DropdownManager, LifecyclePhase, ModalConfig, ModalManager, ModalPhase,
    OpenDropdown, OverlayError, OverlayEvent, place_menu,
};
pub use surface::{MenuSurface, ModalSurface, OverlaySurface, SurfaceContext};
