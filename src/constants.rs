//! Shared crate-wide constants.

use std::time::Duration;

/// Default duration of a modal's enter animation. `ModalManager::tick` moves
/// an `Opening` entry to `Open` once this much time has elapsed since the
/// `show` request.
pub const OPEN_ANIMATION: Duration = Duration::from_millis(150);

/// Default duration of a modal's exit animation. Cleanup (focus restore,
/// scroll-lock release, the `Closed` notification) runs only after this
/// much time has elapsed since the `hide` request.
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(120);

/// Default inset (in terminal cells) kept between a dropdown menu and the
/// viewport edges so a trigger near a corner never produces a menu flush
/// against (or past) the screen boundary.
///
/// Units: terminal cells. The dropdown manager accepts a per-instance
/// override for hosts that want a wider gutter.
pub const MENU_VIEWPORT_MARGIN: u16 = 1;

/// Minimum width a dropdown menu is given even when its items are narrow,
/// so short action labels still produce a grabbable surface.
pub const MENU_MIN_WIDTH: u16 = 12;
