//! Ready-made overlay surfaces: a plain dialog, a confirm dialog with
//! cancel/confirm buttons, and a list menu for dropdowns. Hosts with
//! bespoke visuals implement [`crate::surface::ModalSurface`] or
//! [`crate::surface::MenuSurface`] directly instead.

pub mod confirm;
pub mod dialog;
pub mod menu_list;

pub use confirm::{ConfirmAction, ConfirmSurface};
pub use dialog::DialogSurface;
pub use menu_list::ListMenu;
