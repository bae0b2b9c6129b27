use ratatui::style::Color;

// Centralized theme colors, kept as small helpers so a host can swap the
// palette in one place.

// Menu
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Gray
}
pub fn menu_selected_fg() -> Color {
    Color::Black
}

// Dialog / confirm
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}
pub fn dialog_separator() -> Color {
    Color::DarkGray
}
pub fn dialog_title_fg() -> Color {
    Color::Yellow
}

// Confirm dialog buttons
pub fn button_bg() -> Color {
    Color::DarkGray
}
pub fn button_fg() -> Color {
    Color::White
}
pub fn button_selected_bg() -> Color {
    Color::Gray
}
pub fn button_selected_fg() -> Color {
    Color::Black
}
