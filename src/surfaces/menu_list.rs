use crossterm::event::{Event, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::constants::MENU_MIN_WIDTH;
use crate::keybindings::{Action, KeyBindings};
use crate::overlay::rect_contains;
use crate::surface::MenuSurface;
use crate::theme;

/// A dropdown menu rendered as a bordered item list. Arrow keys move the
/// selection; Enter or a click on a row reports that row's index.
pub struct ListMenu {
    items: Vec<String>,
    selected: usize,
    bindings: KeyBindings,
}

impl ListMenu {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            selected: 0,
            bindings: KeyBindings::default(),
        }
    }

    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, selected: usize) {
        self.selected = selected.min(self.items.len().saturating_sub(1));
    }

    fn bump_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.items.len() - 1);
        }
    }

    /// A row index for a click inside the bordered list, if it lands on an
    /// item.
    fn index_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        if !rect_contains(inner, column, row) {
            return None;
        }
        let index = (row - inner.y) as usize;
        (index < self.items.len()).then_some(index)
    }
}

impl MenuSurface for ListMenu {
    fn menu_size(&self) -> (u16, u16) {
        let label_width = self
            .items
            .iter()
            .map(|item| item.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let width = label_width.saturating_add(4).max(MENU_MIN_WIDTH);
        let height = (self.items.len() as u16).saturating_add(2);
        (width, height)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(item.as_str()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().bg(theme::menu_bg()).fg(theme::menu_fg()))
            .highlight_style(
                Style::default()
                    .bg(theme::menu_selected_bg())
                    .fg(theme::menu_selected_fg()),
            );
        let mut state = ListState::default();
        state.select(Some(self.selected.min(self.items.len().saturating_sub(1))));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn handle_event(&mut self, event: &Event, area: Rect) -> Option<usize> {
        match event {
            Event::Key(key) => {
                if self.bindings.matches(Action::MenuUp, key) {
                    self.bump_selection(-1);
                    None
                } else if self.bindings.matches(Action::MenuDown, key) {
                    self.bump_selection(1);
                    None
                } else if self.bindings.matches(Action::MenuSelect, key) {
                    (!self.items.is_empty()).then_some(self.selected)
                } else {
                    None
                }
            }
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                let index = self.index_at(area, mouse.column, mouse.row)?;
                self.selected = index;
                Some(index)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent};

    fn menu() -> ListMenu {
        ListMenu::new(vec![
            "Publish".to_string(),
            "Duplicate".to_string(),
            "Delete".to_string(),
        ])
    }

    #[test]
    fn menu_size_tracks_widest_label() {
        let m = menu();
        let (width, height) = m.menu_size();
        // "Duplicate" is 9 wide, plus borders and padding
        assert_eq!(width, 13);
        assert_eq!(height, 5);
        let empty = ListMenu::new(Vec::new());
        assert_eq!(empty.menu_size().0, MENU_MIN_WIDTH);
    }

    #[test]
    fn arrows_move_and_enter_selects() {
        let mut m = menu();
        let area = Rect::new(0, 0, 13, 5);
        let down = Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(m.handle_event(&down, area), None);
        assert_eq!(m.selected(), 1);
        let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(m.handle_event(&enter, area), Some(1));
        // selection clamps at the ends
        m.set_selected(2);
        assert_eq!(m.handle_event(&down, area), None);
        assert_eq!(m.selected(), 2);
    }

    #[test]
    fn click_maps_to_row_index() {
        let mut m = menu();
        let area = Rect::new(10, 4, 13, 5);
        let click = |column, row| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        // border row is not an item
        assert_eq!(m.handle_event(&click(11, 4), area), None);
        assert_eq!(m.handle_event(&click(11, 6), area), Some(1));
        assert_eq!(m.selected(), 1);
        // outside the menu entirely
        assert_eq!(m.handle_event(&click(0, 0), area), None);
    }
}
