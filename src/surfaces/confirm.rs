use crossterm::event::{Event, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Paragraph, Wrap};

use crate::focus::FocusId;
use crate::keybindings::{Action, KeyBindings};
use crate::overlay::rect_contains;
use crate::surface::{ModalSurface, SurfaceContext};
use crate::surfaces::dialog::DialogSurface;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Confirm,
    Cancel,
}

/// A confirm dialog: a [`DialogSurface`] frame with a body, a separator
/// line, and cancel/confirm buttons. The surface records the resolved
/// action; the host drains it with `take_action` after the manager routed
/// an event here.
#[derive(Debug)]
pub struct ConfirmSurface {
    dialog: DialogSurface,
    body: String,
    confirm_label: String,
    selected_confirm: bool,
    cancel_rect: Option<Rect>,
    confirm_rect: Option<Rect>,
    action: Option<ConfirmAction>,
    bindings: KeyBindings,
}

impl ConfirmSurface {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let mut dialog = DialogSurface::new(title, "");
        dialog.set_bg(theme::dialog_bg());
        Self {
            dialog,
            body: body.into(),
            confirm_label: "Confirm".to_string(),
            selected_confirm: true,
            cancel_rect: None,
            confirm_rect: None,
            action: None,
            bindings: KeyBindings::default(),
        }
    }

    pub fn set_prompt(&mut self, title: &str, body: &str) {
        self.dialog.set_title(title);
        self.body = body.to_string();
        self.selected_confirm = true;
        self.action = None;
    }

    pub fn set_confirm_label(&mut self, label: impl Into<String>) {
        self.confirm_label = label.into();
    }

    pub fn set_focusables(&mut self, focusables: Vec<FocusId>) {
        self.dialog.set_focusables(focusables);
    }

    pub fn selected_confirm(&self) -> bool {
        self.selected_confirm
    }

    /// Drain the action resolved by the last handled event, if any.
    pub fn take_action(&mut self) -> Option<ConfirmAction> {
        self.action.take()
    }

    /// Resolve one input event against the buttons. `None` means the event
    /// moved the selection (or was not for us).
    pub fn handle_confirm_event(&mut self, event: &Event) -> Option<ConfirmAction> {
        match event {
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                if self
                    .confirm_rect
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                {
                    return Some(ConfirmAction::Confirm);
                }
                if self
                    .cancel_rect
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                {
                    return Some(ConfirmAction::Cancel);
                }
                None
            }
            Event::Key(key) => {
                if self.bindings.matches(Action::ConfirmToggle, key) {
                    self.selected_confirm = !self.selected_confirm;
                    None
                } else if self.bindings.matches(Action::ConfirmLeft, key) {
                    self.selected_confirm = false;
                    None
                } else if self.bindings.matches(Action::ConfirmRight, key) {
                    self.selected_confirm = true;
                    None
                } else if self.bindings.matches(Action::ConfirmAccept, key) {
                    if self.selected_confirm {
                        Some(ConfirmAction::Confirm)
                    } else {
                        Some(ConfirmAction::Cancel)
                    }
                } else if self.bindings.matches(Action::ConfirmCancel, key) {
                    Some(ConfirmAction::Cancel)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl ModalSurface for ConfirmSurface {
    fn content_rect(&self, area: Rect) -> Rect {
        self.dialog.rect_for(area)
    }

    fn focusable_ids(&self) -> Vec<FocusId> {
        self.dialog.focusable_ids()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &SurfaceContext) {
        self.cancel_rect = None;
        self.confirm_rect = None;
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.dialog.render(frame, area, ctx);
        let rect = self.dialog.rect_for(area);
        if rect.width < 3 || rect.height < 3 {
            return;
        }
        let inner = Rect {
            x: rect.x.saturating_add(1),
            y: rect.y.saturating_add(1),
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(2),
        };
        let content = Rect {
            x: inner.x.saturating_add(1),
            y: inner.y,
            width: inner.width.saturating_sub(2),
            height: inner.height,
        };
        if content.height < 4 || content.width == 0 {
            return;
        }
        let separator_y = content.y.saturating_add(content.height.saturating_sub(2));
        let button_y = content.y.saturating_add(content.height.saturating_sub(1));
        let body_rect = Rect {
            x: content.x,
            y: content.y,
            width: content.width,
            height: content.height.saturating_sub(3),
        };
        let paragraph = Paragraph::new(self.body.as_str())
            .alignment(Alignment::Left)
            .style(Style::default().fg(theme::dialog_fg()))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, body_rect);

        let separator_style = Style::default().fg(theme::dialog_separator());
        let buffer = frame.buffer_mut();
        for x in content.x..content.x.saturating_add(content.width) {
            if let Some(cell) = buffer.cell_mut((x, separator_y)) {
                cell.set_symbol("─");
                cell.set_style(separator_style);
            }
        }

        let cancel = "[ Cancel ]".to_string();
        let confirm = format!("[ {} ]", self.confirm_label);
        let selected_style = Style::default()
            .fg(theme::button_selected_fg())
            .bg(theme::button_selected_bg())
            .add_modifier(Modifier::BOLD);
        let unselected_style = Style::default()
            .fg(theme::button_fg())
            .bg(theme::button_bg());
        let (cancel_style, confirm_style) = if self.selected_confirm {
            (unselected_style, selected_style)
        } else {
            (selected_style, unselected_style)
        };
        let total_width = (cancel.len() + 1 + confirm.len()) as u16;
        let start_x = content
            .x
            .saturating_add(content.width.saturating_sub(total_width));
        let max_width = content.right().saturating_sub(start_x) as usize;
        buffer.set_stringn(start_x, button_y, &cancel, max_width, cancel_style);
        let confirm_x = start_x.saturating_add(cancel.len() as u16 + 1);
        let max_width = content.right().saturating_sub(confirm_x) as usize;
        buffer.set_stringn(confirm_x, button_y, &confirm, max_width, confirm_style);
        self.cancel_rect = Some(Rect {
            x: start_x,
            y: button_y,
            width: cancel.len() as u16,
            height: 1,
        });
        self.confirm_rect = Some(Rect {
            x: confirm_x,
            y: button_y,
            width: confirm.len() as u16,
            height: 1,
        });
    }

    fn handle_event(&mut self, event: &Event, _ctx: &SurfaceContext) -> bool {
        if let Some(action) = self.handle_confirm_event(event) {
            self.action = Some(action);
            return true;
        }
        let Event::Key(key) = event else {
            return false;
        };
        self.bindings.matches(Action::ConfirmToggle, key)
            || self.bindings.matches(Action::ConfirmLeft, key)
            || self.bindings.matches(Action::ConfirmRight, key)
    }
}
