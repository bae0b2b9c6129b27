use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::focus::FocusId;
use crate::surface::{ModalSurface, SurfaceContext};
use crate::theme;

/// A centered message dialog: bordered box, title, wrapped body text.
#[derive(Debug, Clone)]
pub struct DialogSurface {
    title: String,
    body: String,
    width: u16,
    height: u16,
    bg: Color,
    focusables: Vec<FocusId>,
}

impl DialogSurface {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            width: 70,
            height: 9,
            bg: theme::dialog_bg(),
            focusables: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn set_bg(&mut self, bg: Color) {
        self.bg = bg;
    }

    /// Declare the dialog's focusable element ids, in Tab order.
    pub fn set_focusables(&mut self, focusables: Vec<FocusId>) {
        self.focusables = focusables;
    }

    /// Clamp the dialog box to the available area to avoid drawing outside
    /// the buffer when the terminal is smaller than the preferred minimums.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let mut width = area.width.min(self.width).max(1);
        let mut height = area.height.min(self.height).max(1);
        if area.width >= 24 {
            width = width.max(24);
        }
        if area.height >= 5 {
            height = height.max(5);
        }
        let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
        let y = area
            .y
            .saturating_add(area.height.saturating_sub(height) / 2);
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl ModalSurface for DialogSurface {
    fn content_rect(&self, area: Rect) -> Rect {
        self.rect_for(area)
    }

    fn focusable_ids(&self) -> Vec<FocusId> {
        self.focusables.clone()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &SurfaceContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let title_style = if ctx.top {
            Style::default().fg(theme::dialog_title_fg())
        } else {
            Style::default().fg(theme::dialog_fg())
        };
        let block = Block::default()
            .title(self.title.as_str())
            .title_style(title_style)
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(self.body.as_str())
            .style(Style::default().bg(self.bg).fg(theme::dialog_fg()))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
    }
}
