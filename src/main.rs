use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use term_overlay::actions::{ActionTable, ItemAction};
use term_overlay::surfaces::{ConfirmAction, ConfirmSurface, DialogSurface, ListMenu};
use term_overlay::{
    DismissCoordinator, DropdownManager, LifecyclePhase, ModalManager,
};

const DUPLICATE_DIALOG: &str = "duplicate-dialog";
const CONFIRM_DIALOG: &str = "confirm-dialog";

/// Demo dashboard for the overlay subsystem: a product list with per-row
/// action dropdowns, a confirm dialog, and a plain info dialog, all wired
/// through the shared dismissal coordinator.
#[derive(Debug, Parser)]
#[command(name = "term-overlay-demo")]
struct Cli {
    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// Override the modal enter animation, in milliseconds.
    #[arg(long)]
    open_ms: Option<u64>,
    /// Override the modal exit animation, in milliseconds.
    #[arg(long)]
    close_ms: Option<u64>,
}

/// Stable identifier for a product row. Dropdown surfaces are keyed by
/// this, not by the row's position, so deleting a row cannot leave the
/// remaining menus attached to shifted indices.
type RowId = usize;

struct Row {
    id: RowId,
    name: String,
    published: bool,
    table: ActionTable,
}

impl Row {
    fn new(id: RowId, name: &str, published: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            published,
            table: ActionTable::row_defaults(published),
        }
    }
}

struct App {
    rows: Vec<Row>,
    selected: usize,
    modals: ModalManager<&'static str>,
    dropdowns: DropdownManager<RowId>,
    coordinator: DismissCoordinator,
    /// Pending action while the confirm dialog is up.
    pending: Option<(RowId, ItemAction)>,
    status: String,
    list_area: Rect,
}

impl App {
    fn new(cli: &Cli) -> Result<Self, term_overlay::OverlayError> {
        let rows = vec![
            Row::new(0, "Starter plan", true),
            Row::new(1, "Team plan", false),
            Row::new(2, "Enterprise plan", true),
        ];

        let open = cli
            .open_ms
            .map(Duration::from_millis)
            .unwrap_or(term_overlay::constants::OPEN_ANIMATION);
        let close = cli
            .close_ms
            .map(Duration::from_millis)
            .unwrap_or(term_overlay::constants::CLOSE_ANIMATION);
        let mut modals = ModalManager::with_animations(open, close);
        modals.register_surface(
            DUPLICATE_DIALOG,
            Box::new(DialogSurface::new(
                "Duplicate",
                indoc! {"
                    A copy of the selected product will be created
                    in draft state.

                    Press Esc or click outside to dismiss.
                "},
            )),
        )?;
        modals.register_surface(
            CONFIRM_DIALOG,
            Box::new(ConfirmSurface::new("Confirm", "")),
        )?;

        let mut dropdowns = DropdownManager::new();
        for row in &rows {
            dropdowns.register_surface(row.id, Box::new(ListMenu::new(row.table.labels())))?;
        }

        Ok(Self {
            rows,
            selected: 0,
            modals,
            dropdowns,
            coordinator: DismissCoordinator::new(Rect::default()),
            pending: None,
            status: "a: actions  d: duplicate  Ctrl+Q: quit".to_string(),
            list_area: Rect::default(),
        })
    }

    /// The trigger cell for a row's actions button, derived from the list
    /// area laid out on the last render.
    fn trigger_rect(&self, row: usize) -> Rect {
        let y = self
            .list_area
            .y
            .saturating_add(1)
            .saturating_add(row as u16);
        Rect {
            x: self
                .list_area
                .right()
                .saturating_sub(12)
                .max(self.list_area.x),
            y,
            width: 11,
            height: 1,
        }
    }

    /// The position of the row identified by `id`, if it still exists.
    fn row_index(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    fn open_row_actions(&mut self, row: usize) {
        let Some(id) = self.rows.get(row).map(|row| row.id) else {
            return;
        };
        let trigger = self.trigger_rect(row);
        self.dropdowns
            .toggle(id, trigger, self.coordinator.viewport());
    }

    fn dispatch(&mut self, row: usize, action: ItemAction) {
        match action {
            ItemAction::Delete => {
                self.pending = Some((self.rows[row].id, action));
                let prompt = format!("Really delete \"{}\"?", self.rows[row].name);
                if let Some(surface) = self.modals.surface_mut(CONFIRM_DIALOG)
                    && let Some(confirm) = surface.as_any_mut().downcast_mut::<ConfirmSurface>()
                {
                    confirm.set_prompt("Delete product", &prompt);
                    confirm.set_confirm_label("Delete");
                }
                self.modals.show(CONFIRM_DIALOG, None);
            }
            ItemAction::Publish | ItemAction::Unpublish => {
                let published = action == ItemAction::Publish;
                self.rows[row].published = published;
                self.rows[row].table = ActionTable::row_defaults(published);
                let id = self.rows[row].id;
                self.dropdowns.remove_surface(id);
                let _ = self
                    .dropdowns
                    .register_surface(id, Box::new(ListMenu::new(self.rows[row].table.labels())));
                self.status = format!("{}: {}", self.rows[row].name, action);
            }
            ItemAction::Duplicate => {
                self.modals.show(DUPLICATE_DIALOG, None);
            }
            ItemAction::OpenChat => {
                self.status = format!("{}: chat not wired in this demo", self.rows[row].name);
            }
        }
    }

    fn resolve_confirm(&mut self) {
        let action = self
            .modals
            .surface_mut(CONFIRM_DIALOG)
            .and_then(|surface| surface.as_any_mut().downcast_mut::<ConfirmSurface>())
            .and_then(ConfirmSurface::take_action);
        let Some(action) = action else {
            return;
        };
        self.modals.hide(CONFIRM_DIALOG);
        let Some((id, pending)) = self.pending.take() else {
            return;
        };
        if action == ConfirmAction::Confirm
            && pending == ItemAction::Delete
            && let Some(row) = self.row_index(id)
        {
            let removed = self.rows.remove(row);
            self.dropdowns.remove_surface(id);
            self.selected = self.selected.min(self.rows.len().saturating_sub(1));
            self.status = format!("Deleted \"{}\"", removed.name);
        } else {
            self.status = "Delete cancelled".to_string();
        }
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if self
            .coordinator
            .handle_event(event, &mut self.modals, &mut self.dropdowns)
        {
            return false;
        }
        if let Some((id, index)) = self.dropdowns.handle_event(event) {
            self.dropdowns.close();
            if let Some(row) = self.row_index(id)
                && let Some(action) = self.rows[row].table.resolve(index)
            {
                self.dispatch(row, action);
            }
            return false;
        }
        if self.modals.has_active() {
            let consumed = self.modals.handle_event(event);
            if consumed {
                self.resolve_confirm();
            }
            if let Event::Key(key) = event
                && key.kind == KeyEventKind::Press
                && !consumed
            {
                match key.code {
                    KeyCode::Tab => {
                        self.modals.focus_advance(true);
                    }
                    KeyCode::BackTab => {
                        self.modals.focus_advance(false);
                    }
                    _ => {}
                }
            }
            return false;
        }
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return true;
            }
            match key.code {
                KeyCode::Up => self.selected = self.selected.saturating_sub(1),
                KeyCode::Down => {
                    self.selected =
                        (self.selected + 1).min(self.rows.len().saturating_sub(1));
                }
                KeyCode::Char('a') => self.open_row_actions(self.selected),
                KeyCode::Char('d') => {
                    self.modals.show(DUPLICATE_DIALOG, None);
                }
                _ => {}
            }
        }
        false
    }

    fn drain_notifications(&mut self) {
        for event in self.modals.take_events() {
            tracing::debug!(modal_id = event.id, phase = ?event.phase, "modal lifecycle");
            if event.phase == LifecyclePhase::Closed {
                self.status = format!("{} closed", event.id);
            }
        }
        for event in self.dropdowns.take_events() {
            tracing::debug!(trigger = event.id, phase = ?event.phase, "dropdown lifecycle");
        }
        if let Some(locked) = self.modals.take_scroll_lock_change() {
            tracing::debug!(locked, "page scroll lock changed");
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.coordinator.set_viewport(area);
        let [header, list_area, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);
        self.list_area = list_area;

        frame.render_widget(
            Paragraph::new("Products").style(Style::default().add_modifier(Modifier::BOLD)),
            header,
        );
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| {
                let marker = if row.published { "published" } else { "draft" };
                ListItem::new(format!("{:<24} {:>10}  [ actions ]", row.name, marker))
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select((!self.rows.is_empty()).then_some(self.selected));
        frame.render_stateful_widget(list, list_area, &mut state);
        frame.render_widget(Paragraph::new(self.status.as_str()), footer);

        self.modals.render(frame, area);
        self.dropdowns.render(frame);
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    term_overlay::tracing_sub::init_default();
    let mut app = App::new(&cli).map_err(io::Error::other)?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick = Duration::from_millis(cli.tick_ms.max(1));
    let result = run(&mut terminal, &mut app, tick);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;
        if event::poll(tick)? {
            let ev = event::read()?;
            if app.handle_event(&ev) {
                return Ok(());
            }
        }
        app.modals.tick(Instant::now());
        app.drain_notifications();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn app() -> App {
        let cli = Cli {
            tick_ms: 16,
            open_ms: Some(0),
            close_ms: Some(0),
        };
        let mut app = App::new(&cli).unwrap();
        app.coordinator.set_viewport(Rect::new(0, 0, 100, 40));
        app.list_area = Rect::new(0, 1, 100, 38);
        app
    }

    fn enter() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn deleting_a_row_keeps_remaining_menus_attached() {
        let mut app = app();
        // delete the first row through the confirm dialog
        app.dispatch(0, ItemAction::Delete);
        assert!(app.modals.handle_event(&enter()));
        app.resolve_confirm();
        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.rows[0].name, "Team plan");
        assert!(app.dropdowns.open().is_none());

        // the shifted rows still open their own menus
        app.open_row_actions(0);
        let open = app.dropdowns.open().expect("menu for shifted row");
        assert_eq!(open.trigger, app.rows[0].id);

        // a selection resolves against that same row's table: Team plan
        // is a draft, so the first item is Publish, not Unpublish
        let (id, index) = app.dropdowns.handle_event(&enter()).unwrap();
        let row = app.row_index(id).unwrap();
        assert_eq!(
            app.rows[row].table.resolve(index),
            Some(ItemAction::Publish)
        );
    }

    #[test]
    fn deleted_row_menu_is_gone() {
        let mut app = app();
        let first = app.rows[0].id;
        app.dispatch(0, ItemAction::Delete);
        assert!(app.modals.handle_event(&enter()));
        app.resolve_confirm();
        // the stale trigger id no longer opens anything
        assert!(!app.dropdowns.toggle(
            first,
            Rect::new(80, 2, 11, 1),
            app.coordinator.viewport()
        ));
        assert!(app.dropdowns.open().is_none());
    }
}
