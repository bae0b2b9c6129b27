use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use term_overlay::{
    DropdownManager, LifecyclePhase, MenuSurface, OverlayEvent, place_menu,
};

struct TestMenu {
    size: (u16, u16),
}

impl MenuSurface for TestMenu {
    fn menu_size(&self) -> (u16, u16) {
        self.size
    }

    fn render(&mut self, _frame: &mut Frame, _area: Rect) {}

    fn handle_event(&mut self, event: &Event, _area: Rect) -> Option<usize> {
        matches!(
            event,
            Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            })
        )
        .then_some(0)
    }
}

fn menu(size: (u16, u16)) -> Box<TestMenu> {
    Box::new(TestMenu { size })
}

#[test]
fn menu_stays_inside_margin_for_any_corner() {
    let viewport = Rect::new(0, 0, 1000, 800);
    let margin = 10;
    let corners = [
        Rect::new(0, 0, 30, 20),
        Rect::new(960, 0, 30, 20),
        Rect::new(0, 770, 30, 20),
        Rect::new(960, 770, 30, 20),
        // trigger partly outside the viewport
        Rect::new(995, 795, 30, 20),
    ];
    for trigger in corners {
        let rect = place_menu(trigger, (220, 300), viewport, margin);
        assert!(
            rect.x >= 10 && rect.right() <= 990,
            "x out of bounds for trigger {trigger:?}: {rect:?}"
        );
        assert!(
            rect.y >= 10 && rect.bottom() <= 790,
            "y out of bounds for trigger {trigger:?}: {rect:?}"
        );
        assert_eq!((rect.width, rect.height), (220, 300));
    }
}

#[test]
fn menu_flips_above_only_when_below_lacks_space() {
    let viewport = Rect::new(0, 0, 100, 40);
    let high = place_menu(Rect::new(10, 2, 12, 1), (20, 10), viewport, 1);
    assert_eq!(high.y, 3);
    let low = place_menu(Rect::new(10, 36, 12, 1), (20, 10), viewport, 1);
    assert_eq!(low.bottom(), 36);
}

#[test]
fn opened_dropdown_reports_placed_rect() {
    let mut dropdowns: DropdownManager<&str> = DropdownManager::new();
    dropdowns.register_surface("row-menu", menu((20, 6))).unwrap();
    let viewport = Rect::new(0, 0, 80, 24);
    let trigger = Rect::new(60, 20, 10, 1);
    assert!(dropdowns.toggle("row-menu", trigger, viewport));
    let open = dropdowns.open().unwrap();
    assert_eq!(open.trigger, "row-menu");
    assert_eq!(open.trigger_rect, trigger);
    // near the bottom-right corner, so the menu flips above and
    // right-aligns with the trigger
    assert_eq!(open.menu_rect.bottom(), trigger.y);
    assert_eq!(open.menu_rect.right(), trigger.right());
}

#[test]
fn second_dropdown_handoff_orders_events() {
    let mut dropdowns: DropdownManager<&str> = DropdownManager::new();
    dropdowns.register_surface("first", menu((20, 6))).unwrap();
    dropdowns.register_surface("second", menu((20, 6))).unwrap();
    let viewport = Rect::new(0, 0, 80, 24);
    dropdowns.toggle("first", Rect::new(5, 3, 8, 1), viewport);
    dropdowns.toggle("second", Rect::new(5, 9, 8, 1), viewport);
    assert_eq!(
        dropdowns.take_events(),
        vec![
            OverlayEvent {
                id: "first",
                phase: LifecyclePhase::Opened,
            },
            OverlayEvent {
                id: "first",
                phase: LifecyclePhase::Closed,
            },
            OverlayEvent {
                id: "second",
                phase: LifecyclePhase::Opened,
            },
        ]
    );
}

#[test]
fn selection_routes_back_with_trigger_id() {
    let mut dropdowns: DropdownManager<&str> = DropdownManager::new();
    dropdowns.register_surface("row-menu", menu((20, 6))).unwrap();
    dropdowns.toggle("row-menu", Rect::new(5, 3, 8, 1), Rect::new(0, 0, 80, 24));
    let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    assert_eq!(dropdowns.handle_event(&enter), Some(("row-menu", 0)));
    // selection does not implicitly close; the host decides
    assert!(dropdowns.open().is_some());
    assert!(dropdowns.close());
}
