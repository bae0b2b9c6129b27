//! Focus containment for open modals.
//!
//! Each `show` cycle installs a [`FocusTrap`] that restricts Tab navigation
//! to the focusable ids of the opened surface and remembers the id that had
//! focus beforehand. The trap is dropped when the close cycle completes, so
//! the attach/detach pair is strictly 1:1 per show/hide cycle.

/// Identifier for a focusable element inside a surface. Hosts assign these;
/// the subsystem only moves a cursor between them.
pub type FocusId = u64;

#[derive(Debug, Clone)]
pub struct FocusRing<T: Copy + Eq> {
    order: Vec<T>,
    current: Option<T>,
}

impl<T: Copy + Eq> FocusRing<T> {
    pub fn new(order: Vec<T>) -> Self {
        let current = order.first().copied();
        Self { order, current }
    }

    pub fn current(&self) -> Option<T> {
        self.current
    }

    pub fn set_current(&mut self, current: T) {
        if self.order.contains(&current) {
            self.current = Some(current);
        }
    }

    pub fn contains(&self, item: T) -> bool {
        self.order.contains(&item)
    }

    pub fn advance(&mut self, forward: bool) {
        if self.order.is_empty() {
            return;
        }
        let idx = self
            .current
            .and_then(|current| self.order.iter().position(|item| *item == current))
            .unwrap_or(0);
        let step = if forward { 1isize } else { -1isize };
        let next = ((idx as isize + step).rem_euclid(self.order.len() as isize)) as usize;
        self.current = Some(self.order[next]);
    }
}

/// One modal's focus containment: the ring over its focusable descendants
/// plus the id to restore when the modal finishes closing.
#[derive(Debug, Clone)]
pub struct FocusTrap {
    saved: Option<FocusId>,
    ring: FocusRing<FocusId>,
}

impl FocusTrap {
    pub fn new(saved: Option<FocusId>, focusables: Vec<FocusId>) -> Self {
        Self {
            saved,
            ring: FocusRing::new(focusables),
        }
    }

    /// The id focus should return to once this trap is released.
    pub fn saved(&self) -> Option<FocusId> {
        self.saved
    }

    pub fn current(&self) -> Option<FocusId> {
        self.ring.current()
    }

    pub fn advance(&mut self, forward: bool) {
        self.ring.advance(forward);
    }

    pub fn restore_into(&mut self, id: FocusId) -> bool {
        if self.ring.contains(id) {
            self.ring.set_current(id);
            true
        } else {
            false
        }
    }
}
