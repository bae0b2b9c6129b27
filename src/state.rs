#[derive(Debug, Default, Clone, Copy)]
pub struct PageState {
    scroll_locked: bool,
    scroll_dirty: bool,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            scroll_locked: false,
            scroll_dirty: false,
        }
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        if self.scroll_locked == locked {
            return;
        }
        self.scroll_locked = locked;
        self.scroll_dirty = true;
    }

    /// Drain the scroll-lock change, if any, since the last call. Hosts use
    /// this to suspend/resume their own page scrolling exactly once per
    /// transition rather than re-checking every frame.
    pub fn take_scroll_lock_change(&mut self) -> Option<bool> {
        if self.scroll_dirty {
            self.scroll_dirty = false;
            Some(self.scroll_locked)
        } else {
            None
        }
    }
}
