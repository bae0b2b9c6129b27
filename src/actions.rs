//! Host-side action vocabulary for dropdown menus.
//!
//! The overlay layer reports a selected item *index*; resolving that index
//! to a meaningful action stays with the host. `ActionTable` is the small
//! lookup hosts build per trigger so the dispatch is a tagged variant
//! rather than a re-parsed label string.

use std::fmt;

/// The per-item operations a row-actions menu can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Publish,
    Unpublish,
    Duplicate,
    Delete,
    OpenChat,
}

impl fmt::Display for ItemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemAction::Publish => "Publish",
            ItemAction::Unpublish => "Unpublish",
            ItemAction::Duplicate => "Duplicate",
            ItemAction::Delete => "Delete",
            ItemAction::OpenChat => "Open chat",
        };
        write!(f, "{}", s)
    }
}

/// Ordered label-to-action mapping for one menu. Labels feed the menu
/// surface; `resolve` maps the reported index back to its action.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    entries: Vec<(String, ItemAction)>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The usual row-actions set, label order matching display order.
    pub fn row_defaults(published: bool) -> Self {
        let mut table = Self::new();
        if published {
            table.push(ItemAction::Unpublish);
        } else {
            table.push(ItemAction::Publish);
        }
        table.push(ItemAction::Duplicate);
        table.push(ItemAction::OpenChat);
        table.push(ItemAction::Delete);
        table
    }

    pub fn push(&mut self, action: ItemAction) {
        self.entries.push((action.to_string(), action));
    }

    pub fn push_labeled(&mut self, label: impl Into<String>, action: ItemAction) {
        self.entries.push((label.into(), action));
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn resolve(&self, index: usize) -> Option<ItemAction> {
        self.entries.get(index).map(|(_, action)| *action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
