//! Per-entity interaction state: hidden / shown-collapsed / shown-expanded.
//!
//! Visibility and expansion are stored independently. Show-all and hide-all
//! only write visibility, so an entity that is hidden and shown again comes
//! back in whatever expand/collapse state the user last left it. Nothing here
//! requests a redraw; callers do that after mutating.

#[cfg(test)]
#[path = "interaction_test.rs"]
mod interaction_test;

use std::collections::HashMap;

use crate::payload::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    visibility: HashMap<EntityId, bool>,
    expanded: HashMap<EntityId, bool>,
}

impl InteractionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the entity's panel is shown. Unknown ids are hidden.
    #[must_use]
    pub fn is_visible(&self, id: &EntityId) -> bool {
        self.visibility.get(id).copied().unwrap_or(false)
    }

    /// Whether the entity's panel is expanded. Unknown ids are collapsed.
    #[must_use]
    pub fn is_expanded(&self, id: &EntityId) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Flip visibility, returning the new value.
    pub fn toggle_visibility(&mut self, id: &EntityId) -> bool {
        let next = !self.is_visible(id);
        self.visibility.insert(id.clone(), next);
        next
    }

    /// Flip expansion, returning the new value.
    pub fn toggle_expanded(&mut self, id: &EntityId) -> bool {
        let next = !self.is_expanded(id);
        self.expanded.insert(id.clone(), next);
        next
    }

    /// Mark every id visible. Expansion is left untouched.
    pub fn show_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntityId>) {
        for id in ids {
            self.visibility.insert(id.clone(), true);
        }
    }

    /// Mark every id hidden. Expansion is left untouched.
    pub fn hide_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntityId>) {
        for id in ids {
            self.visibility.insert(id.clone(), false);
        }
    }

    /// Number of ids currently marked visible.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visibility.values().filter(|v| **v).count()
    }

    /// Forget all state, as after a reload.
    pub fn reset(&mut self) {
        self.visibility.clear();
        self.expanded.clear();
    }
}
