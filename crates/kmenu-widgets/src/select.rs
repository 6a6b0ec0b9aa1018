#![forbid(unsafe_code)]

//! Selection menus: confirm copies the focused row's payload onto the menu.
//!
//! The last confirmed index is the rollback snapshot. Cancelling returns
//! focus to it, so browsing rows without confirming never leaks into the
//! displayed selection.

use kmenu_core::debug;

use crate::MenuTree;
use crate::node::NodeId;

/// Rollback snapshot of a selection menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectState {
    pub(crate) last_committed: usize,
}

impl SelectState {
    /// Index of the last confirmed row.
    pub fn last_committed_index(&self) -> usize {
        self.last_committed
    }
}

impl MenuTree {
    /// Last confirmed row of a Select or Bool menu.
    pub fn last_committed_index(&self, id: NodeId) -> Option<usize> {
        self.menu_ref(id)
            .and_then(|m| m.kind.selection())
            .map(SelectState::last_committed_index)
    }

    pub(crate) fn select_press(&mut self, id: NodeId) -> bool {
        let Some(menu) = self.menu_ref(id) else {
            return false;
        };
        if !menu.active {
            return self.composite_press(id);
        }
        let Some(child) = menu.focused() else {
            return true;
        };
        let focus = menu.focus;

        self.fire_commit(id, child);
        let data = self.nodes[child.0].data.clone();
        self.nodes[id.0].data = data;
        if let Some(sel) = self.menu_mut(id).and_then(|m| m.kind.selection_mut()) {
            sel.last_committed = focus;
        }
        debug!(menu = %id, index = focus, "selection committed");

        self.select_back(id);
        self.confirm_slide(id);
        true
    }

    pub(crate) fn select_back(&mut self, id: NodeId) -> bool {
        if let Some(menu) = self.menu_mut(id)
            && let Some(last) = menu.kind.selection().map(|s| s.last_committed)
        {
            menu.refocus(last);
        }
        self.composite_back(id)
    }

    /// Focus a newly taken row if it is the first to carry the menu's
    /// initial payload.
    pub(crate) fn select_adopt(&mut self, id: NodeId, child: NodeId) {
        let data = &self.nodes[id.0].data;
        if data.is_empty() || self.nodes[child.0].data != *data {
            return;
        }
        let children = self.nodes[id.0].children();
        let first = children
            .iter()
            .position(|&c| self.nodes[c.0].data == *data);
        let Some(index) = first.filter(|&i| children[i] == child) else {
            return;
        };
        if let Some(menu) = self.menu_mut(id) {
            menu.focus = index;
            if let Some(sel) = menu.kind.selection_mut() {
                sel.last_committed = index;
            }
        }
    }

    /// Adopt `data` and focus the first child carrying the same payload.
    pub(crate) fn select_set_data(&mut self, id: NodeId, data: String) {
        let found = self.nodes[id.0]
            .children()
            .iter()
            .position(|&child| self.nodes[child.0].data == data);
        self.nodes[id.0].data = data;
        match found {
            Some(index) => {
                if let Some(menu) = self.menu_mut(id) {
                    menu.focus = index;
                    if let Some(sel) = menu.kind.selection_mut() {
                        sel.last_committed = index;
                    }
                }
            }
            None => {
                debug!(menu = %id, "payload matches no row; selection unchanged");
            }
        }
    }
}
