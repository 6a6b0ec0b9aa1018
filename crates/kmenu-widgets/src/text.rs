#![forbid(unsafe_code)]

//! Free-text holder over a single placeholder row.
//!
//! The host's text-entry layer writes tentative text into the placeholder
//! (see [`MenuTree::placeholder`]). Confirm adopts it as the menu's payload;
//! cancel throws it away by re-stamping the placeholder from the payload.

use kmenu_core::debug;
use kmenu_core::geometry::Rect;

use crate::MenuTree;
use crate::menu::{Menu, MenuKind};
use crate::node::{Node, NodeId};

/// Builder for Text menus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuText {
    width: f32,
    height: f32,
}

impl MenuText {
    /// A one-row text popup.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<MenuText> for Menu {
    fn from(t: MenuText) -> Self {
        Menu::with_kind(Rect::from_size(t.width, t.height), t.height, MenuKind::Text)
    }
}

impl From<MenuText> for Node {
    fn from(t: MenuText) -> Self {
        Node::menu(t)
    }
}

impl MenuTree {
    pub(crate) fn text_seed(&mut self, id: NodeId) {
        let data = self.nodes[id.0].data.clone();
        let mut row = Node::new(data.clone()).with_data(data);
        row.on_render = self.row_renderer_for_children(id);
        self.insert(Some(id), row);
    }

    fn text_restamp(&mut self, id: NodeId) {
        if let Some(placeholder) = self.placeholder(id) {
            let data = self.nodes[id.0].data.clone();
            self.stamp(placeholder, &data);
        }
    }

    pub(crate) fn text_press(&mut self, id: NodeId) -> bool {
        if !self.menu_ref(id).is_some_and(|m| m.active) {
            return self.composite_press(id);
        }
        if let Some(placeholder) = self.placeholder(id) {
            let data = self.nodes[placeholder.0].data.clone();
            self.nodes[id.0].data = data;
            self.fire_commit(id, placeholder);
            debug!(menu = %id, "text committed");
        }
        self.text_back(id);
        self.confirm_slide(id);
        true
    }

    pub(crate) fn text_back(&mut self, id: NodeId) -> bool {
        self.text_restamp(id);
        self.composite_back(id)
    }

    pub(crate) fn text_set_data(&mut self, id: NodeId, data: String) {
        self.nodes[id.0].data = data;
        self.text_restamp(id);
    }
}
