#![forbid(unsafe_code)]

//! Two-choice selection rendered as an inline popup.
//!
//! A Bool menu is a selection with exactly two rows whose payloads are
//! `"true"` and `"false"`, in that order. The display variant rewrites its
//! own row text to `"<label>: <choice>"` after every press and external
//! payload set, where the label is the text the node carried when it was
//! taken into the tree.

use kmenu_core::geometry::Rect;

use crate::menu::{Menu, MenuKind};
use crate::node::{Node, NodeId};
use crate::select::SelectState;
use crate::MenuTree;

/// Payload of the first row.
pub const TRUE_DATA: &str = "true";
/// Payload of the second row.
pub const FALSE_DATA: &str = "false";

/// State of a Bool menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolState {
    pub(crate) selection: SelectState,
    pub(crate) true_text: String,
    pub(crate) false_text: String,
    pub(crate) display: bool,
    pub(crate) label: String,
}

impl BoolState {
    /// Rollback snapshot shared with plain selections.
    pub fn selection(&self) -> &SelectState {
        &self.selection
    }

    /// Whether the owning row shows the current choice.
    pub fn is_display(&self) -> bool {
        self.display
    }

    /// Label captured for the display variant.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Builder for Bool menus.
///
/// ```
/// use kmenu_widgets::{MenuBool, MenuTree, Menu, Node};
/// use kmenu_core::geometry::Rect;
///
/// let mut tree = MenuTree::new(Menu::new(Rect::from_size(200.0, 200.0), 20.0));
/// let vsync = tree
///     .take(
///         tree.root(),
///         Node::menu(MenuBool::display(60.0, 20.0).with_labels("On", "Off"))
///             .with_text("VSync")
///             .with_data("false"),
///     )
///     .unwrap();
/// assert_eq!(tree[vsync].text(), "VSync: Off");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MenuBool {
    width: f32,
    cell_height: f32,
    true_text: String,
    false_text: String,
    display: bool,
}

impl MenuBool {
    /// A Bool popup `width` wide with two rows of `cell_height`.
    #[must_use]
    pub fn new(width: f32, cell_height: f32) -> Self {
        Self {
            width,
            cell_height,
            true_text: TRUE_DATA.to_owned(),
            false_text: FALSE_DATA.to_owned(),
            display: false,
        }
    }

    /// Like [`new`](Self::new), but the owning row shows the current choice.
    #[must_use]
    pub fn display(width: f32, cell_height: f32) -> Self {
        Self {
            display: true,
            ..Self::new(width, cell_height)
        }
    }

    /// Texts shown for the two rows. Payloads stay `"true"` / `"false"`.
    #[must_use]
    pub fn with_labels(mut self, true_text: impl Into<String>, false_text: impl Into<String>) -> Self {
        self.true_text = true_text.into();
        self.false_text = false_text.into();
        self
    }
}

impl From<MenuBool> for Menu {
    fn from(b: MenuBool) -> Self {
        Menu::with_kind(
            Rect::from_size(b.width, b.cell_height * 2.0),
            b.cell_height,
            MenuKind::Bool(BoolState {
                selection: SelectState::default(),
                true_text: b.true_text,
                false_text: b.false_text,
                display: b.display,
                label: String::new(),
            }),
        )
    }
}

impl From<MenuBool> for Node {
    fn from(b: MenuBool) -> Self {
        Node::menu(b)
    }
}

impl MenuTree {
    pub(crate) fn bool_seed(&mut self, id: NodeId) {
        let text = self.nodes[id.0].text.clone();
        let Some(MenuKind::Bool(state)) = self.menu_mut(id).map(|m| &mut m.kind) else {
            return;
        };
        state.label = text;
        let rows = [
            (state.true_text.clone(), TRUE_DATA),
            (state.false_text.clone(), FALSE_DATA),
        ];

        let render = self.row_renderer_for_children(id);
        for (text, data) in rows {
            let mut row = Node::new(text).with_data(data);
            row.on_render = render.clone();
            self.insert(Some(id), row);
        }

        let data = self.nodes[id.0].data.clone();
        if !data.is_empty() {
            self.select_set_data(id, data);
        }
        self.bool_relabel(id);
    }

    /// Rewrite the display variant's row text from the focused choice.
    pub(crate) fn bool_relabel(&mut self, id: NodeId) {
        let Some(menu) = self.menu_ref(id) else {
            return;
        };
        let MenuKind::Bool(state) = &menu.kind else {
            return;
        };
        if !state.display {
            return;
        }
        let Some(choice) = menu.focused() else {
            return;
        };
        let text = format!("{}: {}", state.label, self.nodes[choice.0].text);
        self.nodes[id.0].text = text;
    }
}
