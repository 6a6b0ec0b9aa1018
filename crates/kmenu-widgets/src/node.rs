#![forbid(unsafe_code)]

//! Base navigable unit.
//!
//! A [`Node`] is one row of a menu: display text, an opaque string payload,
//! and two optional host callbacks. Leaf nodes only know how to draw their own
//! row and how to fire their commit callback; composite behavior lives in
//! [`Menu`], which a node carries when it owns children.
//!
//! Nodes are built detached and handed to a [`MenuTree`](crate::MenuTree),
//! which assigns the [`NodeId`] and the parent back-reference.

use std::fmt;
use std::rc::Rc;

use kmenu_core::geometry::Rect;

use crate::menu::Menu;

/// Handle to a node inside its [`MenuTree`](crate::MenuTree).
///
/// Ids are dense indices into the tree's arena. Trees are append-only, so an
/// id stays valid for as long as the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Invoked once per successful confirm with the node whose payload just
/// became authoritative.
pub type CommitFn = Rc<dyn Fn(&Node)>;

/// Draws one row: `(node, is_selected, rect, alpha)`.
pub type NodeRenderFn = Rc<dyn Fn(&Node, bool, Rect, f32)>;

/// Draws a composite's panel background: `(menu node, rect, alpha, text)`.
pub type PanelRenderFn = Rc<dyn Fn(&Node, Rect, f32, &str)>;

/// A navigable, renderable unit of the menu tree.
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) text: String,
    pub(crate) data: String,
    pub(crate) on_commit: Option<CommitFn>,
    pub(crate) on_render: Option<NodeRenderFn>,
    pub(crate) menu: Option<Box<Menu>>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("text", &self.text)
            .field("data", &self.data)
            .field("on_commit", &self.on_commit.is_some())
            .field("on_render", &self.on_render.is_some())
            .field("menu", &self.menu)
            .finish()
    }
}

impl Node {
    /// Create a leaf node with the given display text and an empty payload.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NodeId(0),
            parent: None,
            text: text.into(),
            data: String::new(),
            on_commit: None,
            on_render: None,
            menu: None,
        }
    }

    /// Wrap a composite so it can be placed in a tree.
    #[must_use]
    pub fn menu(menu: impl Into<Menu>) -> Self {
        Self {
            menu: Some(Box::new(menu.into())),
            ..Self::new("")
        }
    }

    /// Set the display text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the initial payload.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// Set the commit callback.
    #[must_use]
    pub fn on_commit(mut self, f: impl Fn(&Node) + 'static) -> Self {
        self.on_commit = Some(Rc::new(f));
        self
    }

    /// Set the row render callback.
    ///
    /// When left unset, the node inherits its parent menu's node renderer
    /// at the moment it is taken into the tree.
    #[must_use]
    pub fn on_render(mut self, f: impl Fn(&Node, bool, Rect, f32) + 'static) -> Self {
        self.on_render = Some(Rc::new(f));
        self
    }

    /// This node's id. Meaningless until the node is inserted into a tree.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The owning composite, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this node has no owning composite.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Display text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Opaque payload.
    #[inline]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Composite state, if this node owns children.
    #[inline]
    pub fn as_menu(&self) -> Option<&Menu> {
        self.menu.as_deref()
    }

    /// Child ids in display order; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        self.menu.as_deref().map_or(&[], |m| m.children())
    }

    /// Whether a row render callback is attached.
    #[inline]
    pub fn has_renderer(&self) -> bool {
        self.on_render.is_some()
    }

    /// Fire the row render callback with `rect` translated by the offsets.
    pub(crate) fn draw_row(&self, selected: bool, rect: Rect, alpha: f32, off_x: f32, off_y: f32) {
        if let Some(render) = &self.on_render {
            render(self, selected, rect.translate(off_x, off_y), alpha);
        }
    }
}

impl From<Menu> for Node {
    fn from(menu: Menu) -> Self {
        Node::menu(menu)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::new(text)
    }
}
