#![forbid(unsafe_code)]

//! The menu tree: owner of every node, and the host-facing entry points.
//!
//! Nodes live in a flat arena indexed by [`NodeId`]. A child's parent link
//! is an id, never ownership; the tree owns everything and drops the whole
//! hierarchy at once. Because nodes are never removed, ids and focus indices
//! stay valid for the tree's lifetime.
//!
//! # Frame loop
//!
//! ```
//! use kmenu_core::geometry::Rect;
//! use kmenu_widgets::{Menu, MenuTree, Node};
//!
//! let mut tree = MenuTree::new(Node::menu(Menu::new(Rect::new(10.0, 10.0, 200.0, 300.0), 24.0)));
//! let root = tree.root();
//! tree.take(root, Node::new("Play")).unwrap();
//! tree.take(root, Node::new("Quit")).unwrap();
//!
//! tree.update(1.0 / 60.0);
//! tree.render();
//! assert!(tree.down());
//! assert_eq!(tree[root].as_menu().unwrap().focus_index(), 1);
//! ```
//!
//! # Callbacks
//!
//! Commit and render callbacks receive `&Node` and run while the tree is
//! borrowed, so they cannot restructure the tree mid-traversal. Hosts that
//! need to react by mutating the tree queue the work and apply it after the
//! call returns.

use std::fmt;
use std::ops::Index;

use kmenu_core::geometry::Rect;
use kmenu_core::{debug, trace};

use crate::menu::{Menu, MenuKind};
use crate::node::{Node, NodeId};

/// Failure to attach or address a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The id does not belong to this tree.
    UnknownNode(NodeId),
    /// Children can only be taken into composites.
    NotComposite(NodeId),
    /// Bool, Number and Text menus create their own children.
    FixedChildren(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "node {id} is not part of this tree"),
            Self::NotComposite(id) => write!(f, "node {id} is a leaf and cannot own children"),
            Self::FixedChildren(id) => {
                write!(f, "node {id} has a fixed child set and cannot take more")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// How a node reacts to input, derived from its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Leaf,
    Plain,
    Select,
    Bool,
    Number,
    Text,
}

/// Owner of a hierarchy of menu nodes.
#[derive(Debug)]
pub struct MenuTree {
    pub(crate) nodes: Vec<Node>,
}

impl MenuTree {
    /// Create a tree with `root` as its parentless root.
    #[must_use]
    pub fn new(root: impl Into<Node>) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(None, root.into());
        tree
    }

    /// The root id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, including fixed children created by variants.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Composite state of `id`, if it is a menu.
    pub fn menu(&self, id: NodeId) -> Option<&Menu> {
        self.menu_ref(id)
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Transfer `node` into the composite `parent`, appending it as the last
    /// row. A node without its own row renderer inherits the parent's.
    pub fn take(&mut self, parent: NodeId, node: impl Into<Node>) -> Result<NodeId, TreeError> {
        let owner = self.get(parent).ok_or(TreeError::UnknownNode(parent))?;
        let menu = owner.as_menu().ok_or(TreeError::NotComposite(parent))?;
        if menu.kind.has_fixed_children() {
            return Err(TreeError::FixedChildren(parent));
        }
        let id = self.insert(Some(parent), node.into());
        if self.behavior(parent) == Some(Behavior::Select) {
            self.select_adopt(parent, id);
        }
        Ok(id)
    }

    /// Replace a node's display text.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id.0).ok_or(TreeError::UnknownNode(id))?;
        node.text = text.into();
        Ok(())
    }

    /// Set a node's payload from outside the input flow.
    ///
    /// Selections refocus the matching child, numbers parse the text, text
    /// menus re-stamp their placeholder, and display variants relabel.
    pub fn set_data(&mut self, id: NodeId, data: impl Into<String>) -> Result<(), TreeError> {
        let data = data.into();
        match self.behavior(id).ok_or(TreeError::UnknownNode(id))? {
            Behavior::Leaf | Behavior::Plain => self.nodes[id.0].data = data,
            Behavior::Select => self.select_set_data(id, data),
            Behavior::Bool => {
                self.select_set_data(id, data);
                self.bool_relabel(id);
            }
            Behavior::Number => self.number_set_data(id, &data),
            Behavior::Text => self.text_set_data(id, data),
        }
        Ok(())
    }

    /// The single placeholder child of a Number or Text menu.
    ///
    /// Text entry writes the tentative value here with [`set_data`](Self::set_data);
    /// the owning node only adopts it on confirm.
    pub fn placeholder(&self, id: NodeId) -> Option<NodeId> {
        let menu = self.menu_ref(id)?;
        match menu.kind {
            MenuKind::Number(_) | MenuKind::Text => menu.children.first().copied(),
            _ => None,
        }
    }

    /// Parent links from `id` (exclusive) up to the root (inclusive).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(Node::parent), move |&p| {
            self.nodes[p.0].parent
        })
    }

    /// Outermost ancestor of `id`; the root answers itself.
    pub fn find_root(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    // -----------------------------------------------------------------------
    // Host entry points
    // -----------------------------------------------------------------------

    /// Navigate up. Returns whether the event was consumed.
    pub fn up(&mut self) -> bool {
        self.up_at(self.root())
    }

    /// Navigate down. Returns whether the event was consumed.
    pub fn down(&mut self) -> bool {
        self.down_at(self.root())
    }

    /// Confirm / open. Returns whether the event was consumed.
    pub fn press(&mut self) -> bool {
        self.press_at(self.root())
    }

    /// Cancel / close. Returns whether the event was consumed.
    pub fn back(&mut self) -> bool {
        self.back_at(self.root())
    }

    /// Advance every animation by `delta_time` seconds, focused or not.
    pub fn update(&mut self, delta_time: f32) {
        for menu in self.nodes.iter_mut().filter_map(|n| n.menu.as_deref_mut()) {
            menu.tick(delta_time);
        }
    }

    /// Draw the whole tree through the host callbacks.
    ///
    /// The root is marked active first, so a freshly built tree becomes
    /// navigable after its first frame.
    pub fn render(&mut self) {
        let root = self.root();
        let alpha = match self.menu_mut(root) {
            Some(menu) => {
                menu.active = true;
                menu.alpha.value()
            }
            None => 1.0,
        };
        self.render_at(root, true, Rect::ZERO, alpha, 0.0, 0.0);
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    pub(crate) fn up_at(&mut self, id: NodeId) -> bool {
        match self.behavior(id) {
            None | Some(Behavior::Leaf) => false,
            Some(Behavior::Number) => self.number_step(id, 1.0),
            Some(_) => self.composite_up(id),
        }
    }

    pub(crate) fn down_at(&mut self, id: NodeId) -> bool {
        match self.behavior(id) {
            None | Some(Behavior::Leaf) => false,
            Some(Behavior::Number) => self.number_step(id, -1.0),
            Some(_) => self.composite_down(id),
        }
    }

    pub(crate) fn press_at(&mut self, id: NodeId) -> bool {
        match self.behavior(id) {
            None => false,
            Some(Behavior::Leaf) => self.fire_commit(id, id),
            Some(Behavior::Plain) => self.composite_press(id),
            Some(Behavior::Select) => self.select_press(id),
            Some(Behavior::Bool) => {
                let handled = self.select_press(id);
                self.bool_relabel(id);
                handled
            }
            Some(Behavior::Number) => self.number_press(id),
            Some(Behavior::Text) => self.text_press(id),
        }
    }

    pub(crate) fn back_at(&mut self, id: NodeId) -> bool {
        match self.behavior(id) {
            None | Some(Behavior::Leaf) => false,
            Some(Behavior::Plain) => self.composite_back(id),
            Some(Behavior::Select | Behavior::Bool) => self.select_back(id),
            Some(Behavior::Number) => self.number_back(id),
            Some(Behavior::Text) => self.text_back(id),
        }
    }

    fn behavior(&self, id: NodeId) -> Option<Behavior> {
        let node = self.nodes.get(id.0)?;
        Some(match node.as_menu().map(|m| &m.kind) {
            None => Behavior::Leaf,
            Some(MenuKind::Plain) => Behavior::Plain,
            Some(MenuKind::Select(_)) => Behavior::Select,
            Some(MenuKind::Bool(_)) => Behavior::Bool,
            Some(MenuKind::Number(_)) => Behavior::Number,
            Some(MenuKind::Text) => Behavior::Text,
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    pub(crate) fn menu_ref(&self, id: NodeId) -> Option<&Menu> {
        self.nodes.get(id.0).and_then(|n| n.menu.as_deref())
    }

    pub(crate) fn menu_mut(&mut self, id: NodeId) -> Option<&mut Menu> {
        self.nodes.get_mut(id.0).and_then(|n| n.menu.as_deref_mut())
    }

    /// Run `owner`'s commit callback with `target`. Returns whether one ran.
    pub(crate) fn fire_commit(&self, owner: NodeId, target: NodeId) -> bool {
        let Some(commit) = self.nodes[owner.0].on_commit.clone() else {
            return false;
        };
        debug!(owner = %owner, target = %target, "commit");
        commit(&self.nodes[target.0]);
        true
    }

    /// Stamp both text and payload of a node.
    pub(crate) fn stamp(&mut self, id: NodeId, value: &str) {
        let node = &mut self.nodes[id.0];
        value.clone_into(&mut node.text);
        value.clone_into(&mut node.data);
    }

    /// Row renderer a fixed child of `id` should use.
    pub(crate) fn row_renderer_for_children(&self, id: NodeId) -> Option<crate::NodeRenderFn> {
        let node = &self.nodes[id.0];
        node.on_render
            .clone()
            .or_else(|| node.as_menu().and_then(|m| m.node_render.clone()))
    }

    pub(crate) fn insert(&mut self, parent: Option<NodeId>, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.id = id;
        node.parent = parent;
        if let Some(parent) = parent {
            if node.on_render.is_none() {
                node.on_render = self.menu_ref(parent).and_then(|m| m.node_render.clone());
            }
            if let Some(menu) = self.menu_mut(parent) {
                menu.children.push(id);
            }
        }
        trace!(node = %id, parent = ?parent, "node inserted");
        self.nodes.push(node);
        self.seed(id);
        id
    }

    /// Create the fixed children of Bool/Number/Text menus.
    fn seed(&mut self, id: NodeId) {
        match self.behavior(id) {
            Some(Behavior::Bool) => self.bool_seed(id),
            Some(Behavior::Number) => self.number_seed(id),
            Some(Behavior::Text) => self.text_seed(id),
            _ => {}
        }
    }
}

impl Index<NodeId> for MenuTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> MenuTree {
        MenuTree::new(Node::menu(Menu::new(Rect::new(5.0, 5.0, 100.0, 100.0), 10.0)))
    }

    #[test]
    fn take_links_parent_and_children() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.take(root, Node::new("a")).unwrap();
        let b = tree.take(root, "b").unwrap();
        assert_eq!(tree[a].parent(), Some(root));
        assert_eq!(tree[b].parent(), Some(root));
        assert_eq!(tree[root].children(), &[a, b]);
        assert!(tree[root].is_root());
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_empty());
    }

    #[test]
    fn take_rejects_leaf_and_unknown_parents() {
        let mut tree = tree();
        let leaf = tree.take(tree.root(), Node::new("leaf")).unwrap();
        assert_eq!(
            tree.take(leaf, Node::new("x")),
            Err(TreeError::NotComposite(leaf))
        );
        let bogus = NodeId(99);
        assert_eq!(
            tree.take(bogus, Node::new("x")),
            Err(TreeError::UnknownNode(bogus))
        );
        assert_eq!(tree.set_text(bogus, "x"), Err(TreeError::UnknownNode(bogus)));
        assert_eq!(tree.set_data(bogus, "x"), Err(TreeError::UnknownNode(bogus)));
    }

    #[test]
    fn children_inherit_node_renderer() {
        let root = Menu::new(Rect::from_size(10.0, 10.0), 5.0).with_node_render(|_, _, _, _| {});
        let mut tree = MenuTree::new(root);
        let plain = tree.take(tree.root(), Node::new("plain")).unwrap();
        assert!(tree[plain].has_renderer());
    }

    #[test]
    fn find_root_walks_to_top() {
        let mut tree = tree();
        let root = tree.root();
        let sub = tree
            .take(root, Node::menu(Menu::new(Rect::ZERO, 10.0)))
            .unwrap();
        let leaf = tree.take(sub, Node::new("deep")).unwrap();
        assert_eq!(tree.find_root(leaf), root);
        assert_eq!(tree.find_root(root), root);
        assert_eq!(tree.ancestors(leaf).collect::<Vec<_>>(), vec![sub, root]);
        assert_eq!(tree.ancestors(root).count(), 0);
    }

    #[test]
    fn error_messages_name_the_node() {
        assert_eq!(
            TreeError::NotComposite(NodeId(3)).to_string(),
            "node #3 is a leaf and cannot own children"
        );
        assert!(TreeError::FixedChildren(NodeId(1)).to_string().contains("#1"));
    }

    #[test]
    fn set_text_and_plain_set_data() {
        let mut tree = tree();
        let leaf = tree.take(tree.root(), Node::new("a")).unwrap();
        tree.set_text(leaf, "renamed").unwrap();
        tree.set_data(leaf, "payload").unwrap();
        assert_eq!(tree[leaf].text(), "renamed");
        assert_eq!(tree[leaf].data(), "payload");
    }

    #[test]
    fn render_activates_root() {
        let mut tree = tree();
        assert!(!tree.menu(tree.root()).unwrap().is_active());
        tree.render();
        assert!(tree.menu(tree.root()).unwrap().is_active());
    }
}
