#![forbid(unsafe_code)]

//! Hierarchical, input-driven menu tree with animated panels.
//!
//! The host owns a [`MenuTree`], forwards four input events to it
//! ([`up`](MenuTree::up), [`down`](MenuTree::down), [`press`](MenuTree::press),
//! [`back`](MenuTree::back)), ticks it once per frame with
//! [`update`](MenuTree::update), and draws it with [`render`](MenuTree::render).
//! Drawing is delegated entirely to callbacks that receive geometry, text and
//! alpha; this crate never touches a graphics API.
//!
//! Node behaviors form a closed set:
//!
//! | Variant | Built with | On confirm |
//! |---------|------------|------------|
//! | leaf | [`Node::new`] | fires its commit callback |
//! | submenu | [`Menu::new`] | opens / delegates |
//! | selection | [`Menu::select`] | adopts the focused row's payload |
//! | boolean | [`MenuBool`] | adopts `"true"` / `"false"` |
//! | number | [`MenuNumber`] | adopts the edited value |
//! | text | [`MenuText`] | adopts the placeholder's payload |

pub mod boolean;
pub mod menu;
pub mod node;
pub mod number;
pub mod select;
pub mod text;
pub mod tree;

pub use boolean::{BoolState, MenuBool};
pub use menu::{Menu, MenuKind};
pub use node::{CommitFn, Node, NodeId, NodeRenderFn, PanelRenderFn};
pub use number::{MenuNumber, NumberState};
pub use select::SelectState;
pub use text::MenuText;
pub use tree::{MenuTree, TreeError};
