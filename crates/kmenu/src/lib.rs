#![forbid(unsafe_code)]

//! kmenu public facade crate.
//!
//! Re-exports the menu tree and its building blocks and offers a prelude for
//! host code.
//!
//! ```
//! use kmenu::prelude::*;
//!
//! fn build() -> Result<MenuTree> {
//!     let mut tree = MenuTree::new(Menu::new(Rect::new(40.0, 40.0, 220.0, 100.0), 20.0));
//!     let root = tree.root();
//!     tree.take(root, Node::new("Play"))?;
//!     let volume = tree.take(
//!         root,
//!         Node::menu(MenuNumber::display(60.0, 20.0, 5.0, 0.0, 10.0, 1.0).with_precision(0))
//!             .with_text("Volume"),
//!     )?;
//!     assert_eq!(tree[volume].text(), "Volume: 5");
//!     Ok(tree)
//! }
//!
//! let mut tree = build().unwrap();
//! tree.update(1.0 / 60.0);
//! tree.render();
//! ```

// --- Core re-exports -------------------------------------------------------

pub use kmenu_core::animation::Lag;
pub use kmenu_core::geometry::Rect;

// --- Widget re-exports -----------------------------------------------------

pub use kmenu_widgets::{
    BoolState, CommitFn, Menu, MenuBool, MenuKind, MenuNumber, MenuText, MenuTree, Node, NodeId,
    NodeRenderFn, NumberState, PanelRenderFn, SelectState, TreeError,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for kmenu hosts.
pub type Error = TreeError;

/// Standard result type for kmenu APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Menu, MenuBool, MenuNumber, MenuText, MenuTree, Node, NodeId, Rect, Result,
    };

    pub use crate::{core, widgets};
}

pub use kmenu_core as core;
pub use kmenu_widgets as widgets;
