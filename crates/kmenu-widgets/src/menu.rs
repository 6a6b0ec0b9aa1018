#![forbid(unsafe_code)]

//! Composite menu: focus navigation, expand/collapse animation, and the
//! recursive render traversal.
//!
//! # State machine
//!
//! A menu is either collapsed (initial) or active. `press` opens a collapsed
//! menu. While active, every input is offered to the focused child first
//! (capture-first); only an unhandled event is acted on locally:
//!
//! | Event | Child unhandled, menu active |
//! |-------|------------------------------|
//! | up / down | move focus with wraparound |
//! | press | nothing (variants override) |
//! | back | collapse, unless this is the root |
//!
//! While collapsed, `up`, `down` and `back` report unhandled.
//!
//! # Shift choreography
//!
//! A menu built [`with_shift`](Menu::with_shift) asks its ancestors to slide
//! off-screen while it is open, and back when it closes. Shift requests walk
//! the parent chain root-first and stop at the first collapsed ancestor.

use std::fmt;
use std::rc::Rc;

use kmenu_core::animation::Lag;
use kmenu_core::geometry::Rect;
use kmenu_core::{debug, trace};

use crate::MenuTree;
use crate::boolean::BoolState;
use crate::node::{Node, NodeId, NodeRenderFn, PanelRenderFn};
use crate::number::NumberState;
use crate::select::SelectState;

/// Variant-specific state of a composite.
#[derive(Debug, Clone)]
pub enum MenuKind {
    /// Plain submenu.
    Plain,
    /// Commits the focused child's payload on confirm.
    Select(SelectState),
    /// Two fixed choices, shown as an inline popup.
    Bool(BoolState),
    /// Numeric editor over a single placeholder child.
    Number(NumberState),
    /// Free-text holder over a single placeholder child.
    Text,
}

impl MenuKind {
    /// Whether the child set is created by the menu itself and closed to `take`.
    pub fn has_fixed_children(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Number(_) | Self::Text)
    }

    /// Whether the panel pops up beside the owning row instead of at its
    /// declared position.
    pub fn is_inline(&self) -> bool {
        self.has_fixed_children()
    }

    pub(crate) fn selection(&self) -> Option<&SelectState> {
        match self {
            Self::Select(sel) => Some(sel),
            Self::Bool(b) => Some(&b.selection),
            _ => None,
        }
    }

    pub(crate) fn selection_mut(&mut self) -> Option<&mut SelectState> {
        match self {
            Self::Select(sel) => Some(sel),
            Self::Bool(b) => Some(&mut b.selection),
            _ => None,
        }
    }
}

/// Composite state carried by a [`Node`] that owns children.
#[derive(Clone)]
pub struct Menu {
    pub(crate) bounds: Rect,
    pub(crate) cell_height: f32,
    pub(crate) shift: bool,
    pub(crate) active: bool,
    pub(crate) x: Lag,
    pub(crate) alpha: Lag,
    pub(crate) focus: usize,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_render: Option<NodeRenderFn>,
    pub(crate) panel_render: Option<PanelRenderFn>,
    pub(crate) kind: MenuKind,
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("kind", &self.kind)
            .field("bounds", &self.bounds)
            .field("cell_height", &self.cell_height)
            .field("shift", &self.shift)
            .field("active", &self.active)
            .field("x", &self.x)
            .field("alpha", &self.alpha)
            .field("focus", &self.focus)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl Menu {
    /// Create a plain submenu occupying `bounds` with rows of `cell_height`.
    ///
    /// `bounds` is relative to the panel of the menu that owns this one; for
    /// the root it is absolute.
    #[must_use]
    pub fn new(bounds: Rect, cell_height: f32) -> Self {
        Self::with_kind(bounds, cell_height, MenuKind::Plain)
    }

    /// Create a selection menu: confirming a row copies its payload.
    #[must_use]
    pub fn select(bounds: Rect, cell_height: f32) -> Self {
        Self::with_kind(bounds, cell_height, MenuKind::Select(SelectState::default()))
    }

    pub(crate) fn with_kind(bounds: Rect, cell_height: f32, kind: MenuKind) -> Self {
        Self {
            bounds,
            cell_height,
            shift: false,
            active: false,
            x: Lag::new(0.0, 0.0),
            alpha: Lag::new(0.0, 1.0),
            focus: 0,
            children: Vec::new(),
            node_render: None,
            panel_render: None,
            kind,
        }
    }

    /// Slide ancestor panels away while this menu is open.
    #[must_use]
    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    /// Row renderer inherited by children that have none of their own.
    #[must_use]
    pub fn with_node_render(mut self, f: impl Fn(&Node, bool, Rect, f32) + 'static) -> Self {
        self.node_render = Some(Rc::new(f));
        self
    }

    /// Panel background renderer.
    #[must_use]
    pub fn with_panel_render(mut self, f: impl Fn(&Node, Rect, f32, &str) + 'static) -> Self {
        self.panel_render = Some(Rc::new(f));
        self
    }

    /// Convergence rate of the slide and fade animations, in 1/seconds.
    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.x = self.x.with_rate(rate);
        self.alpha = self.alpha.with_rate(rate);
        self
    }

    /// Variant state.
    pub fn kind(&self) -> &MenuKind {
        &self.kind
    }

    /// Own footprint when open.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Height of one row.
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Whether this menu pushes its ancestors aside while open.
    pub fn is_shift_enabled(&self) -> bool {
        self.shift
    }

    /// Expanded (`true`) or collapsed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Index of the focused child. Always in range when there are children.
    pub fn focus_index(&self) -> usize {
        self.focus
    }

    /// Child ids in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Id of the focused child.
    pub fn focused(&self) -> Option<NodeId> {
        self.children.get(self.focus).copied()
    }

    /// Current horizontal slide offset.
    pub fn x_offset(&self) -> f32 {
        self.x.value()
    }

    /// Slide offset being approached.
    pub fn x_target(&self) -> f32 {
        self.x.target()
    }

    /// Current panel opacity.
    pub fn alpha(&self) -> f32 {
        self.alpha.value()
    }

    /// Opacity being approached.
    pub fn alpha_target(&self) -> f32 {
        self.alpha.target()
    }

    /// Collapsed and slid (within a unit) onto its resting target.
    pub(crate) fn is_closed_at_rest(&self) -> bool {
        if self.active {
            return false;
        }
        let (x, target) = (self.x.value(), self.x.target());
        (target > 0.0 && x > target - 1.0)
            || (target < 0.0 && x < target + 1.0)
            || (target == 0.0 && x == 0.0)
    }

    pub(crate) fn focus_prev(&mut self) {
        if self.children.is_empty() {
            return;
        }
        self.focus = match self.focus {
            0 => self.children.len() - 1,
            i => i - 1,
        };
    }

    pub(crate) fn focus_next(&mut self) {
        if self.children.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.children.len();
    }

    /// Restore focus to `index` if it is in range.
    pub(crate) fn refocus(&mut self, index: usize) {
        if index < self.children.len() {
            self.focus = index;
        }
    }

    /// Retarget both followers.
    pub(crate) fn slide_to(&mut self, x: f32, alpha: f32) {
        self.x.retarget(x);
        self.alpha.retarget(alpha);
    }

    pub(crate) fn tick(&mut self, dt: f32) {
        self.x.tick(dt);
        self.alpha.tick(dt);
    }
}

// ---------------------------------------------------------------------------
// Composite protocol
// ---------------------------------------------------------------------------

impl MenuTree {
    pub(crate) fn composite_up(&mut self, id: NodeId) -> bool {
        let Some(menu) = self.menu_ref(id) else {
            return false;
        };
        if !menu.active {
            return false;
        }
        let consumed = menu.focused().is_some_and(|child| self.up_at(child));
        if !consumed && let Some(menu) = self.menu_mut(id) {
            menu.focus_prev();
            trace!(menu = %id, focus = menu.focus, "focus up");
        }
        true
    }

    pub(crate) fn composite_down(&mut self, id: NodeId) -> bool {
        let Some(menu) = self.menu_ref(id) else {
            return false;
        };
        if !menu.active {
            return false;
        }
        let consumed = menu.focused().is_some_and(|child| self.down_at(child));
        if !consumed && let Some(menu) = self.menu_mut(id) {
            menu.focus_next();
            trace!(menu = %id, focus = menu.focus, "focus down");
        }
        true
    }

    pub(crate) fn composite_press(&mut self, id: NodeId) -> bool {
        let Some(menu) = self.menu_ref(id) else {
            return false;
        };
        if menu.active {
            if let Some(child) = menu.focused() {
                self.press_at(child);
            }
        } else {
            self.open(id);
        }
        true
    }

    /// Offer back to the focused child, else collapse. An empty active
    /// menu has no child to offer it to, so a non-root empty menu collapses
    /// instead of staying open.
    pub(crate) fn composite_back(&mut self, id: NodeId) -> bool {
        let Some(menu) = self.menu_ref(id) else {
            return false;
        };
        if !menu.active {
            return false;
        }
        let consumed = menu.focused().is_some_and(|child| self.back_at(child));
        if !consumed {
            self.collapse(id);
        }
        true
    }

    /// Collapsed → Active.
    pub(crate) fn open(&mut self, id: NodeId) {
        let parent = self.nodes[id.0].parent;
        let shift = self.menu_ref(id).is_some_and(|m| m.shift);
        if shift && let Some(parent) = parent {
            self.shift_at(parent, true);
        }
        if let Some(menu) = self.menu_mut(id) {
            menu.active = true;
            menu.x.jump(menu.bounds.width);
            menu.alpha.jump(0.0);
            menu.slide_to(0.0, 1.0);
        }
        debug!(menu = %id, "menu opened");
    }

    /// Active → Collapsed. Returns `false` for the root, which never closes.
    pub(crate) fn collapse(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes[id.0].parent else {
            trace!(menu = %id, "root ignores collapse");
            return false;
        };
        let Some(menu) = self.menu_mut(id) else {
            return false;
        };
        menu.active = false;
        let width = menu.bounds.width;
        menu.slide_to(width, 0.0);
        let shift = menu.shift;
        if shift {
            self.shift_at(parent, false);
        }
        debug!(menu = %id, "menu collapsed");
        true
    }

    /// Swap a cancel slide-out for the confirm direction after a commit
    /// collapsed the menu.
    pub(crate) fn confirm_slide(&mut self, id: NodeId) {
        if let Some(menu) = self.menu_mut(id)
            && !menu.active
        {
            let width = menu.bounds.width;
            menu.slide_to(-width, 0.0);
        }
    }

    /// Propagate a slide request up the ownership chain, root-first.
    pub(crate) fn shift_at(&mut self, id: NodeId, away: bool) {
        let parent = self.nodes[id.0].parent;
        match self.menu_ref(id).map(|m| m.active) {
            None => {
                if let Some(parent) = parent {
                    self.shift_at(parent, away);
                }
            }
            Some(false) => {}
            Some(true) => {
                if let Some(parent) = parent {
                    self.shift_at(parent, away);
                }
                if let Some(menu) = self.menu_mut(id) {
                    if away {
                        let width = menu.bounds.width;
                        menu.slide_to(-width, 0.0);
                    } else {
                        menu.slide_to(0.0, 1.0);
                    }
                }
                trace!(menu = %id, away, "menu shifted");
            }
        }
    }

    /// Draw `id` and, when selected, its open panel.
    pub(crate) fn render_at(
        &self,
        id: NodeId,
        selected: bool,
        rect: Rect,
        alpha: f32,
        off_x: f32,
        off_y: f32,
    ) {
        let node = &self.nodes[id.0];
        let Some(menu) = node.as_menu() else {
            node.draw_row(selected, rect, alpha, off_x, off_y);
            return;
        };

        if !rect.is_empty() {
            node.draw_row(selected, rect, alpha, off_x, off_y);
        }
        if !selected {
            return;
        }

        let origin = if menu.kind.is_inline() {
            // Popup to the right of the row, vertically centered on it.
            Rect::new(
                rect.x + rect.width + off_x - menu.bounds.width / 2.0,
                rect.y + off_y - (menu.bounds.height - rect.height) / 2.0,
                0.0,
                0.0,
            )
        } else {
            rect
        };
        self.render_panel(node, menu, origin);
    }

    fn render_panel(&self, node: &Node, menu: &Menu, origin: Rect) {
        let mut panel = Rect::new(origin.x, origin.y, menu.bounds.width, menu.bounds.height);
        if menu.shift {
            let anchor = self.panel_bounds(self.find_root(node.id));
            panel.x = anchor.x;
            panel.y = anchor.y;
        } else {
            panel.x += menu.bounds.x;
            panel.y += menu.bounds.y;
        }

        if menu.is_closed_at_rest() || menu.children.is_empty() {
            return;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Menu",
            node = node.id.index(),
            x = panel.x,
            y = panel.y,
            w = panel.width,
            h = panel.height
        )
        .entered();

        let x = menu.x.value();
        let alpha = menu.alpha.value();
        if let Some(render) = &menu.panel_render {
            render(node, panel.translate(x, 0.0), alpha, &node.text);
        }

        let row = panel.with_height(menu.cell_height);
        for (i, &child) in menu.children.iter().enumerate() {
            if i != menu.focus {
                self.render_at(child, false, row, alpha, x, menu.cell_height * i as f32);
            }
        }
        if let Some(child) = menu.focused() {
            self.render_at(
                child,
                true,
                row,
                alpha,
                x,
                menu.cell_height * menu.focus as f32,
            );
        }
    }

    fn panel_bounds(&self, id: NodeId) -> Rect {
        self.menu_ref(id).map(|m| m.bounds).unwrap_or_default()
    }
}
