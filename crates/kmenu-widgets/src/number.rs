#![forbid(unsafe_code)]

//! Numeric editor over a single placeholder row.
//!
//! While open, up/down move the value by one step, clamp it into
//! `[min, max]`, and snap it to the step grid anchored at `min`. Every edit
//! re-stamps the placeholder immediately, but the owning node keeps its
//! committed payload until confirm: observers see the tentative value in
//! the placeholder and the committed one on the menu.

use kmenu_core::geometry::Rect;
use kmenu_core::{debug, warn};

use crate::MenuTree;
use crate::menu::{Menu, MenuKind};
use crate::node::{Node, NodeId};

/// Decimals used when formatting unless overridden.
pub const DEFAULT_PRECISION: usize = 6;

/// Value, bounds and rollback snapshot of a Number menu.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberState {
    pub(crate) value: f32,
    pub(crate) last_committed: f32,
    pub(crate) min: f32,
    pub(crate) max: f32,
    pub(crate) step: f32,
    pub(crate) precision: usize,
    pub(crate) display: bool,
    pub(crate) label: String,
}

impl NumberState {
    /// Tentative value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value restored on cancel.
    pub fn last_committed_value(&self) -> f32 {
        self.last_committed
    }

    /// Lower bound.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Increment per up/down.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// The value as shown in the placeholder.
    pub fn formatted(&self) -> String {
        format!("{:.*}", self.precision, self.value)
    }

    fn nudge(&mut self, direction: f32) {
        self.value = snap(self.value + direction * self.step, self.min, self.max, self.step);
    }
}

/// Clamp into `[min, max]`, then snap to the nearest `min + k * step`
/// (ties away from zero), staying inside the bounds.
pub fn snap(value: f32, min: f32, max: f32, step: f32) -> f32 {
    let clamped = value.max(min).min(max);
    if !(step.is_finite() && step > 0.0) {
        return clamped;
    }
    let mut snapped = min + ((clamped - min) / step).round() * step;
    if snapped > max {
        snapped -= step;
    }
    snapped.max(min)
}

/// Parse a payload; anything unparsable is zero.
pub fn parse_value(text: &str) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(value) => value,
        Err(_err) => {
            warn!(text, error = %_err, "numeric payload did not parse; using 0");
            0.0
        }
    }
}

/// Builder for Number menus.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNumber {
    width: f32,
    height: f32,
    start: f32,
    min: f32,
    max: f32,
    step: f32,
    precision: usize,
    display: bool,
}

impl MenuNumber {
    /// A one-row numeric popup.
    ///
    /// `min` and `max` are swapped if given in the wrong order; `start` is
    /// clamped into them and snapped to the step grid.
    #[must_use]
    pub fn new(width: f32, height: f32, start: f32, min: f32, max: f32, step: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            width,
            height,
            start: snap(start, min, max, step),
            min,
            max,
            step,
            precision: DEFAULT_PRECISION,
            display: false,
        }
    }

    /// Like [`new`](Self::new), but the owning row shows `"<label>: <value>"`.
    #[must_use]
    pub fn display(width: f32, height: f32, start: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            display: true,
            ..Self::new(width, height, start, min, max, step)
        }
    }

    /// Decimals shown in the placeholder and the display label.
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl From<MenuNumber> for Menu {
    fn from(n: MenuNumber) -> Self {
        Menu::with_kind(
            Rect::from_size(n.width, n.height),
            n.height,
            MenuKind::Number(NumberState {
                value: n.start,
                last_committed: n.start,
                min: n.min,
                max: n.max,
                step: n.step,
                precision: n.precision,
                display: n.display,
                label: String::new(),
            }),
        )
    }
}

impl From<MenuNumber> for Node {
    fn from(n: MenuNumber) -> Self {
        Node::menu(n)
    }
}

impl MenuTree {
    /// Numeric state of a Number menu.
    pub fn number(&self, id: NodeId) -> Option<&NumberState> {
        match &self.menu_ref(id)?.kind {
            MenuKind::Number(state) => Some(state),
            _ => None,
        }
    }

    fn number_mut(&mut self, id: NodeId) -> Option<&mut NumberState> {
        match &mut self.menu_mut(id)?.kind {
            MenuKind::Number(state) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn number_seed(&mut self, id: NodeId) {
        let text = self.nodes[id.0].text.clone();
        let data = self.nodes[id.0].data.clone();
        let Some(state) = self.number_mut(id) else {
            return;
        };
        state.label = text;
        if !data.is_empty() {
            state.value = snap(parse_value(&data), state.min, state.max, state.step);
            state.last_committed = state.value;
        }
        let formatted = state.formatted();

        let mut row = Node::new(formatted.clone()).with_data(formatted);
        row.on_render = self.row_renderer_for_children(id);
        self.insert(Some(id), row);
        self.number_relabel(id);
    }

    /// Write the current value into the placeholder.
    fn number_stamp(&mut self, id: NodeId) {
        let Some(formatted) = self.number(id).map(NumberState::formatted) else {
            return;
        };
        if let Some(placeholder) = self.placeholder(id) {
            self.stamp(placeholder, &formatted);
        }
    }

    fn number_relabel(&mut self, id: NodeId) {
        let Some(state) = self.number(id) else {
            return;
        };
        if state.display {
            let text = format!("{}: {}", state.label, state.formatted());
            self.nodes[id.0].text = text;
        }
    }

    /// Up (`+1.0`) or down (`-1.0`) while open.
    pub(crate) fn number_step(&mut self, id: NodeId, direction: f32) -> bool {
        if !self.menu_ref(id).is_some_and(|m| m.active) {
            return false;
        }
        if let Some(state) = self.number_mut(id) {
            state.nudge(direction);
            debug!(menu = %id, value = state.value, "number edited");
        }
        self.number_stamp(id);
        true
    }

    pub(crate) fn number_press(&mut self, id: NodeId) -> bool {
        if !self.menu_ref(id).is_some_and(|m| m.active) {
            return self.composite_press(id);
        }
        self.number_stamp(id);
        let Some(state) = self.number_mut(id) else {
            return true;
        };
        state.last_committed = state.value;
        let formatted = state.formatted();
        self.nodes[id.0].data = formatted;
        if let Some(placeholder) = self.placeholder(id) {
            self.fire_commit(id, placeholder);
        }

        self.number_back(id);
        self.confirm_slide(id);
        self.number_relabel(id);
        true
    }

    pub(crate) fn number_back(&mut self, id: NodeId) -> bool {
        if let Some(state) = self.number_mut(id) {
            state.value = state.last_committed;
        }
        self.number_stamp(id);
        self.composite_back(id)
    }

    /// Parse, clamp and snap an external payload. The node keeps the
    /// formatted value, not the raw text.
    pub(crate) fn number_set_data(&mut self, id: NodeId, data: &str) {
        let parsed = parse_value(data);
        let Some(state) = self.number_mut(id) else {
            return;
        };
        state.value = snap(parsed, state.min, state.max, state.step);
        state.last_committed = state.value;
        let formatted = state.formatted();
        self.nodes[id.0].data = formatted;
        self.number_stamp(id);
        self.number_relabel(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(start: f32, min: f32, max: f32, step: f32) -> (MenuTree, NodeId) {
        let mut tree = MenuTree::new(Menu::new(Rect::from_size(200.0, 200.0), 20.0));
        let id = tree
            .take(
                tree.root(),
                Node::menu(MenuNumber::display(50.0, 20.0, start, min, max, step).with_precision(1))
                    .with_text("Volume"),
            )
            .unwrap();
        tree.render();
        (tree, id)
    }

    #[test]
    fn snap_clamps_and_rounds() {
        assert_eq!(snap(12.0, 0.0, 10.0, 3.0), 9.0);
        assert_eq!(snap(-3.0, 0.0, 10.0, 3.0), 0.0);
        assert_eq!(snap(4.4, 0.0, 10.0, 3.0), 3.0);
        // 10 / 4 = 2.5 rounds away to 12, which is pulled back inside.
        assert_eq!(snap(10.0, 0.0, 10.0, 4.0), 8.0);
        // Grid anchored at min.
        assert_eq!(snap(3.2, 1.0, 10.0, 2.0), 3.0);
        assert_eq!(snap(5.0, 0.0, 10.0, 0.0), 5.0);
    }

    #[test]
    fn parse_falls_back_to_zero() {
        assert_eq!(parse_value(" 2.5 "), 2.5);
        assert_eq!(parse_value("loud"), 0.0);
        assert_eq!(parse_value(""), 0.0);
    }

    #[test]
    fn builder_orders_bounds_and_clamps_start() {
        let menu = Menu::from(MenuNumber::new(10.0, 10.0, 50.0, 10.0, 0.0, 1.0));
        let MenuKind::Number(state) = menu.kind() else {
            panic!("expected number kind");
        };
        assert_eq!((state.min(), state.max()), (0.0, 10.0));
        assert_eq!(state.value(), 10.0);
    }

    #[test]
    fn up_is_ignored_while_collapsed() {
        let (mut tree, id) = volume(0.0, 0.0, 10.0, 3.0);
        assert!(!tree.up_at(id));
        assert_eq!(tree.number(id).unwrap().value(), 0.0);
    }

    #[test]
    fn edits_are_tentative_until_confirm() {
        let (mut tree, id) = volume(0.0, 0.0, 10.0, 3.0);
        let placeholder = tree.placeholder(id).unwrap();
        tree.press();
        tree.up();
        assert_eq!(tree[placeholder].data(), "3.0");
        assert_eq!(tree.number(id).unwrap().last_committed_value(), 0.0);
        assert_eq!(tree[id].text(), "Volume: 0.0");

        tree.press();
        assert_eq!(tree.number(id).unwrap().last_committed_value(), 3.0);
        assert_eq!(tree[id].data(), "3.0");
        assert_eq!(tree[id].text(), "Volume: 3.0");
        let menu = tree.menu(id).unwrap();
        assert!(!menu.is_active());
        assert_eq!(menu.x_target(), -50.0);
    }

    #[test]
    fn cancel_restores_snapshot() {
        let (mut tree, id) = volume(6.0, 0.0, 10.0, 3.0);
        let placeholder = tree.placeholder(id).unwrap();
        tree.press();
        tree.down();
        tree.down();
        assert_eq!(tree.number(id).unwrap().value(), 0.0);
        tree.back();
        assert_eq!(tree.number(id).unwrap().value(), 6.0);
        assert_eq!(tree[placeholder].text(), "6.0");
        assert!(!tree.menu(id).unwrap().is_active());
    }

    #[test]
    fn external_set_parses_and_restamps() {
        let (mut tree, id) = volume(0.0, 0.0, 10.0, 1.0);
        let placeholder = tree.placeholder(id).unwrap();
        tree.set_data(id, "7").unwrap();
        let state = tree.number(id).unwrap();
        assert_eq!(state.value(), 7.0);
        assert_eq!(state.last_committed_value(), 7.0);
        assert_eq!(tree[placeholder].data(), "7.0");
        assert_eq!(tree[id].text(), "Volume: 7.0");

        tree.set_data(id, "garbage").unwrap();
        assert_eq!(tree.number(id).unwrap().value(), 0.0);
        assert_eq!(tree[id].data(), "0.0");
    }

    #[test]
    fn external_set_snaps_to_grid() {
        let (mut tree, id) = volume(0.0, 0.0, 10.0, 3.0);
        tree.set_data(id, "5").unwrap();
        let state = tree.number(id).unwrap();
        assert_eq!(state.value(), 6.0);
        assert_eq!(state.last_committed_value(), 6.0);
        assert_eq!(tree[id].data(), "6.0");

        tree.press();
        tree.up();
        assert_eq!(tree.number(id).unwrap().value(), 9.0);
    }

    #[test]
    fn start_and_initial_payload_snap_to_grid() {
        let menu = Menu::from(MenuNumber::new(10.0, 10.0, 5.0, 0.0, 10.0, 3.0));
        let MenuKind::Number(state) = menu.kind() else {
            panic!("expected number kind");
        };
        assert_eq!(state.value(), 6.0);

        let mut tree = MenuTree::new(Menu::new(Rect::from_size(200.0, 200.0), 20.0));
        let id = tree
            .take(
                tree.root(),
                Node::menu(MenuNumber::new(50.0, 20.0, 0.0, 1.0, 10.0, 2.0)).with_data("4.2"),
            )
            .unwrap();
        // Grid anchored at min: 1, 3, 5, ...
        assert_eq!(tree.number(id).unwrap().value(), 5.0);
        assert_eq!(tree.number(id).unwrap().last_committed_value(), 5.0);
    }
}
