#![forbid(unsafe_code)]

//! A host-style settings screen driven entirely through the facade.

use std::cell::RefCell;
use std::rc::Rc;

use kmenu::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Start,
    Resolution(String),
    Fullscreen(bool),
    Volume(f32),
    Rename(String),
}

struct Screen {
    tree: MenuTree,
    actions: Rc<RefCell<Vec<Action>>>,
    fullscreen: NodeId,
    volume: NodeId,
    name: NodeId,
}

fn build() -> Result<Screen> {
    let actions = Rc::new(RefCell::new(Vec::new()));
    let mut tree = MenuTree::new(
        Node::menu(Menu::new(Rect::new(40.0, 40.0, 220.0, 100.0), 20.0)).with_text("Main"),
    );
    let root = tree.root();

    let sink = Rc::clone(&actions);
    tree.take(
        root,
        Node::new("Start").on_commit(move |_| sink.borrow_mut().push(Action::Start)),
    )?;

    let sink = Rc::clone(&actions);
    let video = tree.take(
        root,
        Node::menu(Menu::select(Rect::new(220.0, 0.0, 120.0, 60.0), 20.0).with_shift(true))
            .with_text("Resolution")
            .with_data("800x600")
            .on_commit(move |n| sink.borrow_mut().push(Action::Resolution(n.data().to_owned()))),
    )?;
    for res in ["640x480", "800x600", "1024x768"] {
        tree.take(video, Node::new(res).with_data(res))?;
    }

    let sink = Rc::clone(&actions);
    let fullscreen = tree.take(
        root,
        Node::menu(MenuBool::display(60.0, 20.0).with_labels("On", "Off"))
            .with_text("Fullscreen")
            .with_data("false")
            .on_commit(move |n| sink.borrow_mut().push(Action::Fullscreen(n.data() == "true"))),
    )?;

    let sink = Rc::clone(&actions);
    let volume = tree.take(
        root,
        Node::menu(MenuNumber::display(60.0, 20.0, 5.0, 0.0, 10.0, 1.0).with_precision(0))
            .with_text("Volume")
            .on_commit(move |n| {
                let value = kmenu::widgets::number::parse_value(n.data());
                sink.borrow_mut().push(Action::Volume(value));
            }),
    )?;

    let sink = Rc::clone(&actions);
    let name = tree.take(
        root,
        Node::menu(MenuText::new(120.0, 20.0))
            .with_text("Name")
            .with_data("player")
            .on_commit(move |n| sink.borrow_mut().push(Action::Rename(n.data().to_owned()))),
    )?;

    tree.render();
    Ok(Screen {
        tree,
        actions,
        fullscreen,
        volume,
        name,
    })
}

impl Screen {
    fn frame(&mut self) {
        self.tree.update(1.0 / 60.0);
        self.tree.render();
    }

    fn drain(&self) -> Vec<Action> {
        std::mem::take(&mut *self.actions.borrow_mut())
    }
}

#[test]
fn initial_payloads_are_reflected() {
    let screen = build().unwrap();
    assert_eq!(screen.tree[screen.fullscreen].text(), "Fullscreen: Off");
    assert_eq!(screen.tree[screen.volume].text(), "Volume: 5");
    let video = screen.tree[screen.tree.root()].children()[1];
    assert_eq!(screen.tree.last_committed_index(video), Some(1));
}

#[test]
fn full_session_produces_actions_in_order() {
    let mut screen = build().unwrap();
    let tree = &mut screen.tree;

    // Resolution: open, pick 1024x768.
    tree.down();
    tree.press();
    tree.down();
    tree.press();
    // Fullscreen: open, flip to On.
    tree.down();
    tree.press();
    tree.up();
    tree.press();
    // Volume: open, +2, confirm.
    tree.down();
    tree.press();
    tree.up();
    tree.up();
    tree.press();
    // Start.
    tree.down();
    tree.down();
    tree.press();
    screen.frame();

    assert_eq!(
        screen.drain(),
        vec![
            Action::Resolution("1024x768".into()),
            Action::Fullscreen(true),
            Action::Volume(7.0),
            Action::Start,
        ]
    );
    assert_eq!(screen.tree[screen.fullscreen].text(), "Fullscreen: On");
    assert_eq!(screen.tree[screen.volume].text(), "Volume: 7");
}

#[test]
fn host_applies_queued_edits_after_commit() {
    let mut screen = build().unwrap();
    let placeholder = screen.tree.placeholder(screen.name).unwrap();

    // Focus Name (row 4) and open it.
    for _ in 0..4 {
        screen.tree.down();
    }
    screen.tree.press();
    screen.tree.set_data(placeholder, "kim").unwrap();
    screen.tree.press();
    screen.frame();

    let actions = screen.drain();
    assert_eq!(actions, vec![Action::Rename("kim".into())]);

    // The host reacts by renaming the row, outside the callback.
    screen.tree.set_text(screen.name, "Name: kim").unwrap();
    assert_eq!(screen.tree[screen.name].text(), "Name: kim");
    assert_eq!(screen.tree[screen.name].data(), "kim");
}

#[test]
fn errors_surface_through_facade_result() {
    let mut screen = build().unwrap();
    let err: Error = screen
        .tree
        .take(screen.volume, Node::new("extra"))
        .unwrap_err();
    assert_eq!(err, kmenu::TreeError::FixedChildren(screen.volume));
    assert!(err.to_string().contains("fixed child set"));
}
