//! End-to-end walkthroughs of the documented layout behaviours.

use dockstate::{
    Config, Direction, Dock, GroupMember, GroupView, NodeId, Scene, Tab, TabView, Window,
};
use serde_json::{json, Value};

fn titles(view: &TabView) -> Vec<String> {
    view.members.iter().map(|t| t.title.clone()).collect()
}

fn all_titles(dock: &Dock) -> Vec<String> {
    dock.scene().tabs().iter().map(|t| t.title.clone()).collect()
}

/// Attached window holding one view with `names` as tabs, first active.
fn single_view_dock(names: &[&str]) -> (Dock, NodeId) {
    let view = TabView::with_tabs(names.iter().map(|n| Tab::new(*n, Value::Null)).collect());
    let view_id = view.id;
    let window = Window::attached(vec![GroupView::with_view(view)], 1280.0, 720.0);
    (Dock::with_scene(Scene::new(vec![window]), Config::default()), view_id)
}

#[test]
fn untitled_numbering_fills_first_gap() {
    let (dock, _) = single_view_dock(&["Untitled 1", "Untitled 3", "notes"]);
    assert_eq!(dock.new_tab(None, Value::Null).title, "Untitled 2");

    let empty = Dock::default();
    assert_eq!(empty.new_tab(None, Value::Null).title, "Untitled 1");
}

#[test]
fn seeding_an_empty_dock() {
    let mut dock = Dock::default();
    assert!(dock.home());
    for _ in 0..3 {
        let tab = dock.new_tab(None, json!({ "kind": "editor" }));
        dock.add_tab_initial(tab).unwrap();
    }
    assert!(!dock.home());
    assert_eq!(dock.scene().windows.len(), 1);
    assert_eq!(dock.scene().tab_views().len(), 1);
    assert_eq!(
        all_titles(&dock),
        vec!["Untitled 1", "Untitled 2", "Untitled 3"]
    );
    assert_eq!(dock.scene().tabs()[0].content["kind"], "editor");
}

#[test]
fn cross_split_of_single_tab_view_is_noop() {
    let (mut dock, view_id) = single_view_dock(&["A"]);
    let before = dock.scene().clone();
    assert!(!dock.split_tab_view(view_id, Direction::Vertical).unwrap());
    assert_eq!(dock.scene(), &before);
    assert_eq!(dock.scene().tab_views().len(), 1);
    assert_eq!(dock.scene().validate(), Ok(()));
}

#[test]
fn detaching_the_only_view_leaves_one_floating_window() {
    let mut dock = Dock::default();
    let tab = dock.new_tab(None, Value::Null);
    dock.add_tab_initial(tab).unwrap();
    let original = dock.window_ids()[0];
    let view_id = dock.scene().tab_views()[0].id;

    assert!(dock.detach_view(view_id, None, None).unwrap());

    let windows = &dock.scene().windows;
    assert_eq!(windows.len(), 1);
    assert_ne!(windows[0].id, original);
    assert!(windows[0].floating);
    assert_eq!(windows[0].z_index, 1);
    assert!(!dock.home());
    assert_eq!(all_titles(&dock), vec!["Untitled 1"]);
}

#[test]
fn split_then_merge_restores_tabs_on_both_axes() {
    for direction in [Direction::Horizontal, Direction::Vertical] {
        let (mut dock, view_id) = single_view_dock(&["a", "b", "c"]);
        let c = dock.scene().tabs()[2].id;
        dock.change_tab(c).unwrap();

        assert!(dock.split_tab_view(view_id, direction).unwrap());
        let views = dock.scene().tab_views();
        assert_eq!(views.len(), 2);
        assert_eq!(titles(views[0]), vec!["a", "b"]);
        assert_eq!(titles(views[1]), vec!["c"]);
        assert_eq!(dock.scene().validate(), Ok(()));

        let split_off = views[1].id;
        assert!(dock.merge_tab_views(split_off, view_id, None).unwrap());
        let views = dock.scene().tab_views();
        assert_eq!(views.len(), 1);
        assert_eq!(titles(views[0]), vec!["a", "b", "c"]);
        assert_eq!(views[0].active_tab_id, Some(c));
        assert_eq!(dock.scene().validate(), Ok(()));
    }
}

#[test]
fn cross_split_beside_a_sibling_opens_nested_group() {
    let (mut dock, view_id) = single_view_dock(&["a", "b"]);
    let tab = dock.new_tab(Some("c"), Value::Null);
    dock.add_tab(view_id, tab).unwrap();
    let first = dock.scene().tab_views()[0].id;
    assert!(dock.split_tab_view(first, Direction::Horizontal).unwrap());
    assert_eq!(dock.scene().tab_views().len(), 2);

    // The view sits under a horizontal group; vertical is the cross axis.
    assert!(dock.split_tab_view(first, Direction::Vertical).unwrap());
    let group = &dock.scene().windows[0].members[0];
    let [GroupMember::Group(nested), GroupMember::View(_)] = group.members.as_slice() else {
        panic!("Expected nested group beside a view: {group:#?}");
    };
    assert_eq!(nested.members[0].id(), first);
    assert_eq!(dock.scene().tab_views().len(), 3);
    assert_eq!(dock.scene().validate(), Ok(()));
}

#[test]
fn cross_split_of_sole_view_collapses_into_parent() {
    let (mut dock, view_id) = single_view_dock(&["a", "b"]);
    assert!(dock.split_tab_view(view_id, Direction::Vertical).unwrap());
    let group = &dock.scene().windows[0].members[0];
    assert!(matches!(
        group.members.as_slice(),
        [GroupMember::View(_), GroupMember::View(_)]
    ));
    assert_eq!(dock.scene().validate(), Ok(()));
}

#[test]
fn detach_then_attach_round_trip() {
    let view_a = TabView::with_tabs(vec![Tab::new("a", Value::Null), Tab::new("b", Value::Null)]);
    let view_b = TabView::with_tabs(vec![Tab::new("c", Value::Null)]);
    let detached = view_b.id;
    let group = GroupView::new(vec![GroupMember::View(view_a), GroupMember::View(view_b)]);
    let host = Window::attached(vec![group], 1280.0, 720.0);
    let host_id = host.id;
    let mut dock = Dock::with_scene(Scene::new(vec![host]), Config::default());

    assert!(dock.detach_view(detached, Some(100.0), Some(80.0)).unwrap());
    assert_eq!(dock.scene().windows.len(), 2);
    assert!(dock.attach_view(detached).unwrap());

    let windows = &dock.scene().windows;
    assert_eq!(windows.len(), 1);
    let host = &windows[0];
    assert_eq!(host.id, host_id);
    assert!(!host.floating);
    assert_eq!((host.top, host.left, host.z_index), (0.0, 0.0, 0));
    assert_eq!(all_titles(&dock), vec!["a", "b", "c"]);
    assert_eq!(dock.scene().validate(), Ok(()));
}

#[test]
fn floating_windows_stack_densely() {
    let (mut dock, _) = single_view_dock(&["a", "b", "c", "d"]);
    for _ in 0..3 {
        let view = dock.scene().tab_views()[0].id;
        dock.split_tab_view(view, Direction::Horizontal).unwrap();
    }
    let views: Vec<NodeId> = dock.scene().tab_views().iter().map(|v| v.id).collect();
    for view in &views[1..] {
        dock.detach_view(*view, None, None).unwrap();
    }
    let floating: Vec<(NodeId, u32)> = dock
        .scene()
        .windows
        .iter()
        .filter(|w| w.floating)
        .map(|w| (w.id, w.z_index))
        .collect();
    assert_eq!(
        floating.iter().map(|(_, z)| *z).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let bottom = floating[0].0;
    assert!(dock.bring_to_front(bottom).unwrap());
    assert!(dock.minimize_window(floating[1].0).unwrap());
    let z_of = |id: NodeId| {
        dock.scene()
            .windows
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.z_index)
            .unwrap()
    };
    assert_eq!(z_of(floating[2].0), 1);
    assert_eq!(z_of(bottom), 2);
    assert_eq!(z_of(floating[1].0), 0);
    assert_eq!(dock.scene().validate(), Ok(()));
}

#[test]
fn listeners_see_committed_windows() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let (mut dock, view_id) = single_view_dock(&["a"]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    dock.subscribe(move |n| sink.borrow_mut().push(n.windows.len()));

    let tab = dock.new_tab(Some("b"), Value::Null);
    dock.add_tab(view_id, tab).unwrap();
    dock.detach_view(view_id, None, None).unwrap();
    assert_eq!(*seen.borrow(), vec![1, 1]);
}
