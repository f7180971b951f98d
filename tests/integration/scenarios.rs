//! Ordering scenarios run through a whole site
//!
//! Each scenario drives a folder's order through the site's ordered view,
//! the way an editing screen would.

use trellis::foundation::{ContainerId, ErrorKind, Value};
use trellis::storage::{Content, Site, SiteEvent};

fn folder_of(names: &[&str]) -> (Site, ContainerId) {
    let mut site = Site::new();
    let root = site.root();
    for name in names {
        site.insert(root, *name, Content::new("document")).unwrap();
    }
    (site, root)
}

fn keys(site: &mut Site, id: ContainerId) -> Vec<String> {
    site.order(id).unwrap().keys().map(str::to_owned).collect()
}

// =============================================================================
// Batch Moves
// =============================================================================

#[test]
fn move_up_swaps_then_stops_at_the_top() {
    let (mut site, root) = folder_of(&["a", "b", "c", "d"]);

    assert!(site.order(root).unwrap().move_up(&["c"]));
    assert_eq!(keys(&mut site, root), vec!["a", "c", "b", "d"]);

    assert!(!site.order(root).unwrap().move_up(&["a"]));
    assert_eq!(keys(&mut site, root), vec!["a", "c", "b", "d"]);
}

#[test]
fn move_top_keeps_relative_order() {
    let (mut site, root) = folder_of(&["a", "b", "c", "d"]);

    assert!(site.order(root).unwrap().move_top(&["d", "c"]));
    assert_eq!(keys(&mut site, root), vec!["c", "d", "a", "b"]);
}

#[test]
fn move_bottom_then_new_children_follow() {
    let (mut site, root) = folder_of(&["a", "b", "c"]);

    assert!(site.order(root).unwrap().move_bottom(&["a"]));
    site.insert(root, "d", Content::new("document")).unwrap();

    assert_eq!(keys(&mut site, root), vec!["b", "c", "a", "d"]);
}

#[test]
fn unknown_names_change_nothing() {
    let (mut site, root) = folder_of(&["a", "b", "c"]);

    let mut order = site.order(root).unwrap();
    assert!(!order.move_up(&["zz"]));
    assert!(!order.move_down(&["zz"]));
    assert!(!order.move_top(&["zz"]));
    assert!(!order.move_bottom(&["zz"]));
    assert!(order.index().is_consistent());
    assert_eq!(keys(&mut site, root), vec!["a", "b", "c"]);
}

// =============================================================================
// Full Replacement
// =============================================================================

#[test]
fn update_order_renumbers_densely() {
    let (mut site, root) = folder_of(&["a", "b", "c", "d"]);
    site.drain_events();

    site.order(root).unwrap().update_order(&["d", "c", "b", "a"]).unwrap();

    let order = site.order(root).unwrap();
    let entries: Vec<(i64, &str)> = order.index().entries().collect();
    assert_eq!(entries, vec![(0, "d"), (1, "c"), (2, "b"), (3, "a")]);
    assert_eq!(order.index().generate_key(), 4);

    assert_eq!(site.events(), &[SiteEvent::ContainerModified(root)]);
}

#[test]
fn update_order_rejects_partial_lists() {
    let (mut site, root) = folder_of(&["a", "b", "c", "d"]);
    site.drain_events();

    let err = site.order(root).unwrap().update_order(&["a", "b"]).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::IncompatibleKeySet { .. }));
    assert_eq!(keys(&mut site, root), vec!["a", "b", "c", "d"]);
    assert!(site.events().is_empty());
}

#[test]
fn update_order_from_form_values() {
    let (mut site, root) = folder_of(&["a", "b"]);

    let err = site
        .order(root)
        .unwrap()
        .update_order_value(&Value::from("a"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));

    let list = Value::from(vec![Value::from("b"), Value::from("a")]);
    site.order(root).unwrap().update_order_value(&list).unwrap();
    assert_eq!(keys(&mut site, root), vec!["b", "a"]);
}

// =============================================================================
// Empty Folders
// =============================================================================

#[test]
fn empty_folder_has_empty_order() {
    let (mut site, root) = folder_of(&[]);

    let mut order = site.order(root).unwrap();
    order.rebuild();

    assert!(order.is_empty());
    assert_eq!(order.keys().count(), 0);
    assert!(order.next_key(None).unwrap_err().is_not_found());
    assert!(order.previous_key(None).unwrap_err().is_not_found());
    assert_eq!(order.key_position(None).unwrap(), 0);
}

#[test]
fn neighbours_clamp_at_the_ends() {
    let (mut site, root) = folder_of(&["a", "b", "c"]);

    let order = site.order(root).unwrap();
    assert_eq!(order.next_key(Some("a")).unwrap(), "b");
    assert_eq!(order.next_key(Some("c")).unwrap(), "c");
    assert_eq!(order.previous_key(Some("a")).unwrap(), "a");
    assert_eq!(order.next_key(None).unwrap(), "a");
    assert_eq!(order.previous_key(None).unwrap(), "c");
    assert!(order.key_position(Some("zz")).unwrap_err().is_not_found());
}
