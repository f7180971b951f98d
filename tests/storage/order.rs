//! Integration tests for OrderIndex
//!
//! Tests key generation, add/remove, neighbour lookups and rebuilds.

use trellis_foundation::ErrorKind;
use trellis_storage::{Content, OrderIndex, Site};

fn index_of(names: &[&str]) -> OrderIndex {
    let mut index = OrderIndex::new();
    for name in names {
        index.add_item(name);
    }
    index
}

fn names(index: &OrderIndex) -> Vec<&str> {
    index.names().collect()
}

// =============================================================================
// Key Generation
// =============================================================================

#[test]
fn first_key_is_one() {
    let index = OrderIndex::new();
    assert_eq!(index.generate_key(), 1);
}

#[test]
fn keys_follow_the_largest_position() {
    let mut index = index_of(&["a", "b", "c"]);
    assert_eq!(index.generate_key(), 4);

    index.remove_item("c");
    assert_eq!(index.generate_key(), 3);

    index.remove_item("a");
    assert_eq!(index.generate_key(), 3);
}

#[test]
fn keys_continue_after_dense_renumbering() {
    let mut index = index_of(&["a", "b", "c"]);
    index.update_order(&["c", "b", "a"]).unwrap();

    assert_eq!(index.generate_key(), 3);
    index.add_item("d");
    assert_eq!(index.key_position(Some("d")).unwrap(), 3);
}

// =============================================================================
// Add and Remove
// =============================================================================

#[test]
fn add_appends() {
    let index = index_of(&["b", "a", "c"]);
    assert_eq!(names(&index), vec!["b", "a", "c"]);
    assert!(index.is_consistent());
}

#[test]
fn add_existing_is_noop() {
    let mut index = index_of(&["a", "b"]);
    assert!(!index.add_item("a"));
    assert_eq!(names(&index), vec!["a", "b"]);
    assert_eq!(index.len(), 2);
}

#[test]
fn remove_untracked_is_noop() {
    let mut index = index_of(&["a"]);
    assert!(!index.remove_item("zzz"));
    assert!(index.remove_item("a"));
    assert!(index.is_empty());
    assert!(index.is_consistent());
}

// =============================================================================
// Neighbours and Positions
// =============================================================================

#[test]
fn next_and_previous() {
    let index = index_of(&["a", "b", "c"]);

    assert_eq!(index.next_key(Some("a")).unwrap(), "b");
    assert_eq!(index.previous_key(Some("c")).unwrap(), "b");
    assert_eq!(index.next_key(None).unwrap(), "a");
    assert_eq!(index.previous_key(None).unwrap(), "c");
}

#[test]
fn neighbours_clamp_at_the_ends() {
    let index = index_of(&["a", "b", "c"]);

    assert_eq!(index.next_key(Some("c")).unwrap(), "c");
    assert_eq!(index.previous_key(Some("a")).unwrap(), "a");
}

#[test]
fn neighbours_of_untracked_names_fail() {
    let index = index_of(&["a"]);

    assert!(matches!(
        index.next_key(Some("x")).unwrap_err().kind,
        ErrorKind::NameNotFound(_)
    ));
    assert!(index.previous_key(Some("x")).unwrap_err().is_not_found());
}

#[test]
fn empty_index_has_no_neighbours() {
    let index = OrderIndex::new();

    assert!(index.next_key(None).unwrap_err().is_not_found());
    assert!(index.previous_key(None).unwrap_err().is_not_found());
    assert_eq!(index.names().count(), 0);
}

#[test]
fn key_position_without_name_is_zero() {
    let index = index_of(&["a", "b"]);

    assert_eq!(index.key_position(None).unwrap(), 0);
    assert_eq!(index.key_position(Some("a")).unwrap(), 1);
    assert_eq!(index.key_position(Some("b")).unwrap(), 2);
    assert!(index.key_position(Some("c")).unwrap_err().is_not_found());
}

#[test]
fn name_at_position() {
    let index = index_of(&["a", "b"]);

    assert_eq!(index.name_at(2).unwrap(), "b");
    assert!(matches!(
        index.name_at(0).unwrap_err().kind,
        ErrorKind::PositionNotFound(0)
    ));
}

// =============================================================================
// Rebuild
// =============================================================================

#[test]
fn rebuild_uses_native_order() {
    let mut site = Site::new();
    let root = site.root();
    for name in ["c", "a", "b"] {
        site.insert(root, name, Content::untyped()).unwrap();
    }

    let mut index = index_of(&["x", "y"]);
    index.rebuild(site.folder(root).unwrap());

    assert_eq!(names(&index), vec!["a", "b", "c"]);
    assert!(index.mirrors(site.folder(root).unwrap()));
}

#[test]
fn rebuild_is_idempotent() {
    let mut site = Site::new();
    let root = site.root();
    for name in ["q", "p", "r"] {
        site.insert(root, name, Content::untyped()).unwrap();
    }
    let folder = site.folder(root).unwrap();

    let first = OrderIndex::from_container(folder);
    let mut second = first.clone();
    second.rebuild(folder);

    assert_eq!(names(&first), names(&second));
}

#[test]
fn rebuild_of_empty_container() {
    let site = Site::new();
    let index = OrderIndex::from_container(site.folder(site.root()).unwrap());

    assert!(index.is_empty());
    assert!(index.next_key(None).is_err());
}
