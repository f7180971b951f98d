//! Integration tests for Site
//!
//! Tests structural changes and how they flow into child orders.

use trellis_foundation::{ContainerId, ErrorKind, Value};
use trellis_storage::{Content, Marker, Site, SiteConfig, SiteEvent};

fn names(site: &mut Site, id: ContainerId) -> Vec<String> {
    site.order(id).unwrap().keys().map(str::to_owned).collect()
}

fn site_with(names: &[&str]) -> (Site, ContainerId) {
    let mut site = Site::new();
    let root = site.root();
    for name in names {
        site.insert(root, *name, Content::new("document").with_title(name.to_uppercase()))
            .unwrap();
    }
    (site, root)
}

fn folder(site: &mut Site, parent: ContainerId, name: &str) -> ContainerId {
    site.create_folder(parent, name, Content::new("folder"), &[Marker::OrderAware])
        .unwrap()
}

// =============================================================================
// Self-healing Orders
// =============================================================================

#[test]
fn inserts_append_in_insertion_order() {
    let (mut site, root) = site_with(&["c", "a", "b"]);
    assert_eq!(names(&mut site, root), vec!["c", "a", "b"]);
}

#[test]
fn removal_drops_from_order() {
    let (mut site, root) = site_with(&["a", "b", "c"]);
    site.remove(root, "b").unwrap();

    assert_eq!(names(&mut site, root), vec!["a", "c"]);
    assert!(site.query_order(root).unwrap().mirrors(site.folder(root).unwrap()));
}

#[test]
fn rename_moves_to_the_end() {
    let (mut site, root) = site_with(&["a", "b", "c"]);
    site.rename(root, "a", "z").unwrap();

    assert_eq!(names(&mut site, root), vec!["b", "c", "z"]);
}

#[test]
fn relocate_between_folders() {
    let (mut site, root) = site_with(&["a", "b"]);
    let docs = folder(&mut site, root, "docs");
    site.insert(docs, "x", Content::untyped()).unwrap();

    site.relocate(root, "a", docs, "a").unwrap();

    assert_eq!(names(&mut site, root), vec!["b", "docs"]);
    assert_eq!(names(&mut site, docs), vec!["x", "a"]);
}

#[test]
fn reorder_survives_unrelated_changes() {
    let (mut site, root) = site_with(&["a", "b", "c"]);
    site.order(root).unwrap().move_bottom(&["a"]);

    site.insert(root, "d", Content::untyped()).unwrap();
    site.remove(root, "b").unwrap();

    assert_eq!(names(&mut site, root), vec!["c", "a", "d"]);
}

// =============================================================================
// Structural Rules
// =============================================================================

#[test]
fn duplicate_names_rejected() {
    let (mut site, root) = site_with(&["a"]);
    let err = site.insert(root, "a", Content::untyped()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateName(_)));
}

#[test]
fn unremovable_content_stays() {
    let (mut site, root) = site_with(&[]);
    site.insert(root, "home", Content::untyped().with_marker(Marker::Unremovable))
        .unwrap();

    let err = site.remove(root, "home").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnremovableContent(_)));
    assert_eq!(names(&mut site, root), vec!["home"]);
}

#[test]
fn folder_cannot_move_into_itself() {
    let (mut site, root) = site_with(&[]);
    let outer = folder(&mut site, root, "outer");
    let inner = folder(&mut site, outer, "inner");

    let err = site.relocate(root, "outer", inner, "outer").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MoveIntoSelf(_)));
    let err = site.duplicate(root, "outer", outer, "copy").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MoveIntoSelf(_)));
}

#[test]
fn removed_folder_ids_go_stale() {
    let (mut site, root) = site_with(&[]);
    let docs = folder(&mut site, root, "docs");
    let nested = folder(&mut site, docs, "nested");
    site.insert(nested, "x", Content::untyped()).unwrap();
    assert!(site.has_order(nested));

    site.remove(root, "docs").unwrap();

    assert!(site.folder(docs).unwrap_err().is_not_found());
    assert!(site.folder(nested).unwrap_err().is_not_found());
    assert!(site.query_order(nested).is_none());
    assert_eq!(site.folder_count(), 1);
}

#[test]
fn duplicate_copies_the_tree() {
    let (mut site, root) = site_with(&[]);
    let docs = folder(&mut site, root, "docs");
    for name in ["x", "y"] {
        site.insert(docs, name, Content::untyped()).unwrap();
    }
    site.order(docs).unwrap().move_top(&["y"]);

    site.duplicate(root, "docs", root, "archive").unwrap();
    let archive = site.child_folder(root, "archive").unwrap();

    assert_ne!(archive, docs);
    assert_eq!(names(&mut site, archive), vec!["y", "x"]);
    site.order(archive).unwrap().move_top(&["x"]);
    assert_eq!(names(&mut site, docs), vec!["y", "x"]);
}

// =============================================================================
// Order Awareness and Configuration
// =============================================================================

#[test]
fn plain_folders_have_no_order() {
    let (mut site, root) = site_with(&[]);
    let plain = site
        .create_folder(root, "plain", Content::new("folder"), &[])
        .unwrap();
    site.insert(plain, "x", Content::untyped()).unwrap();

    assert!(!site.has_order(plain));
    let err = site.order(plain).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotOrderAware(_)));
}

#[test]
fn order_built_lazily_without_maintenance() {
    let mut site = Site::with_config(SiteConfig::default().with_order_maintenance(false));
    let root = site.root();
    for name in ["b", "c", "a"] {
        site.insert(root, name, Content::untyped()).unwrap();
    }

    assert_eq!(site.handler_count(), 0);
    assert!(site.query_order(root).is_none());
    assert_eq!(names(&mut site, root), vec!["a", "b", "c"]);
}

#[test]
fn root_can_be_unordered() {
    let mut site = Site::with_config(SiteConfig::default().with_order_aware_root(false));
    let root = site.root();
    site.insert(root, "a", Content::untyped()).unwrap();

    assert!(!site.has_order(root));
    assert!(site.order(root).is_err());
}

#[test]
fn reserved_names_apply_to_the_root() {
    let site = Site::with_config(SiteConfig::rooted("site").with_reserved_name("index.html"));
    let root = site.folder(site.root()).unwrap();

    assert!(root.is_reserved("index.html"));
    assert_eq!(root.content_type(), Some("site"));
}

// =============================================================================
// Ordered View
// =============================================================================

#[test]
fn ordered_view_sequence_access() {
    let (mut site, root) = site_with(&["a", "b", "c"]);
    let mut view = site.order(root).unwrap();
    view.move_top(&["c"]);

    let titles: Vec<&str> = view.values().into_iter().map(Content::title).collect();
    assert_eq!(titles, vec!["C", "A", "B"]);

    let items: Vec<&str> = view.items().into_iter().map(|(name, _)| name).collect();
    assert_eq!(items, vec!["c", "a", "b"]);

    let middle: Vec<&str> = view
        .slice(Some(1), Some(2))
        .into_iter()
        .map(Content::title)
        .collect();
    assert_eq!(middle, vec!["A"]);
    assert_eq!(view.slice(None, None).len(), 3);
    assert_eq!(view.slice(Some(2), None).len(), 1);

    assert!(view.contains("a"));
    assert_eq!(view.get("b").unwrap().title(), "B");
    assert_eq!(view.len(), 3);
}

#[test]
fn ordered_view_positions() {
    let (mut site, root) = site_with(&["a", "b"]);
    let view = site.order(root).unwrap();

    assert_eq!(view.get_by_position(2).unwrap().title(), "B");
    assert!(matches!(
        view.get_by_position(9).unwrap_err().kind,
        ErrorKind::PositionNotFound(9)
    ));
    assert_eq!(view.key_position(Some("a")).unwrap(), 1);
    assert_eq!(view.next_key(Some("a")).unwrap(), "b");
    assert_eq!(view.previous_key(None).unwrap(), "b");
}

#[test]
fn ordered_view_add_requires_child() {
    let mut site = Site::with_config(SiteConfig::default().with_order_maintenance(false));
    let root = site.root();
    site.insert(root, "a", Content::untyped()).unwrap();
    let mut view = site.order(root).unwrap();

    assert!(!view.add_item("a").unwrap());
    assert!(view.add_item("ghost").unwrap_err().is_not_found());
    assert!(view.remove_item("a"));
    assert!(view.add_item("a").unwrap());
}

#[test]
fn update_order_records_modification() {
    let (mut site, root) = site_with(&["a", "b"]);
    site.drain_events();

    site.order(root).unwrap().update_order(&["b", "a"]).unwrap();
    assert!(site.order(root).unwrap().update_order(&["a"]).is_err());

    assert_eq!(site.events(), &[SiteEvent::ContainerModified(root)]);
}

#[test]
fn update_order_from_untyped_input() {
    let (mut site, root) = site_with(&["a", "b"]);
    let mut view = site.order(root).unwrap();

    let err = view.update_order_value(&Value::from("a")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));

    view.update_order_value(&Value::from(vec!["b", "a"])).unwrap();
    assert_eq!(view.keys().collect::<Vec<_>>(), vec!["b", "a"]);
}
