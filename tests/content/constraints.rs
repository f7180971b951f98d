//! Integration tests for containment rules

use trellis_content::{
    ContainerTypesConstraint, ItemTypePrecondition, NameChooserConfig, PORTAL,
    check_content_type, check_object,
};
use trellis_foundation::{ContainerId, ErrorKind};
use trellis_storage::{Content, Marker, Site};

use crate::fixtures::{registry, site};

struct Rooms {
    site: Site,
    root: ContainerId,
    folder: ContainerId,
    newsroom: ContainerId,
    untyped: ContainerId,
}

fn rooms() -> Rooms {
    let mut site = site();
    let root = site.root();
    let folder = site
        .create_folder(root, "folder", Content::new("folder"), &[Marker::ContentContainer])
        .unwrap();
    let newsroom = site
        .create_folder(root, "news", Content::new("newsroom"), &[Marker::ContentContainer])
        .unwrap();
    let untyped = site
        .create_folder(root, "misc", Content::untyped(), &[Marker::ContentContainer])
        .unwrap();
    Rooms {
        site,
        root,
        folder,
        newsroom,
        untyped,
    }
}

// =============================================================================
// Item Preconditions
// =============================================================================

#[test]
fn active_types_go_anywhere_by_default() {
    let registry = registry();
    let r = rooms();

    check_object(&registry, &r.site, r.root, "a", &Content::new("document")).unwrap();
    check_object(&registry, &r.site, r.folder, "a", &Content::new("document")).unwrap();
}

#[test]
fn newsroom_only_takes_news() {
    let registry = registry();
    let r = rooms();

    check_object(&registry, &r.site, r.newsroom, "story", &Content::new("news")).unwrap();

    let err =
        check_object(&registry, &r.site, r.newsroom, "doc", &Content::new("document")).unwrap_err();
    assert!(err.is_invalid());
    match err.kind {
        ErrorKind::InvalidItemType {
            container,
            item,
            allowed,
            name,
        } => {
            assert_eq!(container, r.newsroom);
            assert_eq!(item, "document");
            assert_eq!(allowed, vec!["news".to_string()]);
            assert_eq!(name, "doc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn untyped_items_are_refused() {
    let registry = registry();
    let r = rooms();

    let err = check_object(&registry, &r.site, r.root, "x", &Content::untyped()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidItemType { ref item, .. } if item == "<unknown>"
    ));
}

#[test]
fn explicit_types_pass_object_checks() {
    let registry = registry();
    let r = rooms();

    // Only listing hides explicitly-addable types; placement allows them.
    check_object(&registry, &r.site, r.root, "story", &Content::new("news")).unwrap();
}

#[test]
fn preconditions_can_be_extended() {
    let mut registry = registry();
    let r = rooms();

    registry.add_precondition("newsroom", &ItemTypePrecondition::new().with_type("document"));

    check_object(&registry, &r.site, r.newsroom, "doc", &Content::new("document")).unwrap();
    check_object(&registry, &r.site, r.newsroom, "story", &Content::new("news")).unwrap();
}

// =============================================================================
// Container Constraints
// =============================================================================

#[test]
fn images_live_in_folders() {
    let registry = registry();
    let r = rooms();

    check_object(&registry, &r.site, r.folder, "pic", &Content::new("image")).unwrap();

    let err = check_object(&registry, &r.site, r.root, "pic", &Content::new("image")).unwrap_err();
    match err.kind {
        ErrorKind::InvalidContainerType {
            container_type,
            allowed,
        } => {
            assert_eq!(container_type, "site");
            assert_eq!(allowed, vec!["folder".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn untyped_containers_refuse_constrained_items() {
    let registry = registry();
    let r = rooms();

    check_object(&registry, &r.site, r.untyped, "doc", &Content::new("document")).unwrap();

    let err =
        check_object(&registry, &r.site, r.untyped, "pic", &Content::new("image")).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidContainerType { ref container_type, .. } if container_type == "<unknown>"
    ));
}

#[test]
fn container_constraints_match_tags() {
    let mut registry = registry();
    let r = rooms();

    registry.add_container_constraint("image", &ContainerTypesConstraint::new().with_tag(PORTAL));

    check_object(&registry, &r.site, r.root, "pic", &Content::new("image")).unwrap();
    check_object(&registry, &r.site, r.folder, "pic", &Content::new("image")).unwrap();
    assert!(
        check_object(&registry, &r.site, r.newsroom, "pic", &Content::new("image"))
            .unwrap_err()
            .is_invalid()
    );
}

#[test]
fn add_applies_containment() {
    let registry = registry();
    let mut r = rooms();
    let config = NameChooserConfig::default();

    let image = registry.bind("image", r.root).unwrap();
    let err = image
        .add(&mut r.site, Content::new("image"), "pic", &config)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidContainerType { .. }));
    assert!(r.site.child(r.root, "pic").is_err());

    let image = registry.bind("image", r.folder).unwrap();
    assert_eq!(
        image
            .add(&mut r.site, Content::new("image"), "pic", &config)
            .unwrap(),
        "pic"
    );
}

// =============================================================================
// Type-Level Checks
// =============================================================================

#[test]
fn content_type_checks() {
    let registry = registry();
    let r = rooms();
    let news = registry.lookup("news").unwrap();
    let image = registry.lookup("image").unwrap();

    check_content_type(&registry, &r.site, r.newsroom, news).unwrap();
    check_content_type(&registry, &r.site, r.folder, image).unwrap();
    assert!(
        check_content_type(&registry, &r.site, r.root, image)
            .unwrap_err()
            .is_invalid()
    );

    let err = check_content_type(&registry, &r.site, r.untyped, news).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidContainerType { .. }));
}
