//! Integration tests for moving and copying content

use trellis_content::{ContentCopier, ContentMover, NameChooserConfig};
use trellis_foundation::{ContainerId, ErrorKind};
use trellis_storage::{Content, Marker, Site, SiteEvent};

use crate::fixtures::{registry, site};

struct Tree {
    site: Site,
    root: ContainerId,
    folder: ContainerId,
    newsroom: ContainerId,
}

fn tree() -> Tree {
    let mut site = site();
    let root = site.root();
    let folder = site
        .create_folder(
            root,
            "folder",
            Content::new("folder"),
            &[Marker::ContentContainer, Marker::OrderAware],
        )
        .unwrap();
    let newsroom = site
        .create_folder(
            root,
            "newsroom",
            Content::new("newsroom"),
            &[Marker::ContentContainer, Marker::OrderAware],
        )
        .unwrap();
    for name in ["intro", "guide"] {
        site.insert(root, name, Content::new("document")).unwrap();
    }
    site.insert(folder, "logo", Content::new("image")).unwrap();
    site.insert(newsroom, "story", Content::new("news")).unwrap();
    site.drain_events();
    Tree {
        site,
        root,
        folder,
        newsroom,
    }
}

fn order(site: &mut Site, id: ContainerId) -> Vec<String> {
    site.order(id).unwrap().keys().map(str::to_owned).collect()
}

// =============================================================================
// Moving
// =============================================================================

#[test]
fn move_between_folders() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();

    let mover = ContentMover::new(&registry, &config, t.root, "intro");
    assert_eq!(mover.move_to(&mut t.site, t.folder, None).unwrap(), "intro");

    assert_eq!(order(&mut t.site, t.root), vec!["folder", "newsroom", "guide"]);
    assert_eq!(order(&mut t.site, t.folder), vec!["logo", "intro"]);

    let events = t.site.drain_events();
    assert_eq!(events.len(), 1);
    let SiteEvent::Moved(moved) = &events[0] else {
        panic!("expected a move, got {}", events[0]);
    };
    assert_eq!(moved.origin(), Some((t.root, "intro")));
    assert_eq!(moved.destination(), Some((t.folder, "intro")));
}

#[test]
fn move_with_new_name() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();

    let mover = ContentMover::new(&registry, &config, t.root, "guide");
    assert_eq!(
        mover.move_to(&mut t.site, t.folder, Some("manual")).unwrap(),
        "manual"
    );
    assert!(t.site.child(t.folder, "manual").is_ok());
    assert!(t.site.child(t.root, "guide").is_err());
}

#[test]
fn move_refused_by_constraints() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();

    let logo = ContentMover::new(&registry, &config, t.folder, "logo");
    assert!(!logo.moveable_to(&t.site, t.root, None).unwrap());
    let err = logo.move_to(&mut t.site, t.root, None).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidContainerType { .. }));

    let intro = ContentMover::new(&registry, &config, t.root, "intro");
    assert!(!intro.moveable_to(&t.site, t.newsroom, None).unwrap());
    let err = intro.move_to(&mut t.site, t.newsroom, None).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidItemType { .. }));

    assert_eq!(order(&mut t.site, t.folder), vec!["logo"]);
    assert!(t.site.events().is_empty());
}

#[test]
fn move_folder_into_itself() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();
    let sub = t
        .site
        .create_folder(
            t.folder,
            "sub",
            Content::new("folder"),
            &[Marker::ContentContainer],
        )
        .unwrap();

    let mover = ContentMover::new(&registry, &config, t.root, "folder");
    let err = mover.move_to(&mut t.site, sub, None).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MoveIntoSelf(_)));
    assert_eq!(t.site.child(t.root, "folder").unwrap().folder(), Some(t.folder));
}

#[test]
fn moved_folders_keep_their_order() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();
    for name in ["b", "a"] {
        t.site.insert(t.folder, name, Content::new("document")).unwrap();
    }
    t.site.order(t.folder).unwrap().move_bottom(&["logo"]);
    let archive = t
        .site
        .create_folder(
            t.root,
            "archive",
            Content::new("folder"),
            &[Marker::ContentContainer, Marker::OrderAware],
        )
        .unwrap();

    ContentMover::new(&registry, &config, t.root, "folder")
        .move_to(&mut t.site, archive, None)
        .unwrap();

    let moved = t.site.child_folder(archive, "folder").unwrap();
    assert_eq!(moved, t.folder);
    assert_eq!(order(&mut t.site, moved), vec!["b", "a", "logo"]);
}

// =============================================================================
// Copying
// =============================================================================

#[test]
fn copy_into_same_container() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();

    let copier = ContentCopier::new(&registry, &config, t.newsroom, "story");
    assert_eq!(copier.copy_to(&mut t.site, t.newsroom, None).unwrap(), "story-2");
    assert_eq!(copier.copy_to(&mut t.site, t.newsroom, None).unwrap(), "story-3");

    assert_eq!(
        order(&mut t.site, t.newsroom),
        vec!["story", "story-2", "story-3"]
    );
}

#[test]
fn copy_refused_by_constraints() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();

    let copier = ContentCopier::new(&registry, &config, t.root, "intro");
    assert!(copier.copyable(&t.site).unwrap());
    assert!(!copier.copyable_to(&t.site, t.newsroom, None).unwrap());
    assert!(copier.copy_to(&mut t.site, t.newsroom, None).unwrap_err().is_invalid());
    assert_eq!(order(&mut t.site, t.newsroom), vec!["story"]);
}

#[test]
fn copy_emits_copied_then_added() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();

    ContentCopier::new(&registry, &config, t.root, "intro")
        .copy_to(&mut t.site, t.folder, Some("intro-copy"))
        .unwrap();

    let events = t.site.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        SiteEvent::Copied { target_name, .. } if target_name == "intro-copy"
    ));
    assert!(matches!(&events[1], SiteEvent::Moved(moved) if moved.is_addition()));
    assert!(t.site.child(t.root, "intro").is_ok());
}

#[test]
fn protected_content_is_not_copyable() {
    let registry = registry();
    let config = NameChooserConfig::default();
    let mut t = tree();
    t.site
        .insert(
            t.root,
            "front-page",
            Content::new("document").with_marker(Marker::RenameNotAllowed),
        )
        .unwrap();

    let copier = ContentCopier::new(&registry, &config, t.root, "front-page");
    assert!(!copier.copyable(&t.site).unwrap());

    let ghost = ContentCopier::new(&registry, &config, t.root, "ghost");
    assert!(ghost.copyable(&t.site).unwrap_err().is_not_found());
}
