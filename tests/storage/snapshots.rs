//! Integration tests for site snapshots
//!
//! Tests that orders and structure survive a MessagePack round trip.

use trellis_foundation::{ContainerId, ErrorKind};
use trellis_storage::{Content, Marker, Site, SiteConfig};

fn names(site: &mut Site, id: ContainerId) -> Vec<String> {
    site.order(id).unwrap().keys().map(str::to_owned).collect()
}

fn sample() -> (Site, ContainerId) {
    let mut site = Site::with_config(SiteConfig::rooted("site"));
    let root = site.root();
    for name in ["a", "b", "c"] {
        site.insert(root, name, Content::new("document")).unwrap();
    }
    let docs = site
        .create_folder(root, "docs", Content::new("folder"), &[Marker::OrderAware])
        .unwrap();
    for name in ["x", "y", "z"] {
        site.insert(docs, name, Content::new("document")).unwrap();
    }
    site.order(root).unwrap().move_bottom(&["a"]);
    site.order(docs).unwrap().update_order(&["z", "x", "y"]).unwrap();
    (site, docs)
}

#[test]
fn snapshot_roundtrip_keeps_orders() {
    let (site, docs) = sample();
    let mut loaded = Site::from_snapshot(&site.to_snapshot().unwrap()).unwrap();
    let root = loaded.root();

    assert_eq!(names(&mut loaded, root), vec!["b", "c", "docs", "a"]);
    assert_eq!(names(&mut loaded, docs), vec!["z", "x", "y"]);
}

#[test]
fn loaded_site_continues_ids() {
    let (site, docs) = sample();
    let mut loaded = Site::from_snapshot(&site.to_snapshot().unwrap()).unwrap();
    let root = loaded.root();

    let fresh = loaded
        .create_folder(root, "more", Content::new("folder"), &[])
        .unwrap();
    assert_ne!(fresh, docs);
    assert_ne!(fresh, root);
}

#[test]
fn loaded_site_self_heals() {
    let (site, docs) = sample();
    let mut loaded = Site::from_snapshot(&site.to_snapshot().unwrap()).unwrap();
    let root = loaded.root();

    loaded.relocate(docs, "x", root, "x").unwrap();

    assert_eq!(names(&mut loaded, root), vec!["b", "c", "docs", "a", "x"]);
    assert_eq!(names(&mut loaded, docs), vec!["z", "y"]);
}

#[test]
fn corrupt_snapshot_fails() {
    let (site, _) = sample();
    let bytes = site.to_snapshot().unwrap();

    let err = Site::from_snapshot(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Serialization(_)));
}
