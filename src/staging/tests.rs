//! Staging Module Tests
//!
//! Verifies staged-location uniqueness (repeated and concurrent calls),
//! copy fidelity and the failure path for missing bundles.

use crate::engine::bundle::{EngineBundle, DESCRIPTOR_FILE};
use crate::error::JobError;
use crate::runtime::distributor::ResourceDistributor;
use crate::staging::stager::ResourceStager;
use crate::staging::store::{copy_dir_all, SharedStore};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn make_bundle(dir: &Path) -> EngineBundle {
    fs::create_dir_all(dir.join("resources")).unwrap();
    fs::write(
        dir.join(DESCRIPTOR_FILE),
        r#"{"name": "mini", "annotators": []}"#,
    )
    .unwrap();
    fs::write(dir.join("resources/gazetteer.lst"), "london\nparis\n").unwrap();
    EngineBundle::open(dir).unwrap()
}

fn make_stager(shared_root: &Path) -> (ResourceStager, Arc<ResourceDistributor>) {
    let store = Arc::new(SharedStore::new(shared_root).unwrap());
    let distributor = Arc::new(ResourceDistributor::new());
    (
        ResourceStager::new(store, distributor.clone()),
        distributor,
    )
}

#[test]
fn test_repeated_staging_produces_distinct_locations() {
    let tmp = tempfile::tempdir().unwrap();
    let bundle = make_bundle(&tmp.path().join("app"));
    let (stager, _) = make_stager(&tmp.path().join("shared"));

    let mut seen = HashSet::new();
    for _ in 0..20 {
        let location = stager.stage(&bundle).unwrap();
        assert!(
            seen.insert(location.path().to_path_buf()),
            "staged location reused: {}",
            location.path().display()
        );
    }
}

#[test]
fn test_concurrent_staging_produces_distinct_locations() {
    let tmp = tempfile::tempdir().unwrap();
    let bundle = make_bundle(&tmp.path().join("app"));
    let shared = tmp.path().join("shared");

    let locations: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let bundle = bundle.clone();
                let shared = shared.clone();
                scope.spawn(move || {
                    let (stager, _) = make_stager(&shared);
                    stager.stage(&bundle).unwrap().path().to_path_buf()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let unique: HashSet<_> = locations.iter().collect();
    assert_eq!(unique.len(), locations.len());
}

#[test]
fn test_staged_copy_contains_bundle_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let bundle = make_bundle(&tmp.path().join("app"));
    let (stager, distributor) = make_stager(&tmp.path().join("shared"));

    let location = stager.stage(&bundle).unwrap();

    assert!(location.path().join(DESCRIPTOR_FILE).is_file());
    assert_eq!(
        fs::read_to_string(location.path().join("resources/gazetteer.lst")).unwrap(),
        "london\nparis\n"
    );
    // Registration side effect: the distributor knows about the copy.
    assert_eq!(distributor.registered(), 1);
}

#[test]
fn test_staging_missing_bundle_fails() {
    let result = EngineBundle::open("/does/not/exist");

    match result {
        Err(JobError::Staging { path, .. }) => {
            assert_eq!(path, Path::new("/does/not/exist"));
        }
        other => panic!("expected staging failure, got {:?}", other),
    }
}

#[test]
fn test_delete_removes_staged_copy() {
    let tmp = tempfile::tempdir().unwrap();
    let bundle = make_bundle(&tmp.path().join("app"));
    let store = Arc::new(SharedStore::new(tmp.path().join("shared")).unwrap());
    let stager = ResourceStager::new(store.clone(), Arc::new(ResourceDistributor::new()));

    let location = stager.stage(&bundle).unwrap();
    assert!(store.contains(&location));

    store.delete(&location).unwrap();
    assert!(!store.contains(&location));
}

#[test]
fn test_copy_dir_all_counts_files() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("a.txt"), "a").unwrap();
    fs::write(src.join("nested/b.txt"), "b").unwrap();

    let copied = copy_dir_all(&src, &tmp.path().join("dst")).unwrap();

    assert_eq!(copied, 2);
    assert!(tmp.path().join("dst/nested/b.txt").is_file());
}
