//! Bundle generation, files on disk, and index recovery.

use std::fs;
use std::path::Path;

use skillsearch::loader::{
    generate_bundle, load_bundle, read_bundle, write_bundle, Bundle, BundleOptions, BundleStats,
    VendorDocDirs, BUNDLE_FILE, STATS_FILE,
};
use skillsearch::{Error, SearchOptions};

use crate::common::{write, write_guides, write_plugin, ANNOTATIONS};

fn bundle_options(root: &Path) -> BundleOptions {
    BundleOptions {
        annotations: Some(root.join("skill-annotations.json")),
        vendor_docs: VendorDocDirs {
            guides: Some(root.join("guides")),
            diagnostics: None,
        },
    }
}

fn full_plugin(root: &Path) -> Bundle {
    write_plugin(root);
    write_guides(&root.join("guides"));
    write(&root.join("skill-annotations.json"), ANNOTATIONS);
    generate_bundle(root, &bundle_options(root)).unwrap()
}

#[test]
fn generated_bundle_carries_everything() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = full_plugin(dir.path());

    assert_eq!(bundle.version, env!("CARGO_PKG_VERSION"));
    assert!(chrono::DateTime::parse_from_rfc3339(&bundle.generated_at).is_ok());
    assert_eq!(bundle.skills.len(), 5);
    assert_eq!(bundle.commands.len(), 1);
    assert_eq!(bundle.agents.len(), 1);
    assert!(bundle.search_index.is_some());

    let catalog = bundle.catalog.as_ref().unwrap();
    assert_eq!(catalog.categories["UI & Design"].skills.len(), 3);
    assert_eq!(catalog.total_skills, 4);
}

#[test]
fn annotations_override_frontmatter() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = full_plugin(dir.path());

    let concurrency = &bundle.skills["axiom-swift-concurrency"];
    assert_eq!(concurrency.category.as_deref(), Some("concurrency"));
    assert_eq!(concurrency.tags, vec!["actors", "isolation"]);
    assert!(!bundle.skills.contains_key("axiom-not-a-skill"));
}

#[test]
fn missing_annotations_file_is_fine() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    let options = BundleOptions {
        annotations: Some(dir.path().join("nope.json")),
        vendor_docs: VendorDocDirs::default(),
    };

    let bundle = generate_bundle(dir.path(), &options).unwrap();
    assert_eq!(bundle.skills.len(), 4);
}

#[test]
fn malformed_annotations_fail_the_build() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    write(&dir.path().join("skill-annotations.json"), "{ not json");

    let options = BundleOptions {
        annotations: Some(dir.path().join("skill-annotations.json")),
        vendor_docs: VendorDocDirs::default(),
    };
    assert!(generate_bundle(dir.path(), &options).is_err());
}

#[test]
fn written_files_and_stats_agree() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = full_plugin(dir.path());
    let out = dir.path().join("dist");

    let (path, stats) = write_bundle(&bundle, &out).unwrap();
    assert_eq!(path, out.join(BUNDLE_FILE));

    let on_disk: BundleStats =
        serde_json::from_str(&fs::read_to_string(out.join(STATS_FILE)).unwrap()).unwrap();
    assert_eq!(on_disk, stats);
    assert_eq!(stats.skills.count, 5);
    assert_eq!(
        stats.total_bytes,
        stats.skills.bytes + stats.commands.bytes + stats.agents.bytes + stats.search_index.bytes
    );

    assert_eq!(read_bundle(&path).unwrap(), bundle);
}

#[test]
fn bundled_index_is_used_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = full_plugin(dir.path());
    let (path, _) = write_bundle(&bundle, &dir.path().join("dist")).unwrap();

    let (contents, index) = load_bundle(&path).unwrap();
    assert_eq!(contents.skills.len(), 5);
    assert_eq!(index.doc_count(), 4);

    let results = skillsearch::search(&index, "toolbar", &SearchOptions::default(), None);
    assert_eq!(results[0].name, "apple-guide-swiftui-toolbar");
}

#[test]
fn unversioned_index_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = full_plugin(dir.path());
    let (path, _) = write_bundle(&bundle, &dir.path().join("dist")).unwrap();
    let (_, expected) = load_bundle(&path).unwrap();

    let mut value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    value["searchIndex"]["engine"]
        .as_object_mut()
        .unwrap()
        .remove("serializationVersion");
    fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let (_, rebuilt) = load_bundle(&path).unwrap();
    assert_eq!(rebuilt, expected);
}

#[test]
fn bundle_without_index_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut bundle = full_plugin(dir.path());
    bundle.search_index = None;
    bundle.catalog = None;
    let (path, stats) = write_bundle(&bundle, &dir.path().join("dist")).unwrap();

    assert_eq!(stats.search_index.bytes, 0);
    let (_, index) = load_bundle(&path).unwrap();
    assert_eq!(index.doc_count(), 4);
}

#[test]
fn non_bundle_json_is_a_bundle_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    write(&path, "[1, 2, 3]");

    assert!(matches!(read_bundle(&path), Err(Error::Bundle(_))));
    assert!(read_bundle(&dir.path().join("absent.json")).is_err());
}
