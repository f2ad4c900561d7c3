//! The live library: both sources, reloads, and readers during reloads.

use std::thread;

use skillsearch::loader::{generate_bundle, write_bundle, BundleOptions, LibrarySource, VendorDocDirs};
use skillsearch::{Config, Mode, SearchOptions, Settings, SkillLibrary};

use crate::common::{names, write, write_plugin};

fn plugin_source(root: &std::path::Path) -> LibrarySource {
    LibrarySource::Plugin {
        root: root.to_path_buf(),
        vendor_docs: VendorDocDirs::default(),
    }
}

#[test]
fn plugin_and_bundle_sources_agree() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    let bundle = generate_bundle(dir.path(), &BundleOptions::default()).unwrap();
    let (bundle_path, _) = write_bundle(&bundle, &dir.path().join("dist")).unwrap();

    let dev = SkillLibrary::open(plugin_source(dir.path())).unwrap();
    let prod = SkillLibrary::open(LibrarySource::Bundle(bundle_path)).unwrap();

    for query in ["navigation", "actor", "breakpoints", "swift"] {
        let options = SearchOptions::default();
        assert_eq!(dev.search(query, &options), prod.search(query, &options), "{query}");
    }
    assert_eq!(dev.catalog(None), prod.catalog(None));
    assert_eq!(dev.command("audit-build"), prod.command("audit-build"));
}

#[test]
fn config_opens_the_selected_source() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());

    let config = Config::resolve(Settings {
        mode: Mode::Development,
        dev_path: Some(dir.path().to_path_buf()),
        ..Settings::default()
    })
    .unwrap();
    let library = config.open_library().unwrap();
    assert_eq!(library.source(), &plugin_source(dir.path()));
    assert!(library.skill("axiom-swiftui-nav").is_some());

    let missing = Config::resolve(Settings {
        bundle_path: Some(dir.path().join("dist/bundle.json")),
        ..Settings::default()
    })
    .unwrap();
    assert!(missing.open_library().is_err());
}

#[test]
fn reload_sees_edits() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    let library = SkillLibrary::open(plugin_source(dir.path())).unwrap();
    assert!(library.search("keychain", &SearchOptions::default()).is_empty());

    write(
        &dir.path().join("skills/keychain/SKILL.md"),
        "---\nname: axiom-keychain\ndescription: Keychain storage\n---\n## Items\nStore secrets.",
    );
    library.reload().unwrap();

    let results = library.search("keychain", &SearchOptions::default());
    assert_eq!(names(&results), vec!["axiom-keychain"]);
}

#[test]
fn readers_never_see_a_half_built_state() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    let library = SkillLibrary::open(plugin_source(dir.path())).unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let snapshot = library.snapshot();
                    let results = snapshot.search("navigation", &SearchOptions::default());
                    assert_eq!(results[0].name, "axiom-swiftui-nav");
                    assert_eq!(snapshot.index.doc_count(), 3);
                }
            });
        }
        for _ in 0..10 {
            library.reload().unwrap();
        }
    });
}
