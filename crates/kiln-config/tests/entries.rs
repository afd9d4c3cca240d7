//! Tests for entry ordering and de-duplication.

use kiln_config::{ConfigError, EntryResolver};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, "// entry").expect("write file");
}

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

#[test]
fn glob_matches_sort_lexicographically_before_explicit_entries() {
    let dir = TempDir::new().expect("tempdir");
    // Created out of order on purpose
    touch(dir.path(), "vendor/b.js");
    touch(dir.path(), "vendor/a.js");
    touch(dir.path(), "js/app.js");
    touch(dir.path(), "js/admin.js");

    let set = EntryResolver::new(dir.path())
        .resolve("app", &["./vendor/**/*.js"], &["./js/app.js", "./js/admin.js"])
        .expect("resolve");

    assert_eq!(
        set.paths(),
        paths(&["vendor/a.js", "vendor/b.js", "./js/app.js", "./js/admin.js"])
    );
}

#[test]
fn recursive_glob_descends_into_subdirectories() {
    let dir = TempDir::new().expect("tempdir");
    touch(dir.path(), "vendor/z.js");
    touch(dir.path(), "vendor/lib/m.js");
    touch(dir.path(), "vendor/lib/deep/a.js");
    touch(dir.path(), "vendor/readme.md");

    let set = EntryResolver::new(dir.path())
        .resolve("app", &["./vendor/**/*.js"], &[])
        .expect("resolve");

    assert_eq!(
        set.paths(),
        paths(&["vendor/lib/deep/a.js", "vendor/lib/m.js", "vendor/z.js"])
    );
}

#[test]
fn patterns_expand_in_declared_order() {
    let dir = TempDir::new().expect("tempdir");
    touch(dir.path(), "a/1.js");
    touch(dir.path(), "z/1.js");

    let set = EntryResolver::new(dir.path())
        .resolve("app", &["z/*.js", "a/*.js"], &[])
        .expect("resolve");

    assert_eq!(set.paths(), paths(&["z/1.js", "a/1.js"]));
}

#[test]
fn glob_and_explicit_overlap_collapses_to_first_occurrence() {
    let dir = TempDir::new().expect("tempdir");
    touch(dir.path(), "js/app.js");
    touch(dir.path(), "js/util.js");

    let set = EntryResolver::new(dir.path())
        .resolve("app", &["./js/*.js"], &["./js/app.js"])
        .expect("resolve");

    assert_eq!(set.paths(), paths(&["js/app.js", "js/util.js"]));
}

#[test]
fn overlapping_globs_collapse() {
    let dir = TempDir::new().expect("tempdir");
    touch(dir.path(), "js/app.js");

    let set = EntryResolver::new(dir.path())
        .resolve("app", &["js/*.js", "js/**/*.js"], &["js/app.js"])
        .expect("resolve");

    assert_eq!(set.len(), 1);
}

#[test]
fn repeated_explicit_entries_collapse() {
    let dir = TempDir::new().expect("tempdir");
    touch(dir.path(), "js/app.js");

    let set = EntryResolver::new(dir.path())
        .resolve("app", &[], &["./js/app.js", "js/app.js"])
        .expect("resolve");

    assert_eq!(set.paths(), paths(&["./js/app.js"]));
}

#[test]
fn empty_glob_without_explicit_entries_fails() {
    let dir = TempDir::new().expect("tempdir");

    let err = EntryResolver::new(dir.path())
        .resolve("app", &["./vendor/**/*.js"], &[])
        .expect_err("should fail");

    match err {
        ConfigError::NoEntriesFound { name } => assert_eq!(name, "app"),
        other => panic!("expected NoEntriesFound, got {other:?}"),
    }
}

#[test]
fn empty_glob_with_explicit_entry_succeeds() {
    let dir = TempDir::new().expect("tempdir");
    touch(dir.path(), "js/app.js");

    let set = EntryResolver::new(dir.path())
        .resolve("app", &["./vendor/**/*.js"], &["./js/app.js"])
        .expect("resolve");

    assert_eq!(set.paths(), paths(&["./js/app.js"]));
}
