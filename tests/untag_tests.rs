//! Integration tests for the untag command

#![allow(deprecated)]

use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

mod common;
use common::{init_with_files, stats, tagshelf_cmd};

fn tag(root: &Path, args: &[&str]) {
    tagshelf_cmd()
        .current_dir(root)
        .arg("tag")
        .args(args)
        .assert()
        .success();
}

#[test]
fn test_untag_removes_tagging_and_sweeps_value() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a/b.jpg"]);
    tag(temp.path(), &["a/b.jpg", "colour=red"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "a/b.jpg", "colour=red"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let output = stats(temp.path());
    assert!(output.contains("Taggings: 0"));
    assert!(output.contains("Values:   0"));
    assert!(output.contains("Tags:     1"));
}

#[test]
fn test_untag_keeps_value_used_elsewhere() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.jpg", "b.jpg"]);
    tag(temp.path(), &["--tags", "colour=red", "a.jpg", "b.jpg"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "a.jpg", "colour=red"])
        .assert()
        .success();

    let output = stats(temp.path());
    assert!(output.contains("Taggings: 1"));
    assert!(output.contains("Values:   1"));
}

#[test]
fn test_untag_valued_specifier_on_bare_tagging() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a/b.jpg", "c.jpg"]);
    tag(temp.path(), &["a/b.jpg", "height"]);
    // make sure the value exists so the miss is about the tagging
    tag(temp.path(), &["c.jpg", "height=200"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "a/b.jpg", "height", "height=200"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("file is not tagged 'height=200'"))
        .stderr(predicate::str::contains("implication").not())
        .stderr(predicate::str::contains("Error:").not());

    // the bare tagging went, c.jpg keeps its own
    assert!(stats(temp.path()).contains("Taggings: 1"));
}

#[test]
fn test_untag_implied_tag_is_refused() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["song.mp3"]);
    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["imply", "mp3", "music"])
        .assert()
        .success();
    tag(temp.path(), &["song.mp3", "mp3"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "song.mp3", "music"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "cannot remove 'music': delete the implication to remove this tag",
        ));

    assert!(stats(temp.path()).contains("Taggings: 1"));
}

#[test]
fn test_untag_implied_valued_tag_is_refused() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["photo.jpg"]);
    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["imply", "year=2015", "decade=2010s"])
        .assert()
        .success();
    tag(temp.path(), &["photo.jpg", "year=2015"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "photo.jpg", "decade=2010s"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "cannot remove 'decade=2010s': delete the implication to remove this tag",
        ));

    assert!(stats(temp.path()).contains("Taggings: 1"));
}

#[test]
fn test_untag_all_keeps_implication_rules() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.jpg", "b.jpg"]);
    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["imply", "year=2015", "decade=2010s"])
        .assert()
        .success();
    tag(temp.path(), &["a.jpg", "year=2015"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "--all", "a.jpg"])
        .assert()
        .success();

    // values named by the rule survive the sweep
    assert!(stats(temp.path()).contains("Values:   2"));

    tag(temp.path(), &["b.jpg", "year=2015"]);
    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "b.jpg", "decade=2010s"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("delete the implication"));
}

#[test]
fn test_untag_all_strips_every_tag() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt", "b.txt"]);
    tag(temp.path(), &["a.txt", "draft", "year=2015"]);
    tag(temp.path(), &["b.txt", "draft"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "--all", "a.txt"])
        .assert()
        .success();

    let output = stats(temp.path());
    assert!(output.contains("Taggings: 1"));
    assert!(output.contains("Values:   0"));
}

#[test]
fn test_untag_all_recursive_covers_directory() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a/b.jpg", "ab.jpg"]);
    tag(temp.path(), &["--tags", "holiday", "a", "a/b.jpg", "ab.jpg"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "--all", "--recursive", "a"])
        .assert()
        .success();

    // only ab.jpg, which is not below a/, keeps its tag
    assert!(stats(temp.path()).contains("Taggings: 1"));
}

#[test]
fn test_untag_unknown_file_continues_with_the_rest() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["b.jpg"]);
    tag(temp.path(), &["b.jpg", "holiday"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "--all", "missing.jpg", "b.jpg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.jpg: file is not tagged"));

    assert!(stats(temp.path()).contains("Taggings: 0"));
}

#[test]
fn test_untag_with_tags_option() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt", "b.txt"]);
    tag(temp.path(), &["--tags", "draft review", "a.txt", "b.txt"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "--tags", "draft", "a.txt", "b.txt"])
        .assert()
        .success();

    assert!(stats(temp.path()).contains("Taggings: 2"));
}

#[test]
fn test_untag_unknown_tag_and_value() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt"]);
    tag(temp.path(), &["a.txt", "colour=red", "draft"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "a.txt", "nosuch", "colour=mauve", "draft"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no such tag 'nosuch'"))
        .stderr(predicate::str::contains("no such value 'mauve'"));

    assert!(stats(temp.path()).contains("Taggings: 1"));
}

#[test]
fn test_untag_without_tags_is_usage_error() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["untag", "a.txt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("set of tags to remove must be specified"));
}

#[test]
fn test_untag_verbose_logs_progress() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt"]);
    tag(temp.path(), &["a.txt", "draft"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["-v", "untag", "--all", "a.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("removing all tags"));
}
