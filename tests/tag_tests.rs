//! Integration tests for tag and imply commands

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{init_with_files, stats, tagshelf_cmd};

#[test]
fn test_tag_positional_form() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["mountain.jpg"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["tag", "mountain.jpg", "hill", "county=germany"])
        .assert()
        .success();

    let output = stats(temp.path());
    assert!(output.contains("Tags:     2"));
    assert!(output.contains("Values:   1"));
    assert!(output.contains("Files:    1"));
    assert!(output.contains("Taggings: 2"));
}

#[test]
fn test_tag_with_tags_option_applies_to_every_file() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt", "b.txt"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["tag", "--tags", "draft year=2015", "a.txt", "b.txt"])
        .assert()
        .success();

    let output = stats(temp.path());
    assert!(output.contains("Files:    2"));
    assert!(output.contains("Taggings: 4"));
}

#[test]
fn test_tag_missing_file_fails_softly() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["here.txt"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["tag", "--tags", "draft", "gone.txt", "here.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no such file or directory"))
        .stderr(predicate::str::contains("Error:").not());

    assert!(stats(temp.path()).contains("Taggings: 1"));
}

#[test]
fn test_tag_reserved_value_is_rejected() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["tag", "a.txt", "op=and", "holiday"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value name 'and'"));

    let output = stats(temp.path());
    assert!(output.contains("Values:   0"));
    assert!(output.contains("Taggings: 1"));
}

#[test]
fn test_tag_without_auto_create_warns() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["config", "auto_create_tags", "false"])
        .assert()
        .success();

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["tag", "a.txt", "holiday"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no such tag 'holiday'"));
}

#[test]
fn test_tag_recursive_registers_directory_contents() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["photos/2015/beach.jpg", "photos/dune.jpg"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["tag", "--recursive", "photos", "holiday"])
        .assert()
        .success();

    // photos, photos/2015, photos/2015/beach.jpg, photos/dune.jpg
    let output = stats(temp.path());
    assert!(output.contains("Files:    4"));
    assert!(output.contains("Taggings: 4"));
}

#[test]
fn test_tag_requires_tags() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &["a.txt"]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["tag", "a.txt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("set of tags to apply must be specified"));
}

#[test]
fn test_imply_creates_rule() {
    let temp = TempDir::new().unwrap();
    init_with_files(temp.path(), &[]);

    tagshelf_cmd()
        .current_dir(temp.path())
        .args(["imply", "mp3", "music", "audio"])
        .assert()
        .success();

    assert!(stats(temp.path()).contains("Tags:     3"));
}
