use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn tagshelf_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tagshelf").unwrap();
    cmd.env_remove("TAGSHELF_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialize a database in `root` and create the given (empty) files.
#[allow(dead_code)]
pub fn init_with_files(root: &Path, files: &[&str]) {
    tagshelf_cmd().arg("init").arg(root).assert().success();

    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }
}

/// Run `stats` in `root` and return its stdout.
#[allow(dead_code)]
pub fn stats(root: &Path) -> String {
    let output = tagshelf_cmd()
        .current_dir(root)
        .arg("stats")
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}
