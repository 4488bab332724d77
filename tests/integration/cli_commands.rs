//! Integration tests driving the treepix binary

use super::test_utils::{build_tree, snapshot};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary in `cwd` with HOME and XDG_CONFIG_HOME pointed into `cwd`
fn run(cwd: &Path, args: &[&str]) -> Output {
    let home = cwd.join(".home");
    fs::create_dir_all(&home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_treepix"))
        .current_dir(cwd)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("TREEPIX_LOG")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_pack_unpack_commands() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    build_tree(
        &cwd.join("root"),
        &["empty"],
        &[("a.txt", b"hello"), ("sub/b.bin", &[0, 159, 255])],
    );
    fs::create_dir(cwd.join("out")).unwrap();

    let pack = run(cwd, &["pack", "root", "-o", "tree.png"]);
    assert!(
        pack.status.success(),
        "pack failed: {}",
        String::from_utf8_lossy(&pack.stderr)
    );
    let stdout = String::from_utf8_lossy(&pack.stdout);
    assert!(stdout.contains("Files: 2"), "stdout: {}", stdout);
    assert!(cwd.join("tree.png").exists());

    let unpack = run(cwd, &["unpack", "tree.png", "out"]);
    assert!(
        unpack.status.success(),
        "unpack failed: {}",
        String::from_utf8_lossy(&unpack.stderr)
    );
    assert_eq!(snapshot(&cwd.join("out").join("root")), snapshot(&cwd.join("root")));
}

#[test]
fn test_pack_defaults_to_image_png() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    build_tree(&cwd.join("root"), &[], &[("a.txt", b"hello")]);

    let pack = run(cwd, &["pack", "root"]);
    assert!(pack.status.success());
    assert!(cwd.join("image.png").exists());
}

#[test]
fn test_inspect_json() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    build_tree(&cwd.join("root"), &[], &[("a.txt", b"hello")]);
    assert!(run(cwd, &["pack", "root"]).status.success());

    let inspect = run(cwd, &["inspect", "image.png", "--format", "json"]);
    assert!(inspect.status.success());
    let value: serde_json::Value = serde_json::from_slice(&inspect.stdout).unwrap();
    assert_eq!(value["name"], "root");
    assert_eq!(value["children"][0]["name"], "a.txt");
    assert_eq!(value["children"][0]["size"], 5);
}

#[test]
fn test_failure_is_one_line_with_exit_code_1() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();

    let output = run(cwd, &["pack", "does-not-exist"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.trim().lines().count(), 1, "stderr: {}", stderr);
    assert!(stderr.starts_with("error: "));
    assert!(!cwd.join("image.png").exists());
}

#[test]
fn test_non_grayscale_image_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    image::RgbImage::new(4, 4).save(cwd.join("rgb.png")).unwrap();

    let output = run(cwd, &["inspect", "rgb.png"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_logging_off_without_verbose() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    build_tree(&cwd.join("root"), &[], &[("a.txt", b"hello")]);

    let quiet = run(cwd, &["pack", "root"]);
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty());

    let verbose = run(cwd, &["--verbose", "pack", "root", "-o", "v.png"]);
    assert!(verbose.status.success());
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("Pack completed"), "stderr: {}", stderr);
}

#[test]
fn test_non_png_extension_roundtrips() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    build_tree(&cwd.join("root"), &[], &[("a.txt", b"hello")]);
    fs::create_dir(cwd.join("out")).unwrap();

    assert!(run(cwd, &["pack", "root", "-o", "tree.img"]).status.success());
    let unpack = run(cwd, &["unpack", "tree.img", "out"]);
    assert!(
        unpack.status.success(),
        "unpack failed: {}",
        String::from_utf8_lossy(&unpack.stderr)
    );
    assert_eq!(
        fs::read(cwd.join("out").join("root").join("a.txt")).unwrap(),
        b"hello"
    );
}
