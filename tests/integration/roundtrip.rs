//! End-to-end pack → PNG → unpack scenarios

use super::test_utils::{build_tree, snapshot};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use treepix::api::{self, pack_to_image, unpack_image};
use treepix::codec::ParserConfig;
use treepix::error::{ApiError, RasterError};
use treepix::tree::{Node, WalkerConfig};

/// Pack `root` into `<temp>/image.png`, unpack into `<temp>/out`, return the unpacked root
fn roundtrip(temp_dir: &TempDir, root: &Path) -> std::path::PathBuf {
    let image = temp_dir.path().join("image.png");
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    pack_to_image(root, &image, &WalkerConfig::default()).unwrap();
    unpack_image(&image, &out, &ParserConfig::default()).unwrap();
    out.join(root.file_name().unwrap())
}

#[test]
fn test_empty_directory_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    fs::create_dir(&root).unwrap();

    let unpacked = roundtrip(&temp_dir, &root);
    assert!(unpacked.is_dir());
    assert_eq!(fs::read_dir(&unpacked).unwrap().count(), 0);
}

#[test]
fn test_single_text_file_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    build_tree(&root, &[], &[("a.txt", b"hello")]);

    let unpacked = roundtrip(&temp_dir, &root);
    assert_eq!(fs::read(unpacked.join("a.txt")).unwrap(), b"hello");
}

#[test]
fn test_all_byte_values_roundtrip_as_binary() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    let bytes: Vec<u8> = (0..=255u8).collect();
    build_tree(&root, &[], &[("img.bin", &bytes)]);

    let packed = api::pack(&root, &WalkerConfig::default()).unwrap();
    let Node::Directory(dir) = &packed.root else {
        panic!("root should be a directory");
    };
    let Some(Node::File(file)) = dir.get("img.bin") else {
        panic!("img.bin should be a file");
    };
    assert!(file.is_binary());

    let unpacked = roundtrip(&temp_dir, &root);
    assert_eq!(fs::read(unpacked.join("img.bin")).unwrap(), bytes);
}

#[test]
fn test_nested_hierarchy_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    build_tree(
        &root,
        &["empty", "sub/also-empty"],
        &[
            ("sub/deep/file.txt", b"deep contents"),
            ("top.txt", b"top level"),
            ("sub/middle.md", b"# middle\n\nline two\r\n\ttabbed"),
            ("sub/deep/blank.txt", b""),
            ("latin1.txt", "caf\u{e9} \u{a9} \u{ff}".as_bytes()),
        ],
    );

    let unpacked = roundtrip(&temp_dir, &root);
    assert_eq!(snapshot(&unpacked), snapshot(&root));
}

#[test]
fn test_quotes_and_backslashes_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    build_tree(
        &root,
        &[],
        &[
            ("quotes.txt", br#"say "hi" and 'bye'"#),
            ("slashes.txt", br"C:\path\to\file \n not a newline"),
            ("it's {odd}.txt", b"name with quote and braces"),
        ],
    );

    let unpacked = roundtrip(&temp_dir, &root);
    assert_eq!(snapshot(&unpacked), snapshot(&root));
}

#[test]
fn test_nul_in_text_is_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    build_tree(&root, &[], &[("nul.txt", b"a\0b")]);

    let unpacked = roundtrip(&temp_dir, &root);
    assert_eq!(fs::read(unpacked.join("nul.txt")).unwrap(), b"ab");
}

#[test]
fn test_single_file_root_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("notes.txt");
    fs::write(&file, "just one file").unwrap();

    let unpacked = roundtrip(&temp_dir, &file);
    assert_eq!(fs::read_to_string(unpacked).unwrap(), "just one file");
}

#[test]
fn test_code_point_above_255_fails_without_image() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    build_tree(&root, &[], &[("snow.txt", "\u{2603}".as_bytes())]);
    let image = temp_dir.path().join("image.png");

    let err = pack_to_image(&root, &image, &WalkerConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        ApiError::RasterError(RasterError::OutOfRange {
            code_point: 0x2603,
            ..
        })
    ));
    assert!(!image.exists());
}

#[test]
fn test_unpack_into_missing_destination_fails() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    build_tree(&root, &[], &[("a.txt", b"hello")]);
    let image = temp_dir.path().join("image.png");
    pack_to_image(&root, &image, &WalkerConfig::default()).unwrap();

    let missing = temp_dir.path().join("missing");
    let err = unpack_image(&image, &missing, &ParserConfig::default()).unwrap_err();
    assert!(matches!(err, ApiError::StorageError(_)));
    assert!(!missing.exists());
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_fails_pack() {
    use treepix::error::StorageError;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    build_tree(&root, &["sub"], &[]);
    std::os::unix::fs::symlink(&root, root.join("sub").join("loop")).unwrap();

    let err = api::pack(&root, &WalkerConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        ApiError::StorageError(StorageError::SymlinkCycle(_))
    ));
}
