//! Property-based tests for the codec laws

use proptest::prelude::*;
use std::collections::BTreeMap;
use treepix::codec::{literal, padding, raster};
use treepix::tree::{DirectoryNode, FileNode, Node};

fn name_strategy() -> impl Strategy<Value = String> {
    // Never "." or "..", never a separator
    "[a-z0-9_][a-z0-9_. -]{0,7}"
}

fn file_strategy(content_char: BoxedStrategy<char>) -> impl Strategy<Value = FileNode> {
    let text = (
        name_strategy(),
        prop::collection::vec(content_char, 0..24),
    )
        .prop_map(|(name, chars)| FileNode::text(name, chars.into_iter().collect::<String>()));
    let binary = (name_strategy(), prop::collection::vec(any::<u8>(), 0..32))
        .prop_map(|(name, bytes)| FileNode::binary(name, &bytes));
    prop_oneof![text, binary]
}

fn tree_strategy(content_char: BoxedStrategy<char>) -> impl Strategy<Value = Node> {
    let leaf = file_strategy(content_char).prop_map(Node::File);
    leaf.prop_recursive(4, 24, 5, |inner| {
        (
            name_strategy(),
            prop::collection::btree_map(name_strategy(), inner, 0..5),
        )
            .prop_map(|(name, children): (String, BTreeMap<String, Node>)| {
                let mut dir = DirectoryNode::new(name);
                for (child_name, child) in children {
                    let child = rename(child, child_name);
                    // btree_map keys are unique, so insert cannot collide
                    let _ = dir.insert(child);
                }
                Node::Directory(dir)
            })
    })
}

/// Give a generated node the map key it was stored under
fn rename(node: Node, name: String) -> Node {
    match node {
        Node::File(file) => {
            let renamed = if file.is_binary() {
                FileNode::from_base64(name, file.content().to_string()).unwrap()
            } else {
                FileNode::text(name, file.content().to_string())
            };
            Node::File(renamed)
        }
        Node::Directory(dir) => {
            let mut renamed = DirectoryNode::new(name);
            for child in dir.children() {
                let _ = renamed.insert(child.clone());
            }
            Node::Directory(renamed)
        }
    }
}

fn any_char_but_nul() -> BoxedStrategy<char> {
    any::<char>().prop_filter("NUL is padding", |c| *c != '\0').boxed()
}

fn latin1_char_but_nul() -> BoxedStrategy<char> {
    (1u8..=255).prop_map(char::from).boxed()
}

/// pad(s) is the shortest perfect-square extension of s
#[test]
fn test_padding_law() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<String>(), |text| {
            let len = text.chars().count();
            let padded = padding::pad(&text);
            let padded_len = padded.chars().count();

            prop_assert!(padded.starts_with(&text));
            prop_assert!(padding::is_perfect_square(padded_len));
            prop_assert!(padded_len >= len);
            let side = padding::isqrt(padded_len);
            if side > 0 {
                prop_assert!((side - 1) * (side - 1) < len);
            }
            prop_assert!(padded[text.len()..].chars().all(|c| c == padding::SENTINEL));
            Ok(())
        })
        .unwrap();
}

/// decode(encode(t)) == t for square-length Latin-1 text
#[test]
fn test_square_grid_law() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let strategy = (1usize..24).prop_flat_map(|side| {
        prop::collection::vec(any::<u8>(), side * side)
            .prop_map(|bytes| bytes.into_iter().map(char::from).collect::<String>())
    });

    runner
        .run(&strategy, |text| {
            let grid = raster::encode(&text).unwrap();
            prop_assert_eq!(grid.side() * grid.side(), text.chars().count());
            prop_assert_eq!(raster::decode(&grid), text);
            Ok(())
        })
        .unwrap();
}

/// parse(serialize(t)) == t for any NUL-free tree
#[test]
fn test_literal_roundtrip() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&tree_strategy(any_char_but_nul()), |tree| {
            let text = literal::serialize(&tree);
            prop_assert_eq!(literal::parse(&text).unwrap(), tree);
            Ok(())
        })
        .unwrap();
}

/// The whole in-memory chain is the identity on Latin-1 trees
#[test]
fn test_codec_chain_roundtrip() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&tree_strategy(latin1_char_but_nul()), |tree| {
            let padded = padding::pad(&literal::serialize(&tree));
            let grid = raster::encode(&padded).unwrap();
            let text = padding::unpad(&raster::decode(&grid));
            prop_assert_eq!(literal::parse(&text).unwrap(), tree);
            Ok(())
        })
        .unwrap();
}
