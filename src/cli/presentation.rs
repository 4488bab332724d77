//! CLI presentation: text and json formatters for pack, unpack and inspect results.

use crate::api::PackSummary;
use crate::error::ApiError;
use crate::tree::{Node, WriteSummary};
use serde_json::{json, Value};
use std::path::Path;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn format_pack_summary(
    summary: &PackSummary,
    image: &Path,
    json: bool,
) -> Result<String, ApiError> {
    if json {
        let mut value = serde_json::to_value(summary)?;
        value["image"] = json!(image.display().to_string());
        return to_json(&value);
    }
    Ok(format!(
        "Packed {} into {}\n  Files: {}\n  Directories: {}\n  Literal length: {}\n  Padding: {}\n  Image: {}x{}",
        summary.root,
        image.display(),
        summary.files,
        summary.directories,
        summary.literal_len,
        summary.padding,
        summary.side,
        summary.side
    ))
}

pub fn format_write_summary(
    summary: &WriteSummary,
    dest: &Path,
    json: bool,
) -> Result<String, ApiError> {
    if json {
        return to_json(summary);
    }
    Ok(format!(
        "Unpacked into {}\n  Files: {}\n  Directories: {}\n  Bytes written: {}",
        dest.display(),
        summary.files,
        summary.directories,
        summary.bytes
    ))
}

/// Indented listing, directories suffixed with `/`
pub fn format_tree_text(root: &Node) -> Result<String, ApiError> {
    let mut lines = Vec::new();
    push_lines(root, 0, &mut lines)?;
    Ok(lines.join("\n"))
}

fn push_lines(node: &Node, depth: usize, lines: &mut Vec<String>) -> Result<(), ApiError> {
    let indent = "  ".repeat(depth);
    match node {
        Node::File(file) => {
            let size = file.to_bytes()?.len();
            let kind = if file.is_binary() { ", binary" } else { "" };
            lines.push(format!("{}{} ({} bytes{})", indent, file.name(), size, kind));
        }
        Node::Directory(dir) => {
            lines.push(format!("{}{}/", indent, dir.name()));
            for child in dir.children() {
                push_lines(child, depth + 1, lines)?;
            }
        }
    }
    Ok(())
}

pub fn format_tree_json(root: &Node) -> Result<String, ApiError> {
    to_json(&tree_value(root)?)
}

fn tree_value(node: &Node) -> Result<Value, ApiError> {
    match node {
        Node::File(file) => Ok(json!({
            "type": "file",
            "name": file.name(),
            "binary": file.is_binary(),
            "size": file.to_bytes()?.len(),
        })),
        Node::Directory(dir) => {
            let children = dir
                .children()
                .iter()
                .map(tree_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(json!({
                "type": "directory",
                "name": dir.name(),
                "children": children,
            }))
        }
    }
}
