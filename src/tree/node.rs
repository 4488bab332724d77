//! In-memory tree model: a node is either a file or a directory

use crate::error::StorageError;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::{Component, Path};

/// A filesystem entry captured in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(FileNode),
    Directory(DirectoryNode),
}

impl Node {
    /// Entry name (the key this node is stored under in its parent)
    pub fn name(&self) -> &str {
        match self {
            Node::File(file) => &file.name,
            Node::Directory(dir) => &dir.name,
        }
    }

    /// Count (files, directories) in this subtree, including the node itself.
    pub fn counts(&self) -> (usize, usize) {
        match self {
            Node::File(_) => (1, 0),
            Node::Directory(dir) => dir
                .children
                .iter()
                .map(Node::counts)
                .fold((0, 1), |(f, d), (cf, cd)| (f + cf, d + cd)),
        }
    }
}

/// A file with either UTF-8 text or base64-encoded binary content.
///
/// Fields are private so that `content` is always valid base64 when `is_binary` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    name: String,
    is_binary: bool,
    content: String,
}

impl FileNode {
    /// File holding UTF-8 text
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_binary: false,
            content: content.into(),
        }
    }

    /// File holding raw bytes, stored base64-encoded
    pub fn binary(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            is_binary: true,
            content: STANDARD.encode(bytes),
        }
    }

    /// File holding already-encoded base64 content; rejects invalid encodings.
    pub fn from_base64(
        name: impl Into<String>,
        encoded: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let name = name.into();
        let encoded = encoded.into();
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(|source| StorageError::InvalidBinaryContent {
                name: name.clone(),
                source,
            })?;
        Ok(Self {
            name,
            is_binary: true,
            content: encoded,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_binary(&self) -> bool {
        self.is_binary
    }

    /// Text content, or the base64 text for binary files
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Bytes to put on disk
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        if self.is_binary {
            STANDARD
                .decode(self.content.as_bytes())
                .map_err(|source| StorageError::InvalidBinaryContent {
                    name: self.name.clone(),
                    source,
                })
        } else {
            Ok(self.content.as_bytes().to_vec())
        }
    }
}

/// A directory whose children keep their enumeration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    name: String,
    children: Vec<Node>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a child. Names are unique per directory; a duplicate is handed back.
    pub fn insert(&mut self, child: Node) -> Result<(), Node> {
        if self.get(child.name()).is_some() {
            return Err(child);
        }
        self.children.push(child);
        Ok(())
    }

    /// Look up a direct child by name
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Children in insertion order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Whether `name` can be used as a single path component.
///
/// Rejects empty names, `.`/`..`, NUL, and anything the platform splits into more than one
/// component.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.contains('\0') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}
