//! Filesystem Tree
//!
//! In-memory model of a file or directory subtree, plus the reader that builds it from disk
//! and the writer that materializes it again.

pub mod node;
pub mod path;
pub mod reader;
pub mod walker;
pub mod writer;

pub use node::{DirectoryNode, FileNode, Node};
pub use reader::TreeReader;
pub use walker::WalkerConfig;
pub use writer::{TreeWriter, WriteSummary};
