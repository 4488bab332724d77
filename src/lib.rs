//! treepix: Directory Trees as Grayscale Images
//!
//! Packs a file or directory into a square 8-bit grayscale PNG and unpacks it again.
//! The tree is serialized to a restricted literal, padded to a perfect square with
//! NUL characters, and each character becomes one pixel.

pub mod api;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod tree;
