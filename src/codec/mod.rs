//! Codec stages between a tree and an image
//!
//! serialize → pad → raster encode → PNG, and back.

pub mod image_store;
pub mod literal;
pub mod padding;
pub mod raster;

pub use literal::{LiteralParser, ParserConfig};
pub use raster::Grid;
