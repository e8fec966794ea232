//! Metadata resolution
//!
//! Turns a job id into [`ImageMetadata`](crate::grid::ImageMetadata) by
//! downloading the image's descriptor document and reading the `maxWidth`,
//! `maxHeight` and `tileSize` fields.

mod descriptor;
mod error;
mod resolver;

pub use descriptor::{find_leaf_text, parse_descriptor, FIELD_HEIGHT, FIELD_TILE_SIZE, FIELD_WIDTH};
pub use error::MetadataError;
pub use resolver::MetadataResolver;
