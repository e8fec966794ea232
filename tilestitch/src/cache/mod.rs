//! Tile cache and output layout
//!
//! Tiles are cached as files keyed by grid coordinate. The cache is never
//! pruned: a re-run of a job only downloads the tiles that are still missing.

mod path;
mod tile_cache;

pub use path::{
    assembled_path, job_directory, tile_filename, tiles_directory, OUTPUT_EXTENSION,
    TILE_EXTENSION,
};
pub use tile_cache::TileCache;
