//! Tile grid calculation
//!
//! Maps full-image geometry to the set of tiles a server publishes for it.

mod types;

use types::fetch_count;

pub use types::{GridCells, GridError, GridSpec, ImageMetadata, TileCoordinate};

/// Computes the fetch grid for an image.
///
/// * `max_level = ceil(log2(max(width, height) / tile_size))`, clamped at 0
/// * `tile_counts_x = ceil(width / tile_size) + 1`
/// * `tile_counts_y = ceil(height / tile_size) + 1`
///
/// The extra row and column are always added, even when the dimension is an
/// exact multiple of the tile size. The level is found with integer
/// arithmetic: the smallest `k` with `tile_size * 2^k >= max(width, height)`.
pub fn compute_grid(width: u32, height: u32, tile_size: u32) -> Result<GridSpec, GridError> {
    let metadata = ImageMetadata::new(width, height, tile_size)?;
    Ok(grid_for(&metadata))
}

/// Computes the fetch grid for already-validated metadata.
///
/// Counts saturate at `u32::MAX` for metadata that skipped
/// [`ImageMetadata::validate`].
pub fn grid_for(metadata: &ImageMetadata) -> GridSpec {
    let tile = u64::from(metadata.tile_size);
    let longest = u64::from(metadata.width.max(metadata.height));

    let mut max_level = 0;
    while (tile << max_level) < longest {
        max_level += 1;
    }

    GridSpec {
        max_level,
        tile_counts_x: fetch_count(metadata.width, metadata.tile_size).unwrap_or(u32::MAX),
        tile_counts_y: fetch_count(metadata.height, metadata.tile_size).unwrap_or(u32::MAX),
    }
}
