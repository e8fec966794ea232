//! Grid type definitions

use thiserror::Error;

/// Errors raised for geometry that cannot be tiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Tile size of zero
    #[error("invalid input: tile size must be positive")]
    ZeroTileSize,
    /// Width or height of zero
    #[error("invalid input: image dimensions must be positive (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    /// Fetch grid has more columns or rows than a `u32` can count
    #[error("invalid input: {width}x{height} at tile size {tile_size} needs too many tiles per axis")]
    TooLarge {
        width: u32,
        height: u32,
        tile_size: u32,
    },
}

/// Tiles fetched along one axis: `ceil(dim / tile_size) + 1`.
pub(crate) fn fetch_count(dim: u32, tile_size: u32) -> Option<u32> {
    dim.div_ceil(tile_size).checked_add(1)
}

/// Full-image geometry as published by the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageMetadata {
    /// Full-resolution width in pixels
    pub width: u32,
    /// Full-resolution height in pixels
    pub height: u32,
    /// Edge length of one square tile in pixels
    pub tile_size: u32,
}

impl ImageMetadata {
    /// Creates validated metadata.
    pub fn new(width: u32, height: u32, tile_size: u32) -> Result<Self, GridError> {
        let metadata = Self {
            width,
            height,
            tile_size,
        };
        metadata.validate()?;
        Ok(metadata)
    }

    /// Checks that every field is positive and that the fetch grid can be
    /// counted in `u32` along both axes.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.tile_size == 0 {
            return Err(GridError::ZeroTileSize);
        }
        if self.width == 0 || self.height == 0 {
            return Err(GridError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if fetch_count(self.width, self.tile_size).is_none()
            || fetch_count(self.height, self.tile_size).is_none()
        {
            return Err(GridError::TooLarge {
                width: self.width,
                height: self.height,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }

    /// Cells visited when assembling: `floor(dim / tile_size) + 1` per axis.
    ///
    /// This is one row and one column smaller than the fetch grid whenever the
    /// dimension is not an exact multiple of the tile size. Never larger than
    /// the fetch grid, so validated metadata cannot saturate.
    pub fn assembly_cells(&self) -> GridCells {
        GridCells::new(
            (self.width / self.tile_size).saturating_add(1),
            (self.height / self.tile_size).saturating_add(1),
        )
    }
}

/// Derived tiling plan used for fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpec {
    /// Zoom level that holds the full-resolution tiles
    pub max_level: u32,
    /// Columns to fetch
    pub tile_counts_x: u32,
    /// Rows to fetch
    pub tile_counts_y: u32,
}

impl GridSpec {
    /// Number of tiles in the fetch grid.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.tile_counts_x) * u64::from(self.tile_counts_y)
    }

    /// Returns every fetch coordinate in row-major order.
    pub fn cells(&self) -> GridCells {
        GridCells::new(self.tile_counts_x, self.tile_counts_y)
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoordinate {
    /// Row index, 0 at the top
    pub row: u32,
    /// Column index, 0 at the left
    pub col: u32,
}

impl TileCoordinate {
    /// Creates a coordinate.
    #[inline]
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Pixel offset `(x, y)` of this cell's top-left corner.
    #[inline]
    pub fn pixel_offset(&self, tile_size: u32) -> (u64, u64) {
        (
            u64::from(self.col) * u64::from(tile_size),
            u64::from(self.row) * u64::from(tile_size),
        )
    }
}

/// Iterator over a `columns × rows` block of cells in row-major order.
#[derive(Debug, Clone)]
pub struct GridCells {
    columns: u32,
    rows: u32,
    current: u64,
}

impl GridCells {
    fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            current: 0,
        }
    }

    fn total(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }
}

impl Iterator for GridCells {
    type Item = TileCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.total() {
            return None;
        }
        let columns = u64::from(self.columns);
        let row = (self.current / columns) as u32;
        let col = (self.current % columns) as u32;
        self.current += 1;
        Some(TileCoordinate { row, col })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total() - self.current) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridCells {}
