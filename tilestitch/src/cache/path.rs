//! On-disk layout of a job.
//!
//! ```text
//! <output_dir>/<id>/tiles/<row:04>-<col:04>.png
//! <output_dir>/<id>/<id>_assembled.tiff
//! ```

use crate::grid::TileCoordinate;
use crate::job::JobId;
use std::path::{Path, PathBuf};

/// Extension of cached tile files.
pub const TILE_EXTENSION: &str = "png";

/// Extension of the assembled output raster.
pub const OUTPUT_EXTENSION: &str = "tiff";

/// Directory holding everything produced for one job.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use tilestitch::cache::job_directory;
/// use tilestitch::job::JobId;
///
/// let dir = job_directory(&PathBuf::from("/data"), JobId::new(42).unwrap());
/// assert_eq!(dir, PathBuf::from("/data/42"));
/// ```
pub fn job_directory(output_dir: &Path, id: JobId) -> PathBuf {
    output_dir.join(id.to_string())
}

/// Directory holding the cached tiles of one job.
pub fn tiles_directory(output_dir: &Path, id: JobId) -> PathBuf {
    job_directory(output_dir, id).join("tiles")
}

/// File name of one cached tile, zero-padded to four digits per axis.
///
/// # Example
///
/// ```
/// use tilestitch::cache::tile_filename;
/// use tilestitch::grid::TileCoordinate;
///
/// assert_eq!(tile_filename(TileCoordinate::new(3, 27)), "0003-0027.png");
/// ```
pub fn tile_filename(coord: TileCoordinate) -> String {
    format!("{:04}-{:04}.{}", coord.row, coord.col, TILE_EXTENSION)
}

/// Path of the assembled raster for one job.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use tilestitch::cache::assembled_path;
/// use tilestitch::job::JobId;
///
/// let path = assembled_path(&PathBuf::from("out"), JobId::new(42).unwrap());
/// assert_eq!(path, PathBuf::from("out/42/42_assembled.tiff"));
/// ```
pub fn assembled_path(output_dir: &Path, id: JobId) -> PathBuf {
    job_directory(output_dir, id).join(format!("{}_assembled.{}", id, OUTPUT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> JobId {
        JobId::new(n).unwrap()
    }

    #[test]
    fn test_tiles_directory() {
        assert_eq!(
            tiles_directory(Path::new("/data"), id(9)),
            PathBuf::from("/data/9/tiles")
        );
    }

    #[test]
    fn test_tile_filename_padding() {
        assert_eq!(tile_filename(TileCoordinate::new(0, 0)), "0000-0000.png");
        assert_eq!(tile_filename(TileCoordinate::new(12, 345)), "0012-0345.png");
    }

    #[test]
    fn test_tile_filename_wider_than_padding() {
        assert_eq!(
            tile_filename(TileCoordinate::new(12345, 1)),
            "12345-0001.png"
        );
    }

    #[test]
    fn test_assembled_path() {
        assert_eq!(
            assembled_path(Path::new("/data"), id(123)),
            PathBuf::from("/data/123/123_assembled.tiff")
        );
    }
}
