//! Resumable on-disk tile cache.
//!
//! A tile counts as fetched exactly when its file exists. Files are written
//! to a temporary name and renamed into place, so an interrupted write never
//! leaves a file at the final path.
//!
//! The existence check and the write are not atomic together. Within one
//! fetch run every coordinate is owned by a single task, which makes this
//! safe; two fetch runs for the same job must not overlap.

use std::io;
use std::path::{Path, PathBuf};

use super::path::{tile_filename, tiles_directory};
use crate::grid::TileCoordinate;
use crate::job::JobId;

/// Extension used for tiles that are still being written.
const PARTIAL_EXTENSION: &str = "tmp";

/// The tile cache of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCache {
    directory: PathBuf,
}

impl TileCache {
    /// Cache rooted at an explicit directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Cache at `<output_dir>/<id>/tiles`.
    pub fn for_job(output_dir: &Path, id: JobId) -> Self {
        Self::new(tiles_directory(output_dir, id))
    }

    /// Directory holding the tile files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Final path of the tile at `coord`.
    pub fn tile_path(&self, coord: TileCoordinate) -> PathBuf {
        self.directory.join(tile_filename(coord))
    }

    /// Creates the cache directory if needed.
    pub async fn ensure_directory(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.directory).await
    }

    /// Returns true when the tile at `coord` is cached.
    ///
    /// Errors while probing the filesystem count as a miss.
    pub async fn contains(&self, coord: TileCoordinate) -> bool {
        tokio::fs::try_exists(self.tile_path(coord))
            .await
            .unwrap_or(false)
    }

    /// Stores tile bytes, replacing any partial write left by a previous run.
    pub async fn store(&self, coord: TileCoordinate, data: &[u8]) -> io::Result<()> {
        let path = self.tile_path(coord);
        let temp_path = path.with_extension(PARTIAL_EXTENSION);
        tokio::fs::write(&temp_path, data).await?;
        tokio::fs::rename(&temp_path, &path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_then_contains() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path().join("tiles"));
        cache.ensure_directory().await.unwrap();
        let coord = TileCoordinate::new(1, 2);

        assert!(!cache.contains(coord).await);
        cache.store(coord, &[1, 2, 3]).await.unwrap();

        assert!(cache.contains(coord).await);
        assert_eq!(std::fs::read(cache.tile_path(coord)).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_store_leaves_no_partial_files() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path());
        cache.store(TileCoordinate::new(0, 0), &[7]).await.unwrap();

        let partial: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == PARTIAL_EXTENSION))
            .collect();
        assert!(partial.is_empty(), "Temp files should not remain");
    }

    #[tokio::test]
    async fn test_partial_file_is_not_a_hit() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path());
        let coord = TileCoordinate::new(4, 4);
        std::fs::write(cache.tile_path(coord).with_extension(PARTIAL_EXTENSION), b"half").unwrap();

        assert!(!cache.contains(coord).await);
    }

    #[test]
    fn test_for_job_layout() {
        let cache = TileCache::for_job(Path::new("/data"), JobId::new(5).unwrap());
        assert_eq!(
            cache.tile_path(TileCoordinate::new(1, 10)),
            PathBuf::from("/data/5/tiles/0001-0010.png")
        );
    }
}
