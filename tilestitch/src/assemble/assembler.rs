//! Tile assembly onto a single canvas.
//!
//! The canvas is an RGB buffer the size of the full image, zero-filled so
//! missing tiles show as black. Every cell of the minimal covering grid is
//! visited in row-major order; cached tiles are decoded, clipped at the
//! right and bottom edges and copied in. Only allocation and the final
//! write are fatal.

use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader, RgbImage};
use tracing::{debug, info, warn};

use super::error::{AssembleError, TileDecodeError};
use crate::cache::{assembled_path, TileCache};
use crate::grid::{ImageMetadata, TileCoordinate};
use crate::job::JobId;

/// Bytes per RGB pixel.
const CHANNELS: usize = 3;

/// Summary of one assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Grid cells visited
    pub visited: u64,
    /// Tiles copied onto the canvas
    pub placed: u64,
    /// Cells with no cached tile
    pub missing: u64,
    /// Cached tiles that failed to decode
    pub corrupt: u64,
    /// Cells lying entirely outside the canvas
    pub outside: u64,
    /// Where the assembled image was written
    pub output_path: PathBuf,
}

/// Assembles cached tiles into `{output_dir}/{id}/{id}_assembled.tiff`.
#[derive(Debug, Clone)]
pub struct TileAssembler {
    output_dir: PathBuf,
}

impl TileAssembler {
    /// Creates an assembler writing below `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Builds the full image for `id` from `cache`.
    ///
    /// Blocking: decodes and encodes images synchronously. Run it on a
    /// blocking thread from async code.
    pub fn assemble(
        &self,
        id: JobId,
        metadata: &ImageMetadata,
        cache: &TileCache,
    ) -> Result<AssemblyReport, AssembleError> {
        let (width, height) = (metadata.width, metadata.height);
        info!(job_id = %id, width = width, height = height, "Assembling image");

        let mut canvas = allocate_canvas(width, height)?;
        let mut report = AssemblyReport {
            width,
            height,
            visited: 0,
            placed: 0,
            missing: 0,
            corrupt: 0,
            outside: 0,
            output_path: assembled_path(&self.output_dir, id),
        };

        for coord in metadata.assembly_cells() {
            report.visited += 1;

            let (x, y) = coord.pixel_offset(metadata.tile_size);
            if x >= u64::from(width) || y >= u64::from(height) {
                report.outside += 1;
                continue;
            }
            // Both offsets are below a u32 dimension here
            let (x, y) = (x as u32, y as u32);

            let path = cache.tile_path(coord);
            if !path.exists() {
                debug!(row = coord.row, col = coord.col, "Tile missing, leaving region empty");
                report.missing += 1;
                continue;
            }

            let tile = match decode_tile(coord, &path) {
                Ok(tile) => tile,
                Err(e) => {
                    warn!(row = coord.row, col = coord.col, error = %e, "Skipping undecodable tile");
                    report.corrupt += 1;
                    continue;
                }
            };

            let clip_width = tile.width().min(width - x);
            let clip_height = tile.height().min(height - y);
            if clip_width == 0 || clip_height == 0 {
                report.outside += 1;
                continue;
            }

            place_tile(&mut canvas, &tile, x, y, clip_width, clip_height);
            report.placed += 1;
        }

        write_canvas(&canvas, &report.output_path)?;

        info!(
            job_id = %id,
            placed = report.placed,
            missing = report.missing,
            corrupt = report.corrupt,
            path = %report.output_path.display(),
            "Assembly complete"
        );
        Ok(report)
    }
}

/// Allocates a zeroed canvas, reporting allocation failure instead of aborting.
fn allocate_canvas(width: u32, height: u32) -> Result<RgbImage, AssembleError> {
    let too_large = AssembleError::CanvasTooLarge { width, height };
    let len = match (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
    {
        Some(len) => len,
        None => return Err(too_large),
    };

    let mut buffer: Vec<u8> = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|source| AssembleError::Allocation {
            width,
            height,
            source,
        })?;
    buffer.resize(len, 0);

    RgbImage::from_raw(width, height, buffer).ok_or(too_large)
}

fn decode_tile(coord: TileCoordinate, path: &Path) -> Result<RgbImage, TileDecodeError> {
    let to_error = |source: image::ImageError| TileDecodeError {
        row: coord.row,
        col: coord.col,
        path: path.to_path_buf(),
        source,
    };

    // Servers do not always send the format the file name suggests
    let image = ImageReader::open(path)
        .map_err(|e| to_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| to_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(to_error)?;

    Ok(image.to_rgb8())
}

/// Copies the top-left `clip_width x clip_height` block of `tile` to `(x, y)`.
fn place_tile(
    canvas: &mut RgbImage,
    tile: &RgbImage,
    x: u32,
    y: u32,
    clip_width: u32,
    clip_height: u32,
) {
    let canvas_stride = canvas.width() as usize * CHANNELS;
    let tile_stride = tile.width() as usize * CHANNELS;
    let row_bytes = clip_width as usize * CHANNELS;
    let x_bytes = x as usize * CHANNELS;

    let source = tile.as_raw();
    let target: &mut [u8] = canvas;
    for row in 0..clip_height as usize {
        let dst = (y as usize + row) * canvas_stride + x_bytes;
        let src = row * tile_stride;
        target[dst..dst + row_bytes].copy_from_slice(&source[src..src + row_bytes]);
    }
}

fn write_canvas(canvas: &RgbImage, path: &Path) -> Result<(), AssembleError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| AssembleError::OutputDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    canvas
        .save_with_format(path, ImageFormat::Tiff)
        .map_err(|source| AssembleError::Write {
            path: path.to_path_buf(),
            source,
        })
}
