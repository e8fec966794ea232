//! Job commands - download, assemble, or both for a single image.

use tilestitch::assemble::AssemblyReport;
use tilestitch::fetch::FetchReport;
use tilestitch::grid::ImageMetadata;
use tilestitch::job::JobId;

use super::common::GlobalArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Image geometry entered by hand for the assemble command.
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
}

/// Resolve metadata and download every tile of `id`.
pub fn download(args: &GlobalArgs, id: JobId) -> Result<(), CliError> {
    let runner = CliRunner::new(args)?;
    runner.log_startup("download");
    let pipeline = runner.pipeline()?;

    let outcome = runner.block_on(pipeline.download(id))?;

    println!(
        "Image {}: {}x{} pixels, tile size {}, level {}",
        id,
        outcome.metadata.width,
        outcome.metadata.height,
        outcome.metadata.tile_size,
        outcome.grid.max_level
    );
    print_fetch(&outcome.fetch);
    Ok(())
}

/// Assemble the cached tiles of `id` without contacting the server.
pub fn assemble(args: &GlobalArgs, id: JobId, geometry: Geometry) -> Result<(), CliError> {
    let metadata = ImageMetadata::new(geometry.width, geometry.height, geometry.tile_size)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    let runner = CliRunner::new(args)?;
    runner.log_startup("assemble");
    let pipeline = runner.pipeline()?;

    let report = runner.block_on(pipeline.assemble(id, metadata))?;
    print_assembly(&report);
    Ok(())
}

/// Download and assemble `id`.
pub fn all(args: &GlobalArgs, id: JobId) -> Result<(), CliError> {
    let runner = CliRunner::new(args)?;
    runner.log_startup("all");
    let pipeline = runner.pipeline()?;

    let outcome = runner.block_on(pipeline.run(id))?;

    print_fetch(&outcome.fetch);
    print_assembly(&outcome.assembly);
    Ok(())
}

pub(crate) fn print_fetch(report: &FetchReport) {
    println!(
        "Tiles: {} total, {} cached, {} downloaded, {} failed ({:.1} KB in {:.1}s)",
        report.total,
        report.cached,
        report.downloaded,
        report.failed,
        report.bytes as f64 / 1024.0,
        report.elapsed.as_secs_f64()
    );
    if report.failed > 0 {
        println!("Run the command again to retry the failed tiles.");
    }
}

pub(crate) fn print_assembly(report: &AssemblyReport) {
    println!(
        "Assembled {}x{} image: {} tiles placed, {} missing, {} unreadable",
        report.width, report.height, report.placed, report.missing, report.corrupt
    );
    println!("Saved to {}", report.output_path.display());
}
