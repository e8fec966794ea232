//! End-to-end job execution.
//!
//! A job is resolve → grid → fetch → assemble. Each stage is also exposed on
//! its own so callers can download without assembling, or assemble a cache
//! populated earlier.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use super::error::PipelineError;
use crate::assemble::{AssemblyReport, TileAssembler};
use crate::cache::TileCache;
use crate::config::{ConfigFile, DownloadConfig};
use crate::fetch::{FetchReport, TileFetcher};
use crate::grid::{grid_for, GridSpec, ImageMetadata};
use crate::job::{JobDescriptor, JobId};
use crate::metadata::MetadataResolver;
use crate::provider::{AsyncHttpClient, AsyncReqwestClient, Endpoint};
use crate::queue::JobRunner;

/// Settings shared by every job of a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Image server
    pub endpoint: Endpoint,
    /// Root of the per-job directories
    pub output_dir: PathBuf,
    /// Download tuning
    pub download: DownloadConfig,
}

impl PipelineConfig {
    /// Builds the pipeline settings from a loaded configuration file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            endpoint: Endpoint::new(config.server.base_url.clone()),
            output_dir: config.output.directory.clone(),
            download: config.download.to_download_config(),
        }
    }
}

/// Result of resolving and fetching a job.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOutcome {
    pub metadata: ImageMetadata,
    pub grid: GridSpec,
    pub fetch: FetchReport,
}

/// Result of a complete job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    pub id: JobId,
    pub metadata: ImageMetadata,
    pub grid: GridSpec,
    pub fetch: FetchReport,
    pub assembly: AssemblyReport,
}

/// Runs jobs against one server and output directory.
pub struct Pipeline<C> {
    config: PipelineConfig,
    resolver: MetadataResolver<C>,
    fetcher: TileFetcher<C>,
    assembler: TileAssembler,
}

impl Pipeline<AsyncReqwestClient> {
    /// Creates a pipeline backed by a reqwest client.
    pub fn with_reqwest(config: PipelineConfig) -> Result<Self, PipelineError> {
        let client = AsyncReqwestClient::with_timeout(config.download.timeout_secs())?;
        Ok(Self::new(Arc::new(client), config))
    }
}

impl<C: AsyncHttpClient + 'static> Pipeline<C> {
    /// Creates a pipeline sharing `client` between metadata and tile requests.
    pub fn new(client: Arc<C>, config: PipelineConfig) -> Self {
        Self {
            resolver: MetadataResolver::new(Arc::clone(&client)),
            fetcher: TileFetcher::new(client, config.download),
            assembler: TileAssembler::new(config.output_dir.clone()),
            config,
        }
    }

    /// Descriptor for `id` on this pipeline's server.
    pub fn job(&self, id: JobId) -> JobDescriptor {
        JobDescriptor::new(id, self.config.endpoint.clone())
    }

    /// Tile cache of `id`.
    pub fn tile_cache(&self, id: JobId) -> TileCache {
        TileCache::for_job(&self.config.output_dir, id)
    }

    /// Resolves the metadata of `id` and fetches its tiles.
    pub async fn download(&self, id: JobId) -> Result<DownloadOutcome, PipelineError> {
        let job = self.job(id);
        let metadata = self.resolver.resolve(&job).await?;
        let grid = grid_for(&metadata);

        let fetch = self
            .fetcher
            .fetch_all(&job, &grid, &self.tile_cache(id))
            .await?;
        if !fetch.is_complete() {
            warn!(
                job_id = %id,
                failed = fetch.failed,
                "Some tiles could not be fetched; run the job again to retry them"
            );
        }

        Ok(DownloadOutcome {
            metadata,
            grid,
            fetch,
        })
    }

    /// Assembles the cached tiles of `id` using known geometry.
    pub async fn assemble(
        &self,
        id: JobId,
        metadata: ImageMetadata,
    ) -> Result<AssemblyReport, PipelineError> {
        metadata.validate()?;
        let assembler = self.assembler.clone();
        let cache = self.tile_cache(id);

        let report = tokio::task::spawn_blocking(move || {
            assembler.assemble(id, &metadata, &cache)
        })
        .await??;

        Ok(report)
    }

    /// Runs the whole job: resolve, fetch, assemble.
    pub async fn run(&self, id: JobId) -> Result<JobOutcome, PipelineError> {
        info!(job_id = %id, "Starting job");

        let download = self.download(id).await?;
        let assembly = self.assemble(id, download.metadata).await?;

        info!(
            job_id = %id,
            downloaded = download.fetch.downloaded,
            cached = download.fetch.cached,
            failed = download.fetch.failed,
            placed = assembly.placed,
            missing = assembly.missing,
            output = %assembly.output_path.display(),
            "Job complete"
        );

        Ok(JobOutcome {
            id,
            metadata: download.metadata,
            grid: download.grid,
            fetch: download.fetch,
            assembly,
        })
    }
}

impl<C: AsyncHttpClient + 'static> JobRunner for Pipeline<C> {
    type Outcome = JobOutcome;
    type Error = PipelineError;

    async fn run_job(&self, id: JobId) -> Result<JobOutcome, PipelineError> {
        self.run(id).await
    }
}
