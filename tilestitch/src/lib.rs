//! tilestitch - Reconstruct full-resolution images from tile servers
//!
//! A job takes an image id, resolves the image geometry from the server's
//! descriptor document, downloads every tile of the highest zoom level into
//! a resumable on-disk cache and stitches the tiles into one TIFF. Jobs can
//! be queued in a text file and processed in order.
//!
//! # High-Level API
//!
//! ```ignore
//! use tilestitch::config::ConfigFile;
//! use tilestitch::pipeline::{Pipeline, PipelineConfig};
//!
//! let config = ConfigFile::load()?;
//! let pipeline = Pipeline::with_reqwest(PipelineConfig::from_config_file(&config))?;
//! let outcome = pipeline.run("12345".parse()?).await?;
//! println!("wrote {}", outcome.assembly.output_path.display());
//! ```

pub mod assemble;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod grid;
pub mod job;
pub mod logging;
pub mod metadata;
pub mod pipeline;
pub mod provider;
pub mod queue;

/// Version of the tilestitch library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
