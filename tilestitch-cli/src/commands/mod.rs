//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`job`] - Download, assemble, or both for one image
//! - [`queue`] - Add to, view and process the job queue
//! - [`init`] - Configuration initialization

pub mod common;
pub mod init;
pub mod job;
pub mod queue;
