//! Assembly of cached tiles into one full-resolution image.

mod assembler;
mod error;

pub use assembler::{AssemblyReport, TileAssembler};
pub use error::{AssembleError, TileDecodeError};
