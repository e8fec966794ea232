//! Image server access
//!
//! The server publishes one descriptor document per image and one file per
//! tile, both addressed through [`Endpoint`]. Requests go through the
//! [`AsyncHttpClient`] trait so the network can be replaced in tests.

mod endpoint;
mod http;
mod types;

pub use endpoint::Endpoint;
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, RoutedMockClient};
