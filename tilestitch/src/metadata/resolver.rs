//! Resolves a job into image geometry over the network.

use std::sync::Arc;

use tracing::{debug, info};

use super::descriptor::parse_descriptor;
use super::error::MetadataError;
use crate::grid::ImageMetadata;
use crate::job::JobDescriptor;
use crate::provider::AsyncHttpClient;

/// Fetches and parses the descriptor document for a job.
pub struct MetadataResolver<C> {
    client: Arc<C>,
}

impl<C: AsyncHttpClient> MetadataResolver<C> {
    /// Creates a resolver sharing `client`.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Downloads `{base}/items/{id}` and extracts the image geometry.
    pub async fn resolve(&self, job: &JobDescriptor) -> Result<ImageMetadata, MetadataError> {
        let url = job.endpoint.metadata_url(job.id);
        debug!(job_id = %job.id, url = %url, "Fetching descriptor");

        let body = self
            .client
            .get(&url)
            .await
            .map_err(|source| MetadataError::Fetch {
                url: url.clone(),
                source,
            })?;

        let text = String::from_utf8(body)?;
        let metadata = parse_descriptor(&text)?;

        info!(
            job_id = %job.id,
            width = metadata.width,
            height = metadata.height,
            tile_size = metadata.tile_size,
            "Resolved image metadata"
        );

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobId;
    use crate::provider::{Endpoint, ProviderError, RoutedMockClient};

    fn job() -> JobDescriptor {
        JobDescriptor::new(JobId::new(42).unwrap(), Endpoint::new("http://server"))
    }

    #[tokio::test]
    async fn test_resolve_fetches_items_url() {
        let body = b"<r><maxWidth>640</maxWidth><maxHeight>480</maxHeight><tileSize>256</tileSize></r>";
        let client = Arc::new(RoutedMockClient::new().route("http://server/items/42", body.to_vec()));
        let resolver = MetadataResolver::new(Arc::clone(&client));

        let metadata = resolver.resolve(&job()).await.unwrap();

        assert_eq!(metadata, ImageMetadata::new(640, 480, 256).unwrap());
        assert_eq!(client.calls(), vec!["http://server/items/42"]);
    }

    #[tokio::test]
    async fn test_resolve_fetch_failure() {
        let client = Arc::new(RoutedMockClient::new().fail(
            "http://server/items/42",
            ProviderError::HttpError("timed out".to_string()),
        ));
        let resolver = MetadataResolver::new(client);

        let err = resolver.resolve(&job()).await.unwrap_err();
        assert!(matches!(err, MetadataError::Fetch { .. }));
        assert!(err.to_string().contains("http://server/items/42"));
    }

    #[tokio::test]
    async fn test_resolve_rejects_binary_body() {
        let client = Arc::new(RoutedMockClient::new().route("http://server/items/42", vec![0xff, 0xfe]));
        let resolver = MetadataResolver::new(client);

        assert!(matches!(
            resolver.resolve(&job()).await,
            Err(MetadataError::Encoding(_))
        ));
    }
}
