//! Deterministic URL scheme of the image server.

use crate::grid::TileCoordinate;
use crate::job::JobId;

/// Base address of an image server.
///
/// ```
/// use tilestitch::grid::TileCoordinate;
/// use tilestitch::job::JobId;
/// use tilestitch::provider::Endpoint;
///
/// let endpoint = Endpoint::new("http://tiles.example.com/");
/// let id = JobId::new(42).unwrap();
///
/// assert_eq!(endpoint.metadata_url(id), "http://tiles.example.com/items/42");
/// assert_eq!(
///     endpoint.tile_url(id, 6, TileCoordinate::new(3, 5)),
///     "http://tiles.example.com/tiles/42/6/3/5"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Creates an endpoint, dropping any trailing slashes from `base`.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// Returns the base address without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/items/{id}`
    pub fn metadata_url(&self, id: JobId) -> String {
        format!("{}/items/{}", self.base, id)
    }

    /// `{base}/tiles/{id}/{level}/{row}/{col}`
    pub fn tile_url(&self, id: JobId, level: u32, coord: TileCoordinate) -> String {
        format!(
            "{}/tiles/{}/{}/{}/{}",
            self.base, id, level, coord.row, coord.col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_removed() {
        assert_eq!(Endpoint::new("http://h//").base(), "http://h");
    }

    #[test]
    fn test_tile_url_uses_row_then_col() {
        let endpoint = Endpoint::new("http://h");
        let id = JobId::new(7).unwrap();
        assert_eq!(
            endpoint.tile_url(id, 2, TileCoordinate::new(10, 20)),
            "http://h/tiles/7/2/10/20"
        );
    }
}
