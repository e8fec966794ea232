//! Descriptor document parsing.
//!
//! The descriptor is an XML document whose exact schema is not relied upon:
//! the three geometry fields are found by element local name at any depth.

use roxmltree::{Document, Node};

use super::error::MetadataError;
use crate::grid::ImageMetadata;

/// Element holding the full-resolution width.
pub const FIELD_WIDTH: &str = "maxWidth";
/// Element holding the full-resolution height.
pub const FIELD_HEIGHT: &str = "maxHeight";
/// Element holding the tile edge length.
pub const FIELD_TILE_SIZE: &str = "tileSize";

/// Finds the text of the first element named `name`.
///
/// Traversal is a depth-first walk with an explicit stack seeded with the
/// root element. Children are pushed in document order and popped from the
/// back, so the walk visits later siblings first. When several elements share
/// `name`, the first one popped wins, which is not necessarily the first one
/// in document order.
///
/// The value is the concatenation of the element's direct text children.
pub fn find_leaf_text<'a, 'input>(root: Node<'a, 'input>, name: &str) -> Option<String> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_element() && node.tag_name().name() == name {
            return Some(
                node.children()
                    .filter(|child| child.is_text())
                    .filter_map(|child| child.text())
                    .collect(),
            );
        }
        stack.extend(node.children());
    }
    None
}

/// Parses geometry out of a descriptor document.
pub fn parse_descriptor(text: &str) -> Result<ImageMetadata, MetadataError> {
    let document = Document::parse(text)?;
    let root = document.root_element();

    let width = required_u32(root, FIELD_WIDTH)?;
    let height = required_u32(root, FIELD_HEIGHT)?;
    let tile_size = required_u32(root, FIELD_TILE_SIZE)?;

    Ok(ImageMetadata::new(width, height, tile_size)?)
}

fn required_u32(root: Node<'_, '_>, field: &'static str) -> Result<u32, MetadataError> {
    let value = find_leaf_text(root, field).ok_or(MetadataError::MissingField(field))?;
    match value.trim().parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(MetadataError::InvalidField {
            field,
            value: value.trim().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridError;

    const KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://earth.google.com/kml/2.1">
  <Document>
    <name>Sample</name>
    <PhotoOverlay>
      <ImagePyramid>
        <tileSize>256</tileSize>
        <maxWidth>10000</maxWidth>
        <maxHeight>8000</maxHeight>
        <gridOrigin>upperLeft</gridOrigin>
      </ImagePyramid>
    </PhotoOverlay>
  </Document>
</kml>"#;

    fn lookup(xml: &str, name: &str) -> Option<String> {
        let document = Document::parse(xml).unwrap();
        find_leaf_text(document.root_element(), name)
    }

    #[test]
    fn test_parse_nested_namespaced_document() {
        let metadata = parse_descriptor(KML).unwrap();
        assert_eq!(metadata.width, 10000);
        assert_eq!(metadata.height, 8000);
        assert_eq!(metadata.tile_size, 256);
    }

    #[test]
    fn test_matches_root_element() {
        assert_eq!(lookup("<tileSize>64</tileSize>", "tileSize").as_deref(), Some("64"));
    }

    #[test]
    fn test_duplicate_names_later_sibling_subtree_wins() {
        let xml = "<a><b><tileSize>1</tileSize></b><c><tileSize>2</tileSize></c></a>";
        assert_eq!(lookup(xml, "tileSize").as_deref(), Some("2"));
    }

    #[test]
    fn test_duplicate_names_deeper_later_beats_shallow_earlier() {
        let xml = "<a><tileSize>1</tileSize><b><tileSize>2</tileSize></b></a>";
        assert_eq!(lookup(xml, "tileSize").as_deref(), Some("2"));
    }

    #[test]
    fn test_duplicate_names_shallow_later_beats_deep_earlier() {
        let xml = "<a><b><tileSize>2</tileSize></b><tileSize>1</tileSize></a>";
        assert_eq!(lookup(xml, "tileSize").as_deref(), Some("1"));
    }

    #[test]
    fn test_only_direct_text_is_collected() {
        let xml = "<a><tileSize>12<x>99</x>8</tileSize></a>";
        assert_eq!(lookup(xml, "tileSize").as_deref(), Some("128"));
    }

    #[test]
    fn test_whitespace_around_value_is_accepted() {
        let xml = "<a><maxWidth>\n  300 </maxWidth><maxHeight>200</maxHeight><tileSize>100</tileSize></a>";
        assert_eq!(parse_descriptor(xml).unwrap().width, 300);
    }

    #[test]
    fn test_missing_field() {
        let xml = "<a><maxWidth>300</maxWidth><tileSize>100</tileSize></a>";
        let err = parse_descriptor(xml).unwrap_err();
        assert!(matches!(err, MetadataError::MissingField("maxHeight")));
    }

    #[test]
    fn test_non_numeric_field() {
        let xml = "<a><maxWidth>wide</maxWidth><maxHeight>200</maxHeight><tileSize>100</tileSize></a>";
        let err = parse_descriptor(xml).unwrap_err();
        match err {
            MetadataError::InvalidField { field, value } => {
                assert_eq!(field, "maxWidth");
                assert_eq!(value, "wide");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let xml = "<a><maxWidth>300</maxWidth><maxHeight>200</maxHeight><tileSize>0</tileSize></a>";
        assert!(matches!(
            parse_descriptor(xml),
            Err(MetadataError::InvalidField { field: "tileSize", .. })
        ));
    }

    #[test]
    fn test_uncountable_grid_rejected() {
        let xml = "<a><maxWidth>4294967295</maxWidth><maxHeight>10</maxHeight><tileSize>1</tileSize></a>";
        assert!(matches!(
            parse_descriptor(xml),
            Err(MetadataError::Geometry(GridError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            parse_descriptor("<a><maxWidth>1</a>"),
            Err(MetadataError::Parse(_))
        ));
    }
}
