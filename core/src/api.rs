use crate::cleaning::sanitize_map;
use crate::error::Result;
use crate::extraction::tags::{TagCatalog, INSTRUMENT_TAG};
use crate::extraction::{decode_with_header, pairify, MetadataReconciler};
use crate::io::read_tiff_tags;
use crate::projection::FeatureProjector;
use crate::types::{FeatureRow, PipelineConfig, TagSet, UnitMode};
use log::{debug, info};
use serde_json::{Map, Value};
use std::path::Path;

/// Main extractor for SEM image metadata
///
/// Runs decode, reconcile and sanitize over the tags of one image. Each call
/// owns its record, so runs over different images are independent.
///
/// # Example
///
/// ```
/// use semmeta_core::{RawTagValue, SemMetadataExtractor, TagSet, FeatureValue};
///
/// let tags = TagSet::new()
///     .with(274, RawTagValue::List(vec![RawTagValue::Int(1)]))
///     .with(34118, RawTagValue::List(vec![RawTagValue::from(
///         "AP_WD = 5.2 mm\r\nColorMap: 1,2,3",
///     )]));
///
/// let metadata = SemMetadataExtractor::extract(&tags);
///
/// assert_eq!(metadata.raw["AP_WD"], "5.2 mm");
/// assert_eq!(metadata.raw["Orientation"], 1);
/// assert!(!metadata.raw.contains_key("ColorMap"));
///
/// let rows = metadata.features(&["AP_WD"]);
/// assert_eq!(rows[0].value, Some(FeatureValue::Number(5.2)));
/// assert_eq!(rows[0].unit, "mm");
/// ```
pub struct SemMetadataExtractor;

impl SemMetadataExtractor {
    /// Extracts metadata with the default configuration
    pub fn extract(tags: &TagSet) -> SemMetadata {
        Self::extract_with_config(tags, &PipelineConfig::default())
    }

    /// Extracts metadata with an explicit configuration
    pub fn extract_with_config(tags: &TagSet, config: &PipelineConfig) -> SemMetadata {
        let catalog = TagCatalog::standard();
        Self::extract_with_catalog(tags, &catalog, config)
    }

    /// Extracts metadata resolving names through a caller-owned catalog
    pub fn extract_with_catalog(
        tags: &TagSet,
        catalog: &TagCatalog,
        config: &PipelineConfig,
    ) -> SemMetadata {
        let tokens = decode_with_header(tags.get(INSTRUMENT_TAG), config.header_lines);
        let pairs = pairify(&tokens);
        debug!(
            "Instrument block: {} tokens, {} entries",
            tokens.len(),
            pairs.len()
        );

        let raw = MetadataReconciler::new(catalog)
            .with_exclusions(config.exclusions.iter().cloned())
            .reconcile(tags, &pairs);
        let cleaned = sanitize_map(&raw, config.profile);
        debug!(
            "Record: {} raw entries, {} after sanitizing",
            raw.len(),
            cleaned.len()
        );

        SemMetadata {
            raw,
            cleaned,
            instrument_entries: pairs.len(),
            unit_mode: config.unit_mode,
        }
    }

    /// Reads a TIFF file and extracts its metadata
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not a `.tif`/`.tiff`
    /// file, or cannot be parsed as TIFF.
    pub fn from_file(path: &Path, config: &PipelineConfig) -> Result<SemMetadata> {
        let catalog = TagCatalog::standard();
        let tags = read_tiff_tags(path, &catalog)?;
        info!("Read {} tags from {}", tags.len(), path.display());
        Ok(Self::extract_with_catalog(&tags, &catalog, config))
    }
}

/// Extracted SEM metadata
///
/// Holds the record at its two observable stages: `raw` before sanitizing
/// (absent tags as `null`) and `cleaned` after.
#[derive(Debug, Clone, PartialEq)]
pub struct SemMetadata {
    /// Unified record before sanitizing
    pub raw: Map<String, Value>,

    /// Unified record after sanitizing
    pub cleaned: Map<String, Value>,

    /// Number of entries decoded from the instrument block
    pub instrument_entries: usize,

    /// Unit mode used by [`SemMetadata::features`]
    pub unit_mode: UnitMode,
}

impl SemMetadata {
    /// Checks whether the image carried a usable instrument block
    pub fn has_instrument_block(&self) -> bool {
        self.instrument_entries > 0
    }

    /// Projects the cleaned record onto the given features
    pub fn features<S: AsRef<str>>(&self, names: &[S]) -> Vec<FeatureRow> {
        FeatureProjector::new(self.unit_mode).project(&self.cleaned, names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeatureValue, RawTagValue, SanitizeProfile};
    use serde_json::json;

    fn sample_tags() -> TagSet {
        TagSet::new()
            .with(274, RawTagValue::List(vec![RawTagValue::Int(1)]))
            .with(
                INSTRUMENT_TAG,
                RawTagValue::List(vec![RawTagValue::from("AP_WD = 5.2 mm\r\nColorMap: 1,2,3")]),
            )
    }

    #[test]
    fn test_end_to_end() {
        let metadata = SemMetadataExtractor::extract(&sample_tags());

        assert_eq!(metadata.raw["AP_WD"], json!("5.2 mm"));
        assert_eq!(metadata.raw["Orientation"], json!(1));
        assert!(!metadata.raw.contains_key("ColorMap"));
        assert!(metadata.has_instrument_block());

        // Only the present entries survive sanitizing, unchanged
        let mut expected = Map::new();
        expected.insert("AP_WD".to_string(), json!("5.2 mm"));
        expected.insert("Orientation".to_string(), json!(1));
        assert_eq!(metadata.cleaned, expected);

        let rows = metadata.features(&["AP_WD"]);
        assert_eq!(
            rows,
            vec![FeatureRow::new("AP_WD", Some(FeatureValue::Number(5.2)), "mm")]
        );
    }

    #[test]
    fn test_no_instrument_block() {
        let tags = TagSet::new().with(271, RawTagValue::from("Zeiss"));
        let metadata = SemMetadataExtractor::extract(&tags);

        assert!(!metadata.has_instrument_block());
        assert_eq!(metadata.cleaned.len(), 1);
        assert_eq!(metadata.cleaned["Make"], json!("Zeiss"));
    }

    #[test]
    fn test_config_is_applied() {
        let tags = TagSet::new().with(
            INSTRUMENT_TAG,
            RawTagValue::from("0 0 0\r\nheader\r\nAP_WD\r\nWD = 8.5 mm\r\nAP_NOTE\r\nnull"),
        );
        let config = PipelineConfig::default()
            .skip_header_lines(2)
            .with_unit_mode(UnitMode::Embedded)
            .with_profile(SanitizeProfile::Keep);

        let metadata = SemMetadataExtractor::extract_with_config(&tags, &config);

        assert_eq!(metadata.raw["AP_WD"], json!("WD = 8.5 mm"));
        assert!(!metadata.raw.contains_key("0 0 0"));
        assert!(!metadata.cleaned.contains_key("AP_NOTE"));

        let rows = metadata.features(&["AP_WD", "AP_HOLDER_HEIGHT"]);
        assert_eq!(rows[0].value, Some(FeatureValue::Number(8.5)));
        assert_eq!(rows[0].unit, "mm");
        assert_eq!(rows[1], FeatureRow::missing("AP_HOLDER_HEIGHT"));
    }

    #[test]
    fn test_from_file_rejects_wrong_extension() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("image.png");
        std::fs::write(&path, b"data").unwrap();

        assert!(SemMetadataExtractor::from_file(&path, &PipelineConfig::default()).is_err());
    }
}
