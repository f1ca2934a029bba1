use crate::extraction::tags::DEFAULT_EXCLUSIONS;
use crate::projection::DEFAULT_FEATURES;
use crate::types::{SanitizeProfile, UnitMode};
use serde::{Deserialize, Serialize};

/// Configuration for one metadata pipeline run
///
/// # Example
///
/// ```
/// use semmeta_core::{PipelineConfig, SanitizeProfile, UnitMode};
///
/// let config = PipelineConfig::default()
///     .with_features(["AP_WD", "AP_MAG"])
///     .with_profile(SanitizeProfile::Keep)
///     .with_unit_mode(UnitMode::Embedded);
///
/// assert_eq!(config.features, vec!["AP_WD", "AP_MAG"]);
/// assert_eq!(config.profile, SanitizeProfile::Keep);
/// assert!(config.is_excluded("ColorMap"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Feature names projected into the summary table, in display order
    pub features: Vec<String>,

    /// Empty-container policy of the sanitizer
    pub profile: SanitizeProfile,

    /// Number+unit matching mode of the feature projector
    pub unit_mode: UnitMode,

    /// Leading lines of the instrument block discarded before tokenizing
    pub header_lines: usize,

    /// Tag names never allowed into the unified record
    pub exclusions: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            features: DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
            profile: SanitizeProfile::default(),
            unit_mode: UnitMode::default(),
            header_lines: 0,
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    /// Builder: Set projected features
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: Set sanitize profile
    pub fn with_profile(mut self, profile: SanitizeProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Builder: Set unit mode
    pub fn with_unit_mode(mut self, unit_mode: UnitMode) -> Self {
        self.unit_mode = unit_mode;
        self
    }

    /// Builder: Discard leading header lines of the instrument block
    ///
    /// # Example
    ///
    /// ```
    /// use semmeta_core::PipelineConfig;
    ///
    /// let config = PipelineConfig::default().skip_header_lines(35);
    /// assert_eq!(config.header_lines, 35);
    /// ```
    pub fn skip_header_lines(mut self, lines: usize) -> Self {
        self.header_lines = lines;
        self
    }

    /// Builder: Add a name to the exclusion list
    ///
    /// `ColorMap` stays excluded regardless.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.is_excluded(&name) {
            self.exclusions.push(name);
        }
        self
    }

    /// Checks whether a tag name is excluded
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclusions.iter().any(|e| e == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.features.len(), DEFAULT_FEATURES.len());
        assert_eq!(config.features[0], "AP_WD");
        assert_eq!(config.profile, SanitizeProfile::Prune);
        assert_eq!(config.unit_mode, UnitMode::Leading);
        assert_eq!(config.header_lines, 0);
        assert_eq!(config.exclusions, vec!["ColorMap"]);
    }

    #[test]
    fn test_exclude_deduplicates() {
        let config = PipelineConfig::default()
            .exclude("StripOffsets")
            .exclude("ColorMap")
            .exclude("StripOffsets");
        assert_eq!(config.exclusions, vec!["ColorMap", "StripOffsets"]);
        assert!(config.is_excluded("StripOffsets"));
        assert!(!config.is_excluded("Orientation"));
    }
}
