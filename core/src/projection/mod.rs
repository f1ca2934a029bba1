//! Feature lookup and value/unit splitting for display

pub mod search;
pub mod unit;

pub use search::{find_first, find_in_map};
pub use unit::{parse_number_unit, split_value_unit};

use crate::types::{FeatureRow, UnitMode};
use serde_json::{Map, Value};

/// Acquisition parameters shown in the summary table by default
pub const DEFAULT_FEATURES: &[&str] = &[
    "AP_WD",
    "AP_BEAM_TIME",
    "AP_IMAGE_PIXEL_SIZE",
    "AP_HOLDER_HEIGHT",
    "AP_BEAM_CURRENT",
    "AP_HOLDER_DIAMETER",
];

/// Projects a sanitized record onto a list of named features
///
/// # Example
///
/// ```
/// use semmeta_core::projection::FeatureProjector;
/// use semmeta_core::FeatureValue;
/// use serde_json::json;
///
/// let record = json!({"AP_WD": "5.2 mm", "AP_BEAM_TIME": 12});
/// let rows = FeatureProjector::default()
///     .project_value(&record, &["AP_WD", "AP_BEAM_TIME", "AP_HOLDER_HEIGHT"]);
///
/// assert_eq!(rows[0].value, Some(FeatureValue::Number(5.2)));
/// assert_eq!(rows[0].unit, "mm");
/// assert_eq!(rows[1].value, Some(FeatureValue::Exact(12.into())));
/// assert_eq!(rows[2].value, None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureProjector {
    mode: UnitMode,
}

impl FeatureProjector {
    /// Creates a projector using the given unit mode
    pub fn new(mode: UnitMode) -> Self {
        Self { mode }
    }

    /// Returns the unit mode in use
    pub fn mode(&self) -> UnitMode {
        self.mode
    }

    /// Builds one row per feature, in the order given
    pub fn project<S: AsRef<str>>(&self, record: &Map<String, Value>, features: &[S]) -> Vec<FeatureRow> {
        features
            .iter()
            .map(|feature| self.row(find_in_map(record, feature.as_ref()), feature.as_ref()))
            .collect()
    }

    /// Same as [`FeatureProjector::project`] for an arbitrary JSON value
    pub fn project_value<S: AsRef<str>>(&self, record: &Value, features: &[S]) -> Vec<FeatureRow> {
        features
            .iter()
            .map(|feature| self.row(find_first(record, feature.as_ref()), feature.as_ref()))
            .collect()
    }

    fn row(&self, found: Option<&Value>, feature: &str) -> FeatureRow {
        match found {
            Some(value) => {
                let (value, unit) = split_value_unit(value, self.mode);
                FeatureRow::new(feature, Some(value), unit)
            }
            None => FeatureRow::missing(feature),
        }
    }
}
