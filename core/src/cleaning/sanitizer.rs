use crate::types::SanitizeProfile;
use serde_json::{Map, Value};

/// Checks whether a scalar reads as "no value"
///
/// True for `null`, for blank strings and for strings spelling `null`
/// in any case, surrounding whitespace ignored.
pub fn is_null_equivalent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")
        }
        _ => false,
    }
}

/// Recursively removes null-equivalent values
///
/// Returns `None` when the value itself must be dropped from its parent.
/// Under [`SanitizeProfile::Prune`] a mapping or sequence left empty is
/// dropped too; under [`SanitizeProfile::Keep`] it stays.
///
/// # Example
///
/// ```
/// use semmeta_core::cleaning::sanitize;
/// use semmeta_core::SanitizeProfile;
/// use serde_json::json;
///
/// let raw = json!({"AP_WD": "5.2 mm", "Make": null, "nested": {"x": "NULL"}});
///
/// assert_eq!(
///     sanitize(&raw, SanitizeProfile::Prune),
///     Some(json!({"AP_WD": "5.2 mm"}))
/// );
/// assert_eq!(
///     sanitize(&raw, SanitizeProfile::Keep),
///     Some(json!({"AP_WD": "5.2 mm", "nested": {}}))
/// );
/// ```
pub fn sanitize(value: &Value, profile: SanitizeProfile) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let cleaned = sanitize_map(map, profile);
            if cleaned.is_empty() && profile.prunes_empty() {
                None
            } else {
                Some(Value::Object(cleaned))
            }
        }
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.iter().filter_map(|v| sanitize(v, profile)).collect();
            if cleaned.is_empty() && profile.prunes_empty() {
                None
            } else {
                Some(Value::Array(cleaned))
            }
        }
        scalar if is_null_equivalent(scalar) => None,
        scalar => Some(scalar.clone()),
    }
}

/// Sanitizes every entry of a mapping, keeping the mapping itself
///
/// This is the root-level entry point: the result may be empty but is
/// never dropped.
pub fn sanitize_map(map: &Map<String, Value>, profile: SanitizeProfile) -> Map<String, Value> {
    map.iter()
        .filter_map(|(key, value)| sanitize(value, profile).map(|v| (key.clone(), v)))
        .collect()
}
