use crate::types::{FeatureValue, UnitMode};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Unit characters: ASCII letters, both micro signs, `/`, `%` and `°`
const UNIT_CLASS: &str = "[A-Za-zµμ/%°]";

fn leading_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!(r"^\s*([+-]?[0-9]+(?:\.[0-9]+)?)\s*({}+)?", UNIT_CLASS))
            .expect("Failed to compile regex")
    })
}

fn embedded_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!(r"([+-]?[0-9]+(?:\.[0-9]+)?)\s*({}+)", UNIT_CLASS))
            .expect("Failed to compile regex")
    })
}

/// Parses a number+unit string
///
/// `Leading` requires the number at the start of the string and makes the
/// unit optional. `Embedded` falls back to the first number directly
/// followed by a unit anywhere in the string.
///
/// Returns `None` when no number matches.
pub fn parse_number_unit(s: &str, mode: UnitMode) -> Option<(f64, String)> {
    let captures = match mode {
        UnitMode::Leading => leading_regex().captures(s),
        UnitMode::Embedded => leading_regex()
            .captures(s)
            .or_else(|| embedded_regex().captures(s)),
    }?;

    let number: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures
        .get(2)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Some((number, unit))
}

/// Splits a record value into a feature value and its unit
///
/// Numbers pass through unchanged with an empty unit. Strings are parsed with
/// [`parse_number_unit`] and pass through unchanged when they hold no number.
/// Any other JSON value is rendered as text.
pub fn split_value_unit(value: &Value, mode: UnitMode) -> (FeatureValue, String) {
    match value {
        Value::Number(n) => (FeatureValue::Exact(n.clone()), String::new()),
        Value::String(s) => match parse_number_unit(s, mode) {
            Some((number, unit)) => (FeatureValue::Number(number), unit),
            None => (FeatureValue::Text(s.clone()), String::new()),
        },
        other => (FeatureValue::Text(other.to_string()), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("8.00 kV", 8.0, "kV")]
    #[case("5.2 mm", 5.2, "mm")]
    #[case("12", 12.0, "")]
    #[case("-3.5°", -3.5, "°")]
    #[case("+1.0 µm", 1.0, "µm")]
    #[case("250 μA", 250.0, "μA")]
    #[case("  45 %", 45.0, "%")]
    #[case("3.1 nm/px", 3.1, "nm/px")]
    #[case("100pA", 100.0, "pA")]
    fn test_parse_leading(#[case] input: &str, #[case] number: f64, #[case] unit: &str) {
        assert_eq!(
            parse_number_unit(input, UnitMode::Leading),
            Some((number, unit.to_string()))
        );
    }

    #[rstest]
    #[case("N/A")]
    #[case("WD = 8.5 mm")]
    #[case("")]
    #[case(".5 mm")]
    fn test_parse_leading_no_match(#[case] input: &str) {
        assert_eq!(parse_number_unit(input, UnitMode::Leading), None);
    }

    #[test]
    fn test_parse_embedded() {
        assert_eq!(
            parse_number_unit("Liner Tube =  8.00 kV", UnitMode::Embedded),
            Some((8.0, "kV".to_string()))
        );
        assert_eq!(
            parse_number_unit("5.2 mm", UnitMode::Embedded),
            Some((5.2, "mm".to_string()))
        );
        assert_eq!(parse_number_unit("Detector = SE2", UnitMode::Embedded), None);
    }

    #[test]
    fn test_split_value_unit() {
        assert_eq!(
            split_value_unit(&json!("8.00 kV"), UnitMode::Leading),
            (FeatureValue::Number(8.0), "kV".to_string())
        );
        assert_eq!(
            split_value_unit(&json!(42), UnitMode::Leading),
            (FeatureValue::Exact(42.into()), String::new())
        );
        assert_eq!(
            split_value_unit(&json!("N/A"), UnitMode::Leading),
            (FeatureValue::Text("N/A".to_string()), String::new())
        );
        assert_eq!(
            split_value_unit(&json!(true), UnitMode::Leading),
            (FeatureValue::Text("true".to_string()), String::new())
        );
    }

    #[test]
    fn test_numeric_values_kept_exact() {
        let (value, unit) = split_value_unit(&json!(42), UnitMode::Leading);
        assert_eq!(serde_json::to_string(&value).unwrap(), "42");
        assert_eq!(unit, "");

        let (value, _) = split_value_unit(&json!(9007199254740993u64), UnitMode::Leading);
        assert_eq!(serde_json::to_string(&value).unwrap(), "9007199254740993");

        let (value, _) = split_value_unit(&json!(2.5), UnitMode::Embedded);
        assert_eq!(serde_json::to_string(&value).unwrap(), "2.5");
    }
}
