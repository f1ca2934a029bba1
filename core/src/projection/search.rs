use serde_json::{Map, Value};

/// Finds the first value stored under `key` anywhere in a value
///
/// Depth-first: a mapping checks its own keys before descending into its
/// values in iteration order; a sequence is searched element by element.
/// A `null` match does not count and the search continues.
pub fn find_first<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => find_in_map(map, key),
        Value::Array(items) => items.iter().find_map(|item| find_first(item, key)),
        _ => None,
    }
}

/// Same as [`find_first`], starting from a mapping
pub fn find_in_map<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(found) = map.get(key).filter(|v| !v.is_null()) {
        return Some(found);
    }
    map.values().find_map(|child| find_first(child, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_key() {
        let record = json!({"AP_WD": "5.2 mm"});
        assert_eq!(find_first(&record, "AP_WD"), Some(&json!("5.2 mm")));
        assert_eq!(find_first(&record, "AP_MAG"), None);
    }

    #[test]
    fn test_parent_keys_before_children() {
        let record = json!({
            "a": {"AP_WD": "nested"},
            "AP_WD": "top",
        });
        assert_eq!(find_first(&record, "AP_WD"), Some(&json!("top")));
    }

    #[test]
    fn test_depth_first_order() {
        // Keys iterate in sorted order: "a" is fully searched before "b"
        let record = json!({
            "a": {"deep": {"AP_WD": "from a"}},
            "b": {"AP_WD": "from b"},
        });
        assert_eq!(find_first(&record, "AP_WD"), Some(&json!("from a")));
    }

    #[test]
    fn test_sequences_searched_in_order() {
        let record = json!({"list": [{"x": 1}, {"AP_WD": "first"}, {"AP_WD": "second"}]});
        assert_eq!(find_first(&record, "AP_WD"), Some(&json!("first")));
    }

    #[test]
    fn test_null_match_is_skipped() {
        let record = json!({"AP_WD": null, "instrument": {"AP_WD": "5.2 mm"}});
        assert_eq!(find_first(&record, "AP_WD"), Some(&json!("5.2 mm")));
    }

    #[test]
    fn test_scalar_root() {
        assert_eq!(find_first(&json!("AP_WD"), "AP_WD"), None);
    }
}
