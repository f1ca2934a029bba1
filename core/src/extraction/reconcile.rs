use super::tags::{TagCatalog, DEFAULT_EXCLUSIONS};
use crate::types::{MetadataEntry, TagSet};
use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Merges standard tags and instrument pairs into one name-keyed record
///
/// Precedence rules:
/// - a present tag always wins over a missing tag of the same name
/// - instrument keys overwrite standard keys of the same name
/// - excluded names never reach the record, whichever source produced them
pub struct MetadataReconciler<'a> {
    catalog: &'a TagCatalog,
    exclusions: Vec<String>,
}

impl<'a> MetadataReconciler<'a> {
    /// Creates a reconciler excluding `ColorMap`
    pub fn new(catalog: &'a TagCatalog) -> Self {
        Self {
            catalog,
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Builder: Replace the exclusion list
    pub fn with_exclusions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = names.into_iter().map(Into::into).collect();
        self
    }

    /// Checks whether a name is excluded
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclusions.iter().any(|e| e == name)
    }

    /// Resolves every catalogued tag into a found or missing entry
    ///
    /// Found entries keep only the first element of the tag value.
    /// Excluded names are dropped from both lists.
    pub fn standard_entries(&self, tags: &TagSet) -> (Vec<MetadataEntry>, Vec<MetadataEntry>) {
        let mut found = Vec::new();
        let mut missing = Vec::new();

        for (id, name) in self.catalog.iter() {
            if self.is_excluded(name) {
                continue;
            }
            match tags.get(id) {
                Some(value) => {
                    found.push(MetadataEntry::found(name, value.first_element().cloned()))
                }
                None => missing.push(MetadataEntry::missing(name)),
            }
        }

        debug!(
            "Resolved {} present and {} missing standard tags",
            found.len(),
            missing.len()
        );
        (found, missing)
    }

    /// Merges found and missing entries, present wins
    pub fn merge_standard(
        &self,
        found: Vec<MetadataEntry>,
        missing: Vec<MetadataEntry>,
    ) -> Map<String, Value> {
        let mut record = Map::new();

        for entry in missing {
            if !self.is_excluded(&entry.name) {
                record.insert(entry.name, Value::Null);
            }
        }

        for entry in found {
            if !self.is_excluded(&entry.name) {
                let value = entry.value.map(|v| v.to_json()).unwrap_or(Value::Null);
                record.insert(entry.name, value);
            }
        }

        record
    }

    /// Merges instrument pairs into the record at the same level
    pub fn merge_instrument(&self, record: &mut Map<String, Value>, pairs: &BTreeMap<String, String>) {
        for (key, value) in pairs {
            if self.is_excluded(key) {
                debug!("Dropping excluded instrument key {}", key);
                continue;
            }
            record.insert(key.clone(), Value::String(value.clone()));
        }
    }

    /// Builds the unified record for one image
    ///
    /// # Example
    ///
    /// ```
    /// use semmeta_core::extraction::{MetadataReconciler, TagCatalog};
    /// use semmeta_core::{RawTagValue, TagSet};
    /// use std::collections::BTreeMap;
    ///
    /// let catalog = TagCatalog::standard();
    /// let tags = TagSet::new().with(274, RawTagValue::List(vec![RawTagValue::Int(1)]));
    /// let mut pairs = BTreeMap::new();
    /// pairs.insert("AP_WD".to_string(), "5.2 mm".to_string());
    ///
    /// let record = MetadataReconciler::new(&catalog).reconcile(&tags, &pairs);
    ///
    /// assert_eq!(record["Orientation"], 1);
    /// assert_eq!(record["AP_WD"], "5.2 mm");
    /// assert!(record["Make"].is_null());
    /// assert!(!record.contains_key("ColorMap"));
    /// ```
    pub fn reconcile(&self, tags: &TagSet, pairs: &BTreeMap<String, String>) -> Map<String, Value> {
        let (found, missing) = self.standard_entries(tags);
        let mut record = self.merge_standard(found, missing);
        self.merge_instrument(&mut record, pairs);
        record
    }
}
