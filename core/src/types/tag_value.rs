use serde_json::{Number, Value};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Numeric identifier of a TIFF/EXIF tag
pub type TagId = u16;

/// Value stored under a tag, as read from the image container
///
/// Integral TIFF field types collapse into `Int`, floating ones into `Float`.
/// `Bytes` holds payloads that are not guaranteed to be valid UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTagValue {
    Int(i64),
    Float(f64),
    Rational(i64, i64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<RawTagValue>),
}

impl RawTagValue {
    /// Returns the first element of the value
    ///
    /// Lists yield their first entry (`None` when empty); any other value
    /// is its own first element.
    pub fn first_element(&self) -> Option<&RawTagValue> {
        match self {
            RawTagValue::List(items) => items.first(),
            other => Some(other),
        }
    }

    /// Returns whether this value is a scalar (not a list)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, RawTagValue::List(_))
    }

    /// Converts the value into its JSON representation
    ///
    /// Rationals become their quotient; a zero denominator or a non-finite
    /// float becomes `null`. Text and bytes lose trailing NUL padding.
    pub fn to_json(&self) -> Value {
        match self {
            RawTagValue::Int(i) => Value::from(*i),
            RawTagValue::Float(f) => float_to_json(*f),
            RawTagValue::Rational(_, 0) => Value::Null,
            RawTagValue::Rational(num, den) => float_to_json(*num as f64 / *den as f64),
            RawTagValue::Text(s) => Value::String(s.trim_end_matches('\0').to_string()),
            RawTagValue::Bytes(b) => {
                Value::String(String::from_utf8_lossy(b).trim_end_matches('\0').to_string())
            }
            RawTagValue::List(items) => Value::Array(items.iter().map(|v| v.to_json()).collect()),
        }
    }
}

fn float_to_json(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

impl fmt::Display for RawTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTagValue::Int(i) => write!(f, "{}", i),
            RawTagValue::Float(v) => write!(f, "{}", v),
            RawTagValue::Rational(num, den) => write!(f, "{}/{}", num, den),
            RawTagValue::Text(s) => write!(f, "{}", s),
            RawTagValue::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            RawTagValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join("\n"))
            }
        }
    }
}

impl From<i64> for RawTagValue {
    fn from(i: i64) -> Self {
        RawTagValue::Int(i)
    }
}

impl From<&str> for RawTagValue {
    fn from(s: &str) -> Self {
        RawTagValue::Text(s.to_string())
    }
}

impl From<String> for RawTagValue {
    fn from(s: String) -> Self {
        RawTagValue::Text(s)
    }
}

/// Name-resolved tag, with `None` meaning "not present in this image"
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub name: String,
    pub value: Option<RawTagValue>,
}

impl MetadataEntry {
    /// Creates an entry for a tag found in the image
    pub fn found(name: impl Into<String>, value: Option<RawTagValue>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Creates an entry for a tag absent from the image
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Tags read from one image: a map from id to value
///
/// The set of present ids is exactly the key set of the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSet {
    values: HashMap<TagId, RawTagValue>,
}

impl TagSet {
    /// Creates an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a tag value, replacing any previous value for the id
    pub fn with(mut self, id: TagId, value: RawTagValue) -> Self {
        self.insert(id, value);
        self
    }

    /// Inserts a tag value, replacing any previous value for the id
    pub fn insert(&mut self, id: TagId, value: RawTagValue) {
        self.values.insert(id, value);
    }

    /// Returns the value stored under a tag
    pub fn get(&self, id: TagId) -> Option<&RawTagValue> {
        self.values.get(&id)
    }

    /// Checks whether a tag is present
    pub fn contains(&self, id: TagId) -> bool {
        self.values.contains_key(&id)
    }

    /// Returns the ids of all present tags, sorted
    pub fn present_ids(&self) -> BTreeSet<TagId> {
        self.values.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(TagId, RawTagValue)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (TagId, RawTagValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
