use serde::{Deserialize, Serialize};
use std::fmt;

/// Empty-container policy used when sanitizing a record
///
/// Both profiles drop null-equivalent scalars. They differ only in what
/// happens to a mapping or sequence left empty after its children were removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SanitizeProfile {
    /// Empty mappings and sequences are removed from their parent
    #[default]
    Prune,

    /// Empty mappings and sequences are kept in place
    Keep,
}

impl SanitizeProfile {
    /// Returns whether empty containers are removed under this profile
    pub fn prunes_empty(&self) -> bool {
        matches!(self, SanitizeProfile::Prune)
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            SanitizeProfile::Prune => "prune",
            SanitizeProfile::Keep => "keep",
        }
    }

    /// Parses a profile from string, falling back to the default
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "keep" | "keep-empty" => SanitizeProfile::Keep,
            _ => SanitizeProfile::Prune,
        }
    }
}

impl fmt::Display for SanitizeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Where a number+unit pair may appear in a feature string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitMode {
    /// The number must start the string: "8.00 kV"
    #[default]
    Leading,

    /// The number may follow a label: "Liner Tube = 8.00 kV"
    Embedded,
}

impl UnitMode {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            UnitMode::Leading => "leading",
            UnitMode::Embedded => "embedded",
        }
    }

    /// Parses a unit mode from string, falling back to the default
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("embedded") {
            UnitMode::Embedded
        } else {
            UnitMode::Leading
        }
    }
}

impl fmt::Display for UnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
