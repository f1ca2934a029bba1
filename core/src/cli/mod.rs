pub mod report;

use crate::types::{PipelineConfig, SanitizeProfile, UnitMode};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for semmeta
#[derive(Parser, Debug)]
#[command(name = "semmeta")]
#[command(about = "SEM TIFF metadata extraction tool")]
#[command(version)]
pub struct Cli {
    /// Path to SEM TIFF image
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory receiving <stem>_raw.json and <stem>_cleaned.json
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Features to display, comma separated (defaults to the AP_* acquisition set)
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Empty-container policy when cleaning
    #[arg(long, default_value = "prune")]
    pub profile: ProfileArg,

    /// Where a number+unit pair may appear in feature values
    #[arg(long, default_value = "leading")]
    pub unit_mode: UnitModeArg,

    /// Leading lines of the instrument block to discard
    #[arg(long, default_value_t = 0)]
    pub skip_header_lines: usize,

    /// Additional tag names to drop from the record (ColorMap is always dropped)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Do not write JSON files
    #[arg(long)]
    pub no_write: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the pipeline configuration described by the arguments
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::default()
            .with_profile(self.profile.clone().into())
            .with_unit_mode(self.unit_mode.clone().into())
            .skip_header_lines(self.skip_header_lines);

        if !self.features.is_empty() {
            config = config.with_features(self.features.iter().cloned());
        }
        for name in &self.exclude {
            config = config.exclude(name.clone());
        }
        config
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Empty-container policy
#[derive(Debug, Clone, ValueEnum)]
pub enum ProfileArg {
    /// Remove mappings and sequences left empty
    Prune,
    /// Keep empty mappings and sequences
    Keep,
}

impl From<ProfileArg> for SanitizeProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Prune => SanitizeProfile::Prune,
            ProfileArg::Keep => SanitizeProfile::Keep,
        }
    }
}

/// Number+unit matching mode
#[derive(Debug, Clone, ValueEnum)]
pub enum UnitModeArg {
    /// Number must start the value: "8.00 kV"
    Leading,
    /// Number may follow a label: "EHT = 8.00 kV"
    Embedded,
}

impl From<UnitModeArg> for UnitMode {
    fn from(arg: UnitModeArg) -> Self {
        match arg {
            UnitModeArg::Leading => UnitMode::Leading,
            UnitModeArg::Embedded => UnitMode::Embedded,
        }
    }
}
