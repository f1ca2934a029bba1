//! Core type definitions for SEM metadata
//!
//! This module provides the fundamental types used throughout the semmeta library:
//! - [`RawTagValue`]: Value stored under a TIFF tag
//! - [`TagSet`]: Tags read from one image
//! - [`MetadataEntry`]: Name-resolved tag, possibly absent
//! - [`FeatureRow`]: One row of the display table
//! - [`SanitizeProfile`] and [`UnitMode`]: Cleaning and unit-splitting policies
//! - [`PipelineConfig`]: Configuration for a pipeline run

mod config;
mod enums;
mod feature;
mod tag_value;

pub use config::PipelineConfig;
pub use enums::{SanitizeProfile, UnitMode};
pub use feature::{FeatureRow, FeatureValue};
pub use tag_value::{MetadataEntry, RawTagValue, TagId, TagSet};
