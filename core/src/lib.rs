pub mod api;
pub mod cleaning;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod io;
pub mod projection;
pub mod types;

pub use api::{SemMetadata, SemMetadataExtractor};
pub use cli::report::TextReport;
pub use error::{Result, SemMetaError};
pub use types::*;
