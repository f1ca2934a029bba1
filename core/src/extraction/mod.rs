pub mod instrument;
pub mod reconcile;
pub mod tags;

pub use instrument::{decode, decode_with_header, pairify, tokenize};
pub use reconcile::MetadataReconciler;
pub use tags::*;
