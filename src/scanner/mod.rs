//! Signature scan of the scan roots.

mod collapse;
mod walker;

pub use collapse::collapse_covered;
pub use walker::{find_matches, ScanReport};
