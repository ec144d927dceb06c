/// Data model: the running aggregate, its immutable snapshot, and
/// display-boundary count formatting.
pub mod aggregate;
pub mod count;

pub use aggregate::{ScanResult, ScanState};
