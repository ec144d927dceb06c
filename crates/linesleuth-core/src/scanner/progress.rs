/// Scan progress reporting — lightweight messages sent from the scan
/// thread to the caller via a crossbeam channel.
use crate::error::ScanError;
use crate::model::ScanResult;
use compact_str::CompactString;
use std::time::Duration;

/// Events emitted by a scan, in order.
///
/// `Counted` events arrive in the exact order files were counted. The
/// terminal event (`Complete`, `Cancelled`, or `Failed`) is always the
/// last message; after it the channel disconnects and no further events
/// arrive.
#[derive(Debug)]
pub enum ScanEvent {
    /// A file was classified, read, and counted. Carries its path
    /// relative to the scan root. Sent immediately after the aggregate
    /// was updated for this file.
    Counted { path: CompactString },

    /// A non-fatal read failure (permission denied on one file, an
    /// unlistable subdirectory). The entry is skipped, no counter is
    /// touched, and traversal continues.
    ReadError { path: CompactString, message: String },

    /// Terminal: traversal exhausted without cancellation.
    Complete {
        /// The final aggregate, frozen.
        result: ScanResult,
        /// Wall-clock duration of the walk.
        duration: Duration,
        /// Number of non-fatal read failures absorbed along the way.
        error_count: u64,
    },

    /// Terminal: the caller requested early termination. No result is
    /// produced for a cancelled run.
    Cancelled,

    /// Terminal: the scan could not start or the root could not be
    /// listed. No result, no partial totals.
    Failed(ScanError),
}
