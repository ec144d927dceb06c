/// Scan-fatal error taxonomy.
///
/// Only the two variants here abort a scan. Everything else — an
/// unreadable file, an unlistable subdirectory — is absorbed: logged,
/// reported as a non-terminal event, and skipped, preserving
/// best-effort totals. A single permission-denied file must never sink
/// an otherwise-successful scan of thousands.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The supplied root handle is not a directory at all, so there is
    /// no tree to traverse. Fatal at scan start.
    #[error("not a scannable directory: {path}")]
    Unsupported { path: PathBuf },

    /// The root directory itself cannot be listed. Fatal — a root
    /// listing failure leaves nothing to be best-effort about. (The
    /// same failure below the root only skips that subtree.)
    #[error("cannot read root directory {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
