/// The traversal and aggregation loop.
///
/// `jwalk` performs parallel directory *reads* (rayon pool sized to the
/// CPU count), but every per-file step — ignore check, classification,
/// size check, read, line count, aggregate update, progress emission —
/// happens in this single consumer loop. `ScanState` therefore has
/// exactly one writer and its invariant (`total_lines` equals the sum
/// of the per-language totals) holds at every observable point.
///
/// Ignored directories are pruned inside `process_read_dir`, so they
/// are never descended into and never yielded to the consumer.
use crate::error::ScanError;
use crate::model::ScanState;
use crate::scanner::progress::ScanEvent;
use crate::scanner::ScanOptions;
use compact_str::CompactString;
use crossbeam_channel::Sender;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Walk `root`, counting lines per language, sending one `Counted`
/// event per counted file and exactly one terminal event last.
///
/// Cancellation is cooperative: the flag is checked before every
/// yielded entry, so an in-flight single-file read always completes
/// before the cancellation takes effect.
pub fn scan_tree(
    root: &Path,
    options: &ScanOptions,
    events: &Sender<ScanEvent>,
    cancel: &AtomicBool,
) {
    let start = Instant::now();

    // Root checks up front: a listing failure *below* the root only
    // skips that subtree, but the root itself failing is fatal.
    let root_meta = match fs::metadata(root) {
        Ok(meta) => meta,
        Err(err) => {
            let _ = events.send(ScanEvent::Failed(ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source: err,
            }));
            return;
        }
    };
    if !root_meta.is_dir() {
        let _ = events.send(ScanEvent::Failed(ScanError::Unsupported {
            path: root.to_path_buf(),
        }));
        return;
    }
    if let Err(err) = fs::read_dir(root) {
        let _ = events.send(ScanEvent::Failed(ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source: err,
        }));
        return;
    }

    if cancel.load(Ordering::Relaxed) {
        let _ = events.send(ScanEvent::Cancelled);
        return;
    }

    let mut state = ScanState::new();
    let mut error_count: u64 = 0;

    // The prune closure runs on jwalk's worker threads and needs its own
    // handle on the classifier.
    let classifier = Arc::new(options.classifier.clone());
    let pruner = classifier.clone();

    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()))
        .process_read_dir(move |_depth, _dir_path, _state, children| {
            children.retain(|entry_result| match entry_result {
                Ok(entry) => {
                    !(entry.file_type.is_dir()
                        && pruner.is_ignored_dir(entry.file_name.to_string_lossy().as_ref()))
                }
                // Keep errors so the consumer loop can report them.
                Err(_) => true,
            });
        });

    for entry_result in walker {
        if cancel.load(Ordering::Relaxed) {
            let _ = events.send(ScanEvent::Cancelled);
            return;
        }

        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                // Unlistable subdirectory: skip the subtree, keep going.
                error_count += 1;
                let path = err
                    .path()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                warn!("cannot list {path}: {err}");
                let _ = events.send(ScanEvent::ReadError {
                    path: CompactString::new(&path),
                    message: format!("{err}"),
                });
                continue;
            }
        };

        // The root itself; directories are handled by the traversal, and
        // symlinks are not followed.
        if entry.depth == 0 || !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        // Ignore rule wins over classification (lockfiles have a
        // recognised extension but are still skipped).
        if classifier.is_ignored_file(file_name.as_ref()) {
            continue;
        }
        let Some(language) = classifier.language_for(file_name.as_ref()) else {
            // Unclassified: skipped, uncounted. Not an error.
            continue;
        };

        let path = entry.path();
        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(err) => {
                error_count += 1;
                warn!("cannot stat {}: {err}", path.display());
                let _ = events.send(ScanEvent::ReadError {
                    path: CompactString::new(path.to_string_lossy()),
                    message: format!("{err}"),
                });
                continue;
            }
        };

        // Size ceiling: bound memory use. Skipped, uncounted, not an error.
        if meta.len() > options.size_limit_bytes {
            debug!(
                "skipping {} ({} bytes over the {} byte limit)",
                path.display(),
                meta.len(),
                options.size_limit_bytes
            );
            continue;
        }

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                error_count += 1;
                warn!("cannot read {}: {err}", path.display());
                let _ = events.send(ScanEvent::ReadError {
                    path: CompactString::new(path.to_string_lossy()),
                    message: format!("{err}"),
                });
                continue;
            }
        };

        // Line count = newline bytes + 1: the number of segments a split
        // on '\n' would produce. An empty file counts as 1 and content
        // without a trailing newline still counts its last segment.
        // This convention is load-bearing for all downstream totals —
        // do not "fix" it to a plain newline count.
        let lines = bytecount::count(&bytes, b'\n') as u64 + 1;

        state.record(language, lines);

        let relative = path.strip_prefix(root).unwrap_or(&path);
        let sent = events.send(ScanEvent::Counted {
            path: CompactString::new(relative.to_string_lossy()),
        });
        if sent.is_err() {
            // Receiver dropped: nobody is observing this scan any more.
            debug!("event receiver dropped, abandoning walk");
            return;
        }
    }

    let duration = start.elapsed();
    debug!(
        "scan complete: {} files, {} lines in {duration:?} ({error_count} read errors)",
        state.file_count(),
        state.total_lines()
    );

    let _ = events.send(ScanEvent::Complete {
        result: state.into_result(),
        duration,
        error_count,
    });
}
