/// Scanner module — orchestrates the line-counting walk.
///
/// [`start_scan`] runs [`walk::scan_tree`] on a background thread so a
/// front-end stays responsive; events flow back through a bounded
/// channel on the returned [`ScanHandle`]. The walk itself is also
/// callable directly for callers that want to block.
pub mod progress;
pub mod walk;

use crate::classify::{Classifier, DEFAULT_SIZE_LIMIT_BYTES};
use progress::ScanEvent;

use crossbeam_channel::Receiver;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Per-scan configuration. `Default` gives the fixed defaults: a 5 MiB
/// per-file ceiling and the built-in language table and ignore sets.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Files larger than this many bytes are skipped uncounted.
    pub size_limit_bytes: u64,
    /// Language table and ignore rules consulted per entry.
    pub classifier: Classifier,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            size_limit_bytes: DEFAULT_SIZE_LIMIT_BYTES,
            classifier: Classifier::default(),
        }
    }
}

/// Handle to a running or completed scan. Allows cancellation and
/// receiving progress events.
pub struct ScanHandle {
    /// Receiver for events from the scan thread. The terminal event is
    /// always the last message before the channel disconnects.
    pub events: Receiver<ScanEvent>,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the scan thread.
    thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible. Cooperative: an
    /// in-flight single-file read completes first.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// Wait for the scan thread to finish. Dropping the handle without
    /// joining detaches the thread instead.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Maximum number of events that may queue up in the channel.
///
/// A front-end drains the channel on its own cadence. If it falls
/// behind by this many events, `send` blocks and the scanner stalls
/// briefly rather than consuming unbounded heap.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Start a new scan on a background thread.
///
/// Returns a `ScanHandle` for receiving events and requesting
/// cancellation.
pub fn start_scan(root_path: PathBuf, options: ScanOptions) -> ScanHandle {
    let (events_tx, events_rx) = crossbeam_channel::bounded::<ScanEvent>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let thread = thread::Builder::new()
        .name("linesleuth-scanner".into())
        .spawn(move || {
            info!("starting scan of {}", root_path.display());
            walk::scan_tree(&root_path, &options, &events_tx, &cancel_clone);
        })
        .expect("failed to spawn scanner thread");

    ScanHandle {
        events: events_rx,
        cancel_flag,
        thread: Some(thread),
    }
}
