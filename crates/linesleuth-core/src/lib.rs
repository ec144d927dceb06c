/// LineSleuth Core — classification, scanning, and aggregation.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI,
/// TUI).
///
/// # Modules
///
/// - [`classify`] — Extension → language table and ignore rules.
/// - [`model`] — Scan aggregate, result snapshot, count formatting.
/// - [`scanner`] — Background line-counting scan with progress events.
/// - [`error`] — Scan-fatal error taxonomy.
pub mod classify;
pub mod error;
pub mod model;
pub mod scanner;
