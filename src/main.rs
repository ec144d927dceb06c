//! LineSleuth — per-language line counter.
//!
//! Thin binary entry point. All logic lives in the `linesleuth-core`
//! and `linesleuth-cli` crates.

fn main() -> anyhow::Result<()> {
    // Initialise structured logging. Logs go to stderr so the report on
    // stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    linesleuth_cli::run()
}
