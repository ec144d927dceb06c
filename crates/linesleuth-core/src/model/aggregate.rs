/// The per-scan aggregate: a mutable accumulator owned exclusively by
/// the scan thread, and the immutable snapshot handed to the caller.
///
/// All three counters move together through [`ScanState::record`], so
/// `total_lines == sum(language_lines.values())` holds at every point
/// the state can be observed (it is never observed mid-update).
use compact_str::CompactString;
use serde::Serialize;
use std::collections::HashMap;

/// Running totals for one in-flight scan.
///
/// Created zeroed at scan start, mutated only by the scanner, and
/// converted into a [`ScanResult`] on successful completion. Discarded
/// on cancellation or fatal error.
#[derive(Debug, Default)]
pub struct ScanState {
    total_lines: u64,
    file_count: u64,
    language_lines: HashMap<CompactString, u64>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully counted file: bumps the file count, the
    /// grand total, and the per-language total in a single step.
    pub fn record(&mut self, language: &str, lines: u64) {
        self.file_count += 1;
        self.total_lines += lines;
        *self
            .language_lines
            .entry(CompactString::new(language))
            .or_insert(0) += lines;
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn file_count(&self) -> u64 {
        self.file_count
    }

    /// Freeze the accumulator into an immutable snapshot.
    pub fn into_result(self) -> ScanResult {
        debug_assert_eq!(
            self.total_lines,
            self.language_lines.values().sum::<u64>(),
            "aggregate invariant broken: total_lines != sum(language_lines)"
        );
        ScanResult {
            total_lines: self.total_lines,
            file_count: self.file_count,
            language_lines: self.language_lines,
        }
    }
}

/// Immutable result of a completed scan. Never mutated once emitted.
///
/// `language_lines` is a mapping with no ordering significance — two
/// results compare equal when their totals and mappings agree,
/// regardless of traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Grand total of counted lines across all languages.
    pub total_lines: u64,
    /// Number of files that contributed to `language_lines`.
    pub file_count: u64,
    /// Counted lines per language display name.
    pub language_lines: HashMap<CompactString, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_zeroed() {
        let state = ScanState::new();
        assert_eq!(state.total_lines(), 0);
        assert_eq!(state.file_count(), 0);
        let result = state.into_result();
        assert_eq!(result.total_lines, 0);
        assert_eq!(result.file_count, 0);
        assert!(result.language_lines.is_empty());
    }

    #[test]
    fn record_updates_all_counters_together() {
        let mut state = ScanState::new();
        state.record("Python", 3);
        state.record("JavaScript", 10);
        state.record("Python", 4);

        let result = state.into_result();
        assert_eq!(result.file_count, 3);
        assert_eq!(result.total_lines, 17);
        assert_eq!(result.language_lines.get("Python").copied(), Some(7));
        assert_eq!(result.language_lines.get("JavaScript").copied(), Some(10));
        // The invariant the whole design hangs on.
        assert_eq!(
            result.total_lines,
            result.language_lines.values().sum::<u64>()
        );
    }

    /// Results are compared as mappings, so insertion order is irrelevant.
    #[test]
    fn results_compare_order_independent() {
        let mut a = ScanState::new();
        a.record("Rust", 5);
        a.record("Go", 2);

        let mut b = ScanState::new();
        b.record("Go", 2);
        b.record("Rust", 5);

        assert_eq!(a.into_result(), b.into_result());
    }

    #[test]
    fn result_serialises_to_json_object() {
        let mut state = ScanState::new();
        state.record("Rust", 42);
        let json = serde_json::to_value(state.into_result()).unwrap();
        assert_eq!(json["total_lines"], 42);
        assert_eq!(json["file_count"], 1);
        assert_eq!(json["language_lines"]["Rust"], 42);
    }
}
