//! Accumulation of discovered values across scanned files.
//!
//! The index is the only shared structure of a category run. Scans return
//! their matches as plain vectors and the caller merges them here after the
//! concurrent reads have resolved, so insertion is always synchronous and
//! single-threaded by construction.

use std::collections::BTreeMap;

use crate::types::{Occurrence, RawMatch, ValueRecord};

/// Mapping from discovered value to its provenance records.
///
/// Keys iterate in lexicographic order, which is also the canonical emission
/// order for classified output.
#[derive(Debug, Default)]
pub struct OccurrenceIndex {
    records: BTreeMap<String, ValueRecord>,
}

impl OccurrenceIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `value`.
    ///
    /// Two matches for the same value at the same `(file, line)` collapse
    /// into one stored entry; the context of the first matching rule wins.
    pub fn insert(&mut self, value: String, occurrence: Occurrence) {
        let record = self
            .records
            .entry(value.clone())
            .or_insert_with(|| ValueRecord {
                value,
                occurrences: Vec::new(),
            });

        let duplicate = record
            .occurrences
            .iter()
            .any(|seen| seen.file == occurrence.file && seen.line == occurrence.line);
        if !duplicate {
            record.occurrences.push(occurrence);
        }
    }

    /// Merge the matches produced by one file scan.
    pub fn merge(&mut self, matches: Vec<RawMatch>) {
        for raw in matches {
            self.insert(raw.value, raw.occurrence);
        }
    }

    /// All records in lexicographic value order.
    pub fn records(&self) -> impl Iterator<Item = &ValueRecord> {
        self.records.values()
    }

    /// Number of distinct values discovered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no value has been discovered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ContextTag;

    fn occurrence(file: &str, line: usize, context: ContextTag) -> Occurrence {
        Occurrence {
            file: file.to_string(),
            line,
            raw_text: format!("line {line}"),
            context,
        }
    }

    #[test]
    fn same_location_collapses_first_context_wins() {
        let mut index = OccurrenceIndex::new();
        index.insert("movie".into(), occurrence("src/a.rs", 10, ContextTag::Assignment));
        index.insert("movie".into(), occurrence("src/a.rs", 10, ContextTag::Comparison));

        let record = index.records().next().unwrap();
        assert_eq!(record.occurrences.len(), 1);
        assert_eq!(record.occurrences[0].context, ContextTag::Assignment);
    }

    #[test]
    fn distinct_locations_accumulate() {
        let mut index = OccurrenceIndex::new();
        index.insert("movie".into(), occurrence("src/a.rs", 10, ContextTag::Assignment));
        index.insert("movie".into(), occurrence("src/a.rs", 11, ContextTag::Assignment));
        index.insert("movie".into(), occurrence("src/b.rs", 10, ContextTag::Comparison));

        let record = index.records().next().unwrap();
        assert_eq!(record.occurrences.len(), 3);
    }

    #[test]
    fn records_iterate_in_value_order() {
        let mut index = OccurrenceIndex::new();
        index.insert("series".into(), occurrence("a.rs", 1, ContextTag::Assignment));
        index.insert("channel".into(), occurrence("a.rs", 2, ContextTag::Assignment));
        index.insert("movie".into(), occurrence("a.rs", 3, ContextTag::Assignment));

        let values: Vec<_> = index.records().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["channel", "movie", "series"]);
    }

    #[test]
    fn merge_applies_dedup_across_batches() {
        let mut index = OccurrenceIndex::new();
        let batch = vec![
            RawMatch {
                value: "search".into(),
                occurrence: occurrence("src/x.rs", 5, ContextTag::Constant),
            },
            RawMatch {
                value: "search".into(),
                occurrence: occurrence("src/x.rs", 5, ContextTag::Comparison),
            },
        ];
        index.merge(batch);

        assert_eq!(index.len(), 1);
        let record = index.records().next().unwrap();
        assert_eq!(record.occurrences.len(), 1);
        assert_eq!(record.occurrences[0].context, ContextTag::Constant);
    }
}
