//! Final filtering, ordering, and partitioning of discovered values.
//!
//! The classified list for a category is the committed external contract:
//! lexicographically ascending, duplicate-free, and stable for identical
//! inputs regardless of scan completion order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::occurrences::OccurrenceIndex;
use crate::types::{Category, ContextTag, ValueRecord};

/// Values that are serialization round-trip fixtures, not real extra names.
const SERDE_TEST_ARTIFACTS: [&str; 3] = ["ExtraProp", "OptionsLimit", "name"];

/// Path fragment marking serialization-test fixtures.
const SERDE_PATH_MARKER: &str = "serde";

/// Primary/other split of a classified list, for reporting only.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Values that are also declared constants.
    pub primary: Vec<String>,
    /// Values discovered in source but not declared.
    pub other: Vec<String>,
}

/// The classified output of one category run.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// Surviving records in emission order.
    pub records: Vec<ValueRecord>,
    /// Primary/other partition; present for categories with a resolver map.
    pub partition: Option<Partition>,
}

impl Classified {
    /// The bare value list in emission order.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.records.iter().map(|r| r.value.clone()).collect()
    }
}

/// Classify one category's occurrence index.
///
/// `constants` is the resolver's name→value map for the category (empty for
/// content types). Records iterate out of the index already sorted and
/// deduplicated, so classification only filters and partitions.
///
/// The extra-name policy keeps two overlapping checks on purpose: a value
/// that resolves to a known constant always survives, and otherwise it must
/// not be a serialization fixture and must have at least one occurrence that
/// is either non-test or outside a serialization-test file. The precedence
/// between the two is under product-owner review; do not fold them together.
#[must_use]
pub fn classify(
    category: Category,
    index: &OccurrenceIndex,
    constants: &BTreeMap<String, String>,
) -> Classified {
    let records: Vec<ValueRecord> = index
        .records()
        .filter(|record| category.valid_value(&record.value))
        .filter(|record| survives_exclusion(category, record, constants))
        .cloned()
        .collect();

    let partition = match category {
        Category::Content => None,
        Category::Extra | Category::Resource => {
            let mut partition = Partition::default();
            for record in &records {
                if is_known_constant(&record.value, constants) {
                    partition.primary.push(record.value.clone());
                } else {
                    partition.other.push(record.value.clone());
                }
            }
            Some(partition)
        },
    };

    debug!(
        category = %category,
        discovered = index.len(),
        classified = records.len(),
        "classified category"
    );

    Classified { records, partition }
}

fn is_known_constant(value: &str, constants: &BTreeMap<String, String>) -> bool {
    constants.values().any(|known| known == value)
}

fn survives_exclusion(
    category: Category,
    record: &ValueRecord,
    constants: &BTreeMap<String, String>,
) -> bool {
    match category {
        Category::Content => record
            .occurrences
            .iter()
            .any(|o| o.context != ContextTag::Test),
        Category::Extra => {
            let known = is_known_constant(&record.value, constants);
            let artifact = SERDE_TEST_ARTIFACTS.contains(&record.value.as_str());
            let has_non_test_usage = record.occurrences.iter().any(|o| {
                o.context != ContextTag::Test || !o.file.contains(SERDE_PATH_MARKER)
            });
            known || (!artifact && has_non_test_usage)
        },
        Category::Resource => record
            .occurrences
            .iter()
            .any(|o| !o.file.contains(SERDE_PATH_MARKER)),
    }
}
