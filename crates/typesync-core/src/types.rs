//! Core data types shared across the scanning pipeline.

use std::fmt;

use crate::macros::lazy_regex;

/// The three closed string-enumeration categories the scanner discovers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Content-item type tags (`r#type` field values).
    #[default]
    Content,
    /// "Extra" query-parameter names (`ExtraProp.name` values).
    Extra,
    /// Resource-type names (addon resource identifiers).
    Resource,
}

lazy_regex! {
    static LOWER_ALPHA = r"^[a-z]+$";
}
lazy_regex! {
    static LOWER_SNAKE = r"^[a-z_]+$";
}

impl Category {
    /// Name of the enum declaration this category regenerates.
    #[must_use]
    pub const fn enum_name(self) -> &'static str {
        match self {
            Self::Content => "ContentType",
            Self::Extra => "ExtraType",
            Self::Resource => "ResourceType",
        }
    }

    /// Check a discovered value against the category's format constraint.
    ///
    /// Content and extra names are lowercase alphabetic; resource names are
    /// lowercase with underscores. Applied at classification time so that
    /// rejected values keep their provenance for diagnostics.
    #[must_use]
    pub fn valid_value(self, value: &str) -> bool {
        match self {
            Self::Content | Self::Extra => LOWER_ALPHA.is_match(value),
            Self::Resource => LOWER_SNAKE.is_match(value),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Content => "content",
            Self::Extra => "extra",
            Self::Resource => "resource",
        };
        write!(f, "{name}")
    }
}

/// Classification of *how* a value was found in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextTag {
    /// Field assignment against a literal (`field: "x"`).
    Assignment,
    /// Equality or inequality comparison against a literal.
    Comparison,
    /// Declared constant or constant usage.
    Constant,
    /// Legacy accessor call taking a literal name argument.
    Legacy,
    /// Trait-method body returning a bare string literal.
    Trait,
    /// Found inside unit-test code.
    Test,
}

impl fmt::Display for ContextTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Assignment => "assignment",
            Self::Comparison => "comparison",
            Self::Constant => "constant",
            Self::Legacy => "legacy",
            Self::Trait => "trait",
            Self::Test => "test",
        };
        write!(f, "{name}")
    }
}

/// One provenance record for a discovered value. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Path of the scanned file, relative to the scan root.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// The trimmed source line the value was found on.
    pub raw_text: String,
    /// How the value was found.
    pub context: ContextTag,
}

/// A value yielded by one match rule for one line, before index merging.
#[derive(Debug, Clone)]
pub struct RawMatch {
    /// The literal string value that was discovered.
    pub value: String,
    /// Where and how it was discovered.
    pub occurrence: Occurrence,
}

/// A discovered value together with every place it was seen.
#[derive(Debug, Clone)]
pub struct ValueRecord {
    /// The literal discovered value.
    pub value: String,
    /// Provenance records in scan order, deduplicated by `(file, line)`.
    pub occurrences: Vec<Occurrence>,
}

impl ValueRecord {
    /// Distinct context tags across all occurrences, in first-seen order.
    #[must_use]
    pub fn contexts(&self) -> Vec<ContextTag> {
        let mut seen = Vec::new();
        for occurrence in &self.occurrences {
            if !seen.contains(&occurrence.context) {
                seen.push(occurrence.context);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_constraints_per_category() {
        assert!(Category::Content.valid_value("movie"));
        assert!(!Category::Content.valid_value("addon_catalog"));
        assert!(!Category::Content.valid_value("Movie"));
        assert!(!Category::Content.valid_value(""));

        assert!(Category::Extra.valid_value("search"));
        assert!(!Category::Extra.valid_value("last_videos"));

        assert!(Category::Resource.valid_value("addon_catalog"));
        assert!(Category::Resource.valid_value("stream"));
        assert!(!Category::Resource.valid_value("Stream1"));
    }

    #[test]
    fn contexts_are_distinct_and_ordered() {
        let record = ValueRecord {
            value: "movie".into(),
            occurrences: vec![
                Occurrence {
                    file: "a.rs".into(),
                    line: 1,
                    raw_text: String::new(),
                    context: ContextTag::Assignment,
                },
                Occurrence {
                    file: "b.rs".into(),
                    line: 2,
                    raw_text: String::new(),
                    context: ContextTag::Comparison,
                },
                Occurrence {
                    file: "c.rs".into(),
                    line: 3,
                    raw_text: String::new(),
                    context: ContextTag::Assignment,
                },
            ],
        };

        assert_eq!(
            record.contexts(),
            vec![ContextTag::Assignment, ContextTag::Comparison]
        );
    }
}
