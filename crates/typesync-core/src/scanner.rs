//! Per-file scanning: applies the match rules line-by-line and collects raw
//! matches for the caller to merge.
//!
//! A scan never mutates shared state. Each call reads one file, produces a
//! `Vec<RawMatch>`, and hands it back; the category pipeline merges those
//! vectors into one [`crate::OccurrenceIndex`] after all concurrent reads
//! have resolved. That structure is what makes the concurrent fan-out safe.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::trace;

use crate::error::Result;
use crate::macros::lazy_regex;
use crate::rules::{
    self, CONTENT_RULES, EXTRA_RULES, RESOURCE_RULES, extra_constant_matches,
    resource_constant_matches,
};
use crate::types::{Category, ContextTag, Occurrence, RawMatch};

/// Shared, read-only inputs of one category scan.
#[derive(Debug, Default)]
pub struct ScanContext {
    /// Which category's rules to apply.
    pub category: Category,
    /// Known constants (name → value) from the resolver; empty for content.
    pub constants: BTreeMap<String, String>,
    /// Values to drop at match time (legacy-derived); extra category only.
    pub excluded: BTreeSet<String>,
}

impl ScanContext {
    /// Context for a category without resolver inputs.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }
}

/// Path fragment marking unit-test sources.
const TEST_PATH_MARKER: &str = "unit_tests";

lazy_regex! {
    static RECORD_BLOCK_OPEN = r"ExtraProp\s*\{";
}
lazy_regex! {
    static RECORD_NAME_FIELD = r#"name:\s*"([^"]+)""#;
}

/// Explicit state machine tracking a multi-line record-literal block.
///
/// Transitions on every `{` and `}` of a line; the running depth is the
/// only carried state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Outside,
    InsideBlock { depth: usize },
}

impl BlockState {
    fn step(self, line: &str) -> Self {
        let mut state = self;
        if RECORD_BLOCK_OPEN.is_match(line) {
            state = Self::InsideBlock { depth: 1 };
        }
        let Self::InsideBlock { mut depth } = state else {
            return state;
        };
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {},
            }
        }
        // The opening line itself counts its own brace once more.
        if RECORD_BLOCK_OPEN.is_match(line) {
            depth = depth.saturating_sub(1);
        }
        if depth == 0 {
            Self::Outside
        } else {
            Self::InsideBlock { depth }
        }
    }

    const fn inside(self) -> bool {
        matches!(self, Self::InsideBlock { .. })
    }
}

/// Apply the category's rules to already-split lines.
///
/// Pure function over text; exists separately from [`scan_file`] so the
/// matching logic is testable without touching the filesystem.
#[must_use]
pub fn match_lines(cx: &ScanContext, relative_path: &str, lines: &[&str]) -> Vec<RawMatch> {
    let is_test_file = relative_path.contains(TEST_PATH_MARKER);
    let mut found = Vec::new();
    let mut block = BlockState::Outside;

    for (i, line) in lines.iter().enumerate() {
        let line_number = i + 1;
        let trimmed = line.trim();

        if trimmed.starts_with("//") || trimmed.starts_with('*') {
            continue;
        }

        let mut push = |value: String, context: ContextTag| {
            found.push(RawMatch {
                value,
                occurrence: Occurrence {
                    file: relative_path.to_string(),
                    line: line_number,
                    raw_text: trimmed.to_string(),
                    context,
                },
            });
        };

        match cx.category {
            Category::Content => {
                for (value, context) in rules::apply_rules(&CONTENT_RULES, line, is_test_file) {
                    push(value, context);
                }
            },
            Category::Extra => {
                // Entering or continuing a record-literal block makes the
                // name field on this line an assignment occurrence.
                let entering = RECORD_BLOCK_OPEN.is_match(line);
                if block.inside() || entering {
                    if let Some(captures) = RECORD_NAME_FIELD.captures(line) {
                        let value = captures[1].to_string();
                        if !cx.excluded.contains(&value) {
                            let context = if is_test_file {
                                ContextTag::Test
                            } else {
                                ContextTag::Assignment
                            };
                            push(value, context);
                        }
                    }
                }
                block = block.step(line);

                for (value, context) in extra_constant_matches(line, &cx.constants) {
                    push(value, context);
                }

                for (value, context) in rules::apply_rules(&EXTRA_RULES, line, is_test_file) {
                    if !cx.excluded.contains(&value) {
                        push(value, context);
                    }
                }
            },
            Category::Resource => {
                for (value, context) in resource_constant_matches(line, &cx.constants) {
                    push(value, context);
                }
                for (value, context) in rules::apply_rules(&RESOURCE_RULES, line, is_test_file) {
                    push(value, context);
                }
                if let Some(value) = rules::trait_return_literal(lines, i) {
                    push(value, ContextTag::Trait);
                }
            },
        }
    }

    found
}

/// Read one file and scan it with the category's rules.
///
/// `root` is stripped from reported paths so occurrences stay stable across
/// machines. I/O failures propagate and abort the category run.
pub async fn scan_file(cx: &ScanContext, root: &Path, path: &Path) -> Result<Vec<RawMatch>> {
    let content = tokio::fs::read_to_string(path).await?;
    let relative_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned();

    let lines: Vec<&str> = content.lines().collect();
    let matches = match_lines(cx, &relative_path, &lines);
    trace!(
        file = %relative_path,
        category = %cx.category,
        matches = matches.len(),
        "scanned file"
    );
    Ok(matches)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn values(matches: &[RawMatch]) -> Vec<(&str, ContextTag)> {
        matches
            .iter()
            .map(|m| (m.value.as_str(), m.occurrence.context))
            .collect()
    }

    #[test]
    fn comment_lines_are_skipped() {
        let cx = ScanContext::for_category(Category::Content);
        let lines = vec![
            r#"// r#type: "movie".to_owned(),"#,
            r#" * r#type: "series".to_owned(),"#,
            r#"r#type: "channel".to_owned(),"#,
        ];
        let matches = match_lines(&cx, "src/item.rs", &lines);
        assert_eq!(values(&matches), vec![("channel", ContextTag::Assignment)]);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let cx = ScanContext::for_category(Category::Content);
        let lines = vec!["", r#"r#type: "movie".to_owned(),"#];
        let matches = match_lines(&cx, "src/item.rs", &lines);
        assert_eq!(matches[0].occurrence.line, 2);
    }

    #[test]
    fn test_files_tag_assignments_as_test() {
        let cx = ScanContext::for_category(Category::Content);
        let lines = vec![r#"r#type: "movie".to_owned(),"#];
        let matches = match_lines(&cx, "src/unit_tests/item.rs", &lines);
        assert_eq!(values(&matches), vec![("movie", ContextTag::Test)]);
    }

    #[test]
    fn record_block_name_field_matches_across_lines() {
        let cx = ScanContext::for_category(Category::Extra);
        let lines = vec![
            "let prop = ExtraProp {",
            r#"    name: "genre".to_owned(),"#,
            "    is_required: false,",
            "};",
            r#"    name: "outside".to_owned(),"#,
        ];
        let matches = match_lines(&cx, "src/catalog.rs", &lines);
        assert_eq!(values(&matches), vec![("genre", ContextTag::Assignment)]);
    }

    #[test]
    fn record_block_tracks_nested_braces() {
        let cx = ScanContext::for_category(Category::Extra);
        let lines = vec![
            "let prop = ExtraProp {",
            "    options: vec![OptionValue { weight: 1 }],",
            r#"    name: "genre".to_owned(),"#,
            "};",
        ];
        let matches = match_lines(&cx, "src/catalog.rs", &lines);
        assert_eq!(values(&matches), vec![("genre", ContextTag::Assignment)]);
    }

    #[test]
    fn single_line_record_closes_immediately() {
        let cx = ScanContext::for_category(Category::Extra);
        let lines = vec![
            r#"let prop = ExtraProp { name: "search".into() };"#,
            r#"    name: "after".to_owned(),"#,
        ];
        let matches = match_lines(&cx, "src/catalog.rs", &lines);
        assert_eq!(values(&matches), vec![("search", ContextTag::Assignment)]);
    }

    #[test]
    fn excluded_values_are_dropped_at_match_time() {
        let mut cx = ScanContext::for_category(Category::Extra);
        cx.excluded.insert("videoHash".to_string());
        let lines = vec![
            r#"let prop = ExtraProp { name: "videoHash".into() };"#,
            r#"extra.get_extra("videoHash")"#,
            r#"extra.get_extra("search")"#,
        ];
        let matches = match_lines(&cx, "src/legacy.rs", &lines);
        assert_eq!(values(&matches), vec![("search", ContextTag::Legacy)]);
    }

    #[test]
    fn resource_trait_multi_line_return_matches() {
        let cx = ScanContext::for_category(Category::Resource);
        let lines = vec![
            "    fn resource() -> &'static str {",
            r#"        "addon_catalog""#,
            "    }",
        ];
        let matches = match_lines(&cx, "src/addons.rs", &lines);
        assert_eq!(values(&matches), vec![("addon_catalog", ContextTag::Trait)]);
    }

    #[tokio::test]
    async fn scan_file_reports_root_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        let file = src.join("item.rs");
        std::fs::write(&file, "r#type: \"movie\".to_owned(),\n").unwrap();

        let cx = ScanContext::for_category(Category::Content);
        let matches = scan_file(&cx, dir.path(), &file).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].occurrence.file, "src/item.rs");
    }

    #[tokio::test]
    async fn scan_file_propagates_missing_file_errors() {
        let cx = ScanContext::for_category(Category::Content);
        let result = scan_file(
            &cx,
            std::path::Path::new("/nonexistent"),
            std::path::Path::new("/nonexistent/file.rs"),
        )
        .await;
        assert!(result.is_err());
    }
}
