//! Match rules recognizing the surface syntactic forms a value can appear in.
//!
//! Each stateless rule is one row of a rule table: a compiled pattern, the
//! context tag it assigns, and how many matches to take from a line. Rules
//! are pure functions over a single line of text and never fail; a
//! non-matching line yields nothing.
//!
//! Two families of matches cannot be expressed as a static table row and get
//! dedicated functions instead: constant-driven matches (they depend on the
//! name→value map built by the resolver) and the multi-line trait-return
//! match (it confirms an enclosing function signature in a short backward
//! window).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::macros::lazy_regex;
use crate::types::ContextTag;

/// How many matches a rule takes from one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every non-overlapping match on the line.
    All,
    /// Only the first match.
    First,
}

/// One row of a stateless rule table.
pub struct MatchRule {
    /// Short identifier used in trace output.
    pub name: &'static str,
    /// Pattern with the value in capture group 1.
    pub pattern: &'static Lazy<Regex>,
    /// Context tag assigned to matches.
    pub context: ContextTag,
    /// First match only, or every match on the line.
    pub mode: MatchMode,
    /// Whether matches inside unit-test files are tagged [`ContextTag::Test`]
    /// instead of the rule's own tag.
    pub test_sensitive: bool,
}

lazy_regex! {
    static CONTENT_ASSIGN = r##"r#type:\s*"([^"]+)"(?:\.to_owned\(\)|\.into\(\)|\.to_string\(\))?"##;
}
lazy_regex! {
    static CONTENT_COMPARE = r##"r#type\s*[!=]=\s*"([^"]+)""##;
}
lazy_regex! {
    // Priority-table tuples such as ("movie", 4) or ("other", i32::MIN).
    static CONTENT_PRIORITY = r#"\("([a-z]+)",\s*(?:\d+|i32::MIN)\)"#;
}

/// Rules for content-item type tags.
pub static CONTENT_RULES: [MatchRule; 3] = [
    MatchRule {
        name: "type-assignment",
        pattern: &CONTENT_ASSIGN,
        context: ContextTag::Assignment,
        mode: MatchMode::All,
        test_sensitive: true,
    },
    MatchRule {
        name: "type-comparison",
        pattern: &CONTENT_COMPARE,
        context: ContextTag::Comparison,
        mode: MatchMode::All,
        test_sensitive: false,
    },
    MatchRule {
        name: "priority-tuple",
        pattern: &CONTENT_PRIORITY,
        context: ContextTag::Constant,
        mode: MatchMode::All,
        test_sensitive: false,
    },
];

lazy_regex! {
    static EXTRA_LEGACY_ACCESSOR = r#"get_extra(?:_first_value|_values?)?\s*\(\s*"([^"]+)"\s*\)"#;
}
lazy_regex! {
    static EXTRA_NAME_COMPARE = r#"extra_name\s*[!=]=\s*"([^"]+)""#;
}

/// Stateless rules for "extra" query-parameter names.
///
/// The record-literal block match is stateful and lives in the scanner; the
/// constant-driven matches are in [`extra_constant_matches`].
pub static EXTRA_RULES: [MatchRule; 2] = [
    MatchRule {
        name: "legacy-accessor",
        pattern: &EXTRA_LEGACY_ACCESSOR,
        context: ContextTag::Legacy,
        mode: MatchMode::First,
        test_sensitive: false,
    },
    MatchRule {
        name: "extra-name-comparison",
        pattern: &EXTRA_NAME_COMPARE,
        context: ContextTag::Comparison,
        mode: MatchMode::First,
        test_sensitive: false,
    },
];

lazy_regex! {
    static RESOURCE_ASSIGN = r#"resource:\s*"([a-z_]+)"(?:\.to_owned\(\)|\.into\(\)|\.to_string\(\))?"#;
}
lazy_regex! {
    static RESOURCE_SHORT = r#"ManifestResource::Short\("([^"]+)"(?:\.into\(\))?\)"#;
}
lazy_regex! {
    static RESOURCE_TRAIT_INLINE = r#"fn\s+resource\(\)\s*->\s*&'static\s+str\s*\{\s*"([^"]+)"\s*\}"#;
}
lazy_regex! {
    static RESOURCE_COMPARE = r#"(?:path\.)?resource\s*[!=]=\s*"([^"]+)""#;
}

/// Stateless rules for resource-type names.
pub static RESOURCE_RULES: [MatchRule; 4] = [
    MatchRule {
        name: "resource-assignment",
        pattern: &RESOURCE_ASSIGN,
        context: ContextTag::Assignment,
        mode: MatchMode::All,
        test_sensitive: false,
    },
    MatchRule {
        name: "manifest-resource-short",
        pattern: &RESOURCE_SHORT,
        context: ContextTag::Legacy,
        mode: MatchMode::All,
        test_sensitive: false,
    },
    MatchRule {
        name: "resource-trait-inline",
        pattern: &RESOURCE_TRAIT_INLINE,
        context: ContextTag::Trait,
        mode: MatchMode::First,
        test_sensitive: false,
    },
    MatchRule {
        name: "resource-comparison",
        pattern: &RESOURCE_COMPARE,
        context: ContextTag::Comparison,
        mode: MatchMode::All,
        test_sensitive: false,
    },
];

/// Apply a rule table to one line, yielding `(value, context)` pairs.
///
/// The line must already be known not to be a full-line comment.
#[must_use]
pub fn apply_rules(
    rules: &[MatchRule],
    line: &str,
    is_test_file: bool,
) -> Vec<(String, ContextTag)> {
    let mut found = Vec::new();
    for rule in rules {
        let context = if rule.test_sensitive && is_test_file {
            ContextTag::Test
        } else {
            rule.context
        };
        match rule.mode {
            MatchMode::All => {
                for captures in rule.pattern.captures_iter(line) {
                    if let Some(value) = captures.get(1) {
                        found.push((value.as_str().to_string(), context));
                    }
                }
            },
            MatchMode::First => {
                if let Some(captures) = rule.pattern.captures(line) {
                    if let Some(value) = captures.get(1) {
                        found.push((value.as_str().to_string(), context));
                    }
                }
            },
        }
    }
    found
}

/// Constant-driven matches for extra names.
///
/// `constants` maps declared constant names to their literal values; every
/// entry is checked against the line for three usage shapes: the lazy
/// declaration itself, the plain-constant declaration, and field access on
/// the lazy value.
#[must_use]
pub fn extra_constant_matches(
    line: &str,
    constants: &BTreeMap<String, String>,
) -> Vec<(String, ContextTag)> {
    let mut found = Vec::new();
    for (const_name, value) in constants {
        let is_lazy_decl = (line.contains("LazyLock<ExtraProp>")
            || line.contains("Lazy<ExtraProp>"))
            && line.contains(const_name.as_str());
        if is_lazy_decl {
            found.push((value.clone(), ContextTag::Constant));
        }

        if const_name.ends_with("_EXTRA_NAME")
            && line.contains(const_name.as_str())
            && line.contains(&format!("\"{value}\""))
        {
            found.push((value.clone(), ContextTag::Constant));
        }

        if line.contains(&format!("{const_name}.name"))
            && !line.contains("LazyLock")
            && !line.contains("Lazy<")
        {
            found.push((value.clone(), ContextTag::Comparison));
        }
    }
    found
}

/// Constant-driven matches for resource names.
#[must_use]
pub fn resource_constant_matches(
    line: &str,
    constants: &BTreeMap<String, String>,
) -> Vec<(String, ContextTag)> {
    let mut found = Vec::new();
    for (const_name, value) in constants {
        if !line.contains(const_name.as_str()) {
            continue;
        }
        if line.contains(&format!("\"{value}\"")) && line.contains("pub const") {
            found.push((value.clone(), ContextTag::Constant));
        }
        if !line.contains("pub const") && !line.contains("use ") {
            found.push((value.clone(), ContextTag::Comparison));
        }
    }
    found
}

lazy_regex! {
    static BARE_LITERAL_LINE = r#"^\s*"([a-z_]+)"\s*$"#;
}
lazy_regex! {
    static RESOURCE_TRAIT_SIGNATURE = r"fn\s+resource\(\)\s*->\s*&'static\s+str\s*\{";
}

/// Backward window (in lines) searched for the enclosing trait signature.
const TRAIT_WINDOW: usize = 3;

/// Match a bare string-literal return inside a multi-line `fn resource()`.
///
/// `index` is the 0-based position of the candidate line within `lines`.
/// The enclosing signature must appear within the preceding
/// [`TRAIT_WINDOW`] lines, otherwise a bare literal is not treated as a
/// resource name.
#[must_use]
pub fn trait_return_literal(lines: &[&str], index: usize) -> Option<String> {
    let captures = BARE_LITERAL_LINE.captures(lines.get(index)?)?;
    let window_start = index.saturating_sub(TRAIT_WINDOW);
    let preceding = &lines[window_start..index];
    if preceding
        .iter()
        .any(|line| RESOURCE_TRAIT_SIGNATURE.is_match(line))
    {
        captures.get(1).map(|value| value.as_str().to_string())
    } else {
        None
    }
}
