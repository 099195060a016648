//! Resolution of declared constants from the canonical constants text.
//!
//! Two declaration shapes are recognized: plain string constants
//! (`pub const NAME: &str = "value"`) and lazily-initialized record literals
//! whose body carries a `name: "value"` field. A separate pass over the
//! legacy-transport text derives the exclusion set: values whose constants
//! are only referenced from the legacy transport must not be reintroduced as
//! discovered values elsewhere.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use tracing::debug;

use crate::macros::lazy_regex;

lazy_regex! {
    static STR_CONST_EXTRA = r#"pub\s+const\s+(\w+_EXTRA_NAME)\s*:\s*&str\s*=\s*"([^"]+)""#;
}
lazy_regex! {
    static LAZY_EXTRA_PROP = r#"pub\s+static\s+(\w+_EXTRA_PROP)\s*:\s*Lazy<ExtraProp>\s*=\s*Lazy::new\(\|\|\s*ExtraProp\s*\{[^}]*name:\s*"([^"]+)""#;
}
lazy_regex! {
    static STR_CONST_RESOURCE = r#"pub\s+const\s+(\w+_RESOURCE_NAME)\s*:\s*&str\s*=\s*"([^"]+)""#;
}
lazy_regex! {
    static LEGACY_IMPORT_LIST = r"use\s+crate::constants::\{[^}]*\}";
}
lazy_regex! {
    static LEGACY_PROP_IDENT = r"(\w+_EXTRA_PROP)";
}

/// Extra-name constants declared in the canonical constants text.
///
/// Both declaration shapes contribute; names in `exclude` are dropped so
/// legacy-only constants never resolve into the known-constant map.
#[must_use]
pub fn extra_constants(
    constants_text: &str,
    exclude: &BTreeSet<String>,
) -> BTreeMap<String, String> {
    let mut constants = BTreeMap::new();

    for captures in STR_CONST_EXTRA.captures_iter(constants_text) {
        let (name, value) = (&captures[1], &captures[2]);
        if !exclude.contains(name) {
            constants.insert(name.to_string(), value.to_string());
        }
    }

    for captures in LAZY_EXTRA_PROP.captures_iter(constants_text) {
        let (name, value) = (&captures[1], &captures[2]);
        if !exclude.contains(name) {
            constants.insert(name.to_string(), value.to_string());
        }
    }

    debug!(count = constants.len(), "resolved extra-name constants");
    constants
}

/// Resource-name constants declared in the canonical constants text.
#[must_use]
pub fn resource_constants(constants_text: &str) -> BTreeMap<String, String> {
    let mut constants = BTreeMap::new();
    for captures in STR_CONST_RESOURCE.captures_iter(constants_text) {
        constants.insert(captures[1].to_string(), captures[2].to_string());
    }
    debug!(count = constants.len(), "resolved resource-name constants");
    constants
}

/// Constant names imported by the legacy transport.
///
/// The legacy-transport text is expected to carry one import-list statement;
/// every identifier in it matching the legacy suffix convention is
/// collected. Absence of the statement yields an empty set.
#[must_use]
pub fn legacy_import_props(legacy_text: &str) -> BTreeSet<String> {
    let mut props = BTreeSet::new();
    if let Some(import) = LEGACY_IMPORT_LIST.find(legacy_text) {
        for captures in LEGACY_PROP_IDENT.captures_iter(import.as_str()) {
            props.insert(captures[1].to_string());
        }
    }
    props
}

/// Resolve legacy constant names back to their literal values.
///
/// Each name is looked up in the constants text through the record-literal
/// pattern; names without a resolvable `name:` field are skipped.
#[must_use]
pub fn resolve_excluded_values(
    constants_text: &str,
    legacy_props: &BTreeSet<String>,
) -> BTreeSet<String> {
    let mut excluded = BTreeSet::new();
    for prop_name in legacy_props {
        let pattern = format!(r#"{}[^}}]*name:\s*"([^"]+)""#, regex::escape(prop_name));
        let Ok(value_regex) = Regex::new(&pattern) else {
            continue;
        };
        if let Some(captures) = value_regex.captures(constants_text) {
            excluded.insert(captures[1].to_string());
        }
    }
    debug!(count = excluded.len(), "derived legacy exclusion set");
    excluded
}
