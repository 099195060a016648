//! Rewriting of generated declaration files into runtime-checkable
//! enumerations.
//!
//! Each input file carries one exported type alias. Flat string-literal
//! unions are rewritten into three artifacts: a frozen name→value record, a
//! union type re-derived from the record's values, and a membership
//! predicate. Anything object-shaped or non-literal passes through verbatim
//! (minus comment boilerplate) - the transform is value-preserving, never
//! value-altering.

use regex::Captures;

use crate::macros::lazy_regex;

lazy_regex! {
    // Doc-comment blocks anywhere in the body, including trailing blank space.
    static BLOCK_COMMENT = r"(?s)/\*\*.*?\*/\s*\n?";
}
lazy_regex! {
    static TYPE_ALIAS = r"(?s)export type (\w+)\s*=\s*(?:\|\s*)?(.*?);";
}

/// Transform one declaration file's text.
///
/// Strips the leading comment header and all doc-comment blocks, then
/// rewrites every flat string-literal union alias in place. The result
/// always ends with exactly one trailing newline.
#[must_use]
pub fn transform_declaration(source: &str) -> String {
    let stripped = strip_header(source);
    let stripped = BLOCK_COMMENT.replace_all(&stripped, "");

    let rewritten = TYPE_ALIAS.replace_all(&stripped, |captures: &Captures<'_>| {
        rewrite_alias(&captures[0], &captures[1], &captures[2])
    });

    format!("{}\n", rewritten.trim())
}

/// Drop a single leading comment line (line or block style) plus one
/// following blank line, the header shape the upstream generator emits.
fn strip_header(source: &str) -> String {
    let mut lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let first = lines.first().map_or("", |l| l.trim());
    if first.starts_with("//") || first.starts_with("/*") {
        lines.remove(0);
        if lines.first().is_some_and(|l| l.trim().is_empty()) {
            lines.remove(0);
        }
    }
    lines.join("\n")
}

/// Rewrite one alias, or return it unchanged when it is not a flat
/// string-literal union.
fn rewrite_alias(full_match: &str, type_name: &str, body: &str) -> String {
    // Object-shaped or non-literal aliases are structured types; pass them
    // through untouched.
    let is_object = body.contains('{') || body.contains(':');
    let has_quotes = body.contains('"') || body.contains('\'');
    if is_object || !has_quotes {
        return full_match.to_string();
    }

    let arms: Vec<String> = body
        .split('|')
        .map(|arm| arm.replace(['"', '\'', '\r', '\n'], "").trim().to_string())
        .filter(|arm| !arm.is_empty() && !arm.contains(' ') && !arm.contains(';'))
        .collect();

    if arms.is_empty() {
        return full_match.to_string();
    }

    let const_name = format!("{type_name}s");
    let entries = arms
        .iter()
        .map(|arm| format!("  {}: \"{arm}\"", arm.to_uppercase()))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "export const {const_name} = {{\n{entries},\n}} as const;\n\n\
         export type {type_name} = (typeof {const_name})[keyof typeof {const_name}];\n\n\
         export const is{type_name} = (val: string): val is {type_name} =>\n  \
         Array.prototype.includes.call(Object.values({const_name}), val);"
    )
}

/// Build the aggregated re-export module for every transformed declaration.
///
/// Entries are ordered by type name regardless of input order.
#[must_use]
pub fn build_index(module_names: &[String]) -> String {
    let mut sorted: Vec<&String> = module_names.iter().collect();
    sorted.sort();
    sorted
        .iter()
        .map(|name| format!("export * from './types/{name}';"))
        .collect::<Vec<_>>()
        .join("\n")
}
