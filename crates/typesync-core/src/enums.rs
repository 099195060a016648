//! Regeneration of enum declarations inside the canonical constants text.
//!
//! An enum block is located by its `pub enum Name {` header and the first
//! closing brace after it, and its interior is replaced wholesale with the
//! classified variant list. Rewrites are idempotent and never touch text
//! outside the located span.

use regex::Regex;

use crate::error::{Error, Result};

/// Convert a snake_case value to the PascalCase identifier form used for
/// enum variants.
#[must_use]
pub fn to_pascal_case(value: &str) -> String {
    value
        .split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect()
}

/// Replace the variant list of `pub enum <name> { ... }` in `content`.
///
/// Returns `Ok(None)` when the enum block is not present, leaving the
/// decision to warn and skip to the caller; the whole-category update is
/// non-fatal by design. The returned string is byte-identical when applied
/// a second time with the same values.
pub fn sync_enum(content: &str, name: &str, values: &[String]) -> Result<Option<String>> {
    let pattern = format!(r"(pub enum {}\s*\{{)[^}}]*(\}})", regex::escape(name));
    let block_regex = Regex::new(&pattern)
        .map_err(|e| Error::Parse(format!("invalid enum block pattern for {name}: {e}")))?;

    let Some(captures) = block_regex.captures(content) else {
        return Ok(None);
    };

    let variants = values
        .iter()
        .map(|value| format!("    {},", to_pascal_case(value)))
        .collect::<Vec<_>>()
        .join("\n");
    let replacement = format!("{}\n{variants}\n{}", &captures[1], &captures[2]);

    // NoExpand keeps literal `$` in regenerated text out of expansion.
    Ok(Some(
        block_regex
            .replace(content, regex::NoExpand(replacement.as_str()))
            .into_owned(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CONSTANTS: &str = "\
pub const CATALOG_RESOURCE_NAME: &str = \"catalog\";

pub enum ContentType {
    Movie,
}

pub enum ResourceType {
    Catalog,
    Meta,
}
";

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn pascal_case_conversion() {
        assert_eq!(to_pascal_case("movie"), "Movie");
        assert_eq!(to_pascal_case("addon_catalog"), "AddonCatalog");
        assert_eq!(to_pascal_case("a_b_c"), "ABC");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn rewrites_variant_list_wholesale() {
        let updated = sync_enum(CONSTANTS, "ContentType", &values(&["channel", "movie", "series"]))
            .unwrap()
            .unwrap();
        assert!(updated.contains(
            "pub enum ContentType {\n    Channel,\n    Movie,\n    Series,\n}"
        ));
    }

    #[test]
    fn missing_block_is_not_fatal() {
        let result = sync_enum(CONSTANTS, "ExtraType", &values(&["search"])).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn rewrite_is_idempotent() {
        let classified = values(&["channel", "movie"]);
        let first = sync_enum(CONSTANTS, "ContentType", &classified)
            .unwrap()
            .unwrap();
        let second = sync_enum(&first, "ContentType", &classified)
            .unwrap()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unrelated_enum_blocks_are_untouched() {
        let updated = sync_enum(CONSTANTS, "ContentType", &values(&["movie"]))
            .unwrap()
            .unwrap();
        assert!(updated.contains("pub enum ResourceType {\n    Catalog,\n    Meta,\n}"));
        assert!(updated.contains("pub const CATALOG_RESOURCE_NAME: &str = \"catalog\";"));
    }

    #[test]
    fn snake_case_values_become_pascal_variants() {
        let updated = sync_enum(CONSTANTS, "ResourceType", &values(&["addon_catalog", "stream"]))
            .unwrap()
            .unwrap();
        assert!(updated.contains(
            "pub enum ResourceType {\n    AddonCatalog,\n    Stream,\n}"
        ));
    }
}
