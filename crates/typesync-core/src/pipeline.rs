//! Category pipelines: discovery, concurrent scan fan-out, classification,
//! and the final declaration rewrites.
//!
//! File reads for a category are all launched at once and awaited together;
//! computation between suspension points is synchronous, so index merging
//! happens strictly after every read has resolved. The first I/O error
//! aborts the category run - there is no partial-result mode, no retry, and
//! no timeout.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bindings;
use crate::classify::{self, Classified};
use crate::config::{Layout, RESERVED_BINDING_FILE};
use crate::discovery;
use crate::enums;
use crate::error::Result;
use crate::occurrences::OccurrenceIndex;
use crate::resolver;
use crate::scanner::{self, ScanContext};
use crate::types::Category;

/// Classified output of all three categories plus run metadata.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Number of files fed to every category scan.
    pub files_scanned: usize,
    /// Classified content-item type tags.
    pub content: Classified,
    /// Classified extra query-parameter names.
    pub extra: Classified,
    /// Classified resource-type names.
    pub resource: Classified,
}

impl ScanOutcome {
    /// The machine-readable classified lists structure.
    #[must_use]
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            content_types: self.content.values(),
            extra_types: self.extra.values(),
            resource_types: self.resource.values(),
        }
    }
}

/// Combined machine-readable listing of the three classified value lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Classified content-type values, ascending.
    pub content_types: Vec<String>,
    /// Classified extra-name values, ascending.
    pub extra_types: Vec<String>,
    /// Classified resource-name values, ascending.
    pub resource_types: Vec<String>,
}

/// Scan every file with the category's rules and merge into one index.
///
/// The merge loop runs after `try_join_all` resolves, which is what makes
/// the shared index safe without locking.
pub async fn scan_category(
    cx: &ScanContext,
    root: &Path,
    files: &[PathBuf],
) -> Result<OccurrenceIndex> {
    let scans = files.iter().map(|file| scanner::scan_file(cx, root, file));
    let batches = try_join_all(scans).await?;

    let mut index = OccurrenceIndex::new();
    for batch in batches {
        index.merge(batch);
    }
    debug!(category = %cx.category, values = index.len(), "merged category index");
    Ok(index)
}

async fn content_pipeline(layout: &Layout, files: &[PathBuf]) -> Result<Classified> {
    let cx = ScanContext::for_category(Category::Content);
    let index = scan_category(&cx, layout.core_dir(), files).await?;
    Ok(classify::classify(Category::Content, &index, &cx.constants))
}

async fn extra_pipeline(layout: &Layout, files: &[PathBuf]) -> Result<Classified> {
    let constants_text = tokio::fs::read_to_string(layout.constants_path()).await?;
    let legacy_text = tokio::fs::read_to_string(layout.legacy_transport_path()).await?;

    let legacy_props = resolver::legacy_import_props(&legacy_text);
    let constants = resolver::extra_constants(&constants_text, &legacy_props);
    let excluded = resolver::resolve_excluded_values(&constants_text, &legacy_props);

    let cx = ScanContext {
        category: Category::Extra,
        constants,
        excluded,
    };
    let index = scan_category(&cx, layout.core_dir(), files).await?;
    Ok(classify::classify(Category::Extra, &index, &cx.constants))
}

async fn resource_pipeline(layout: &Layout, files: &[PathBuf]) -> Result<Classified> {
    let constants_text = tokio::fs::read_to_string(layout.constants_path()).await?;
    let constants = resolver::resource_constants(&constants_text);

    let cx = ScanContext {
        category: Category::Resource,
        constants,
        ..ScanContext::default()
    };
    let index = scan_category(&cx, layout.core_dir(), files).await?;
    Ok(classify::classify(Category::Resource, &index, &cx.constants))
}

/// Run all three category scans over the core checkout.
///
/// The core-presence precondition must already have been checked; a missing
/// tree surfaces here as an I/O error instead of a remediation message.
pub async fn run_scan(layout: &Layout) -> Result<ScanOutcome> {
    let files = discovery::collect_files(layout.core_dir(), "rs").await?;
    info!(
        files = files.len(),
        root = %layout.core_dir().display(),
        "scanning source tree"
    );

    let (content, extra, resource) = tokio::try_join!(
        content_pipeline(layout, &files),
        extra_pipeline(layout, &files),
        resource_pipeline(layout, &files),
    )?;

    Ok(ScanOutcome {
        files_scanned: files.len(),
        content,
        extra,
        resource,
    })
}

/// Result of one enum-block rewrite attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumUpdate {
    /// The block was found and regenerated with this many variants.
    Updated {
        /// Enum declaration name.
        name: &'static str,
        /// Number of variants emitted.
        variants: usize,
    },
    /// The block was not found; the category's update was skipped.
    Missing {
        /// Enum declaration name.
        name: &'static str,
    },
}

/// Rewrite the three enum blocks in the canonical constants text.
///
/// The file is read once, all three replacements are applied in memory, and
/// the result is written back in a single pass. A missing block is a
/// warning, not a failure; the remaining categories still update.
pub async fn apply_enum_updates(layout: &Layout, outcome: &ScanOutcome) -> Result<Vec<EnumUpdate>> {
    let constants_path = layout.constants_path();
    let mut content = tokio::fs::read_to_string(&constants_path).await?;
    let mut updates = Vec::new();

    let categories = [
        (Category::Content, &outcome.content),
        (Category::Extra, &outcome.extra),
        (Category::Resource, &outcome.resource),
    ];
    for (category, classified) in categories {
        let name = category.enum_name();
        let values = classified.values();
        match enums::sync_enum(&content, name, &values)? {
            Some(rewritten) => {
                content = rewritten;
                updates.push(EnumUpdate::Updated {
                    name,
                    variants: values.len(),
                });
            },
            None => {
                warn!(enum_name = name, "enum block not found, skipping update");
                updates.push(EnumUpdate::Missing { name });
            },
        }
    }

    tokio::fs::write(&constants_path, content).await?;
    Ok(updates)
}

/// Transformed binding modules, ordered by type name.
#[derive(Debug)]
pub struct BindingsOutcome {
    /// Module (type) names that were written to the destination directory.
    pub modules: Vec<String>,
}

/// Transform every declaration file and write the aggregated index.
///
/// The destination directory is reset before writing. Transforms run with
/// unordered concurrency; the index is emitted only after every file has
/// completed.
pub async fn run_bindings(layout: &Layout) -> Result<BindingsOutcome> {
    let bindings_dir = layout.bindings_dir();
    let types_dir = layout.types_dir();

    let mut declaration_files = Vec::new();
    let mut entries = tokio::fs::read_dir(&bindings_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_file()
            && name.ends_with(".ts")
            && name != RESERVED_BINDING_FILE
        {
            declaration_files.push(path);
        }
    }
    declaration_files.sort();

    match tokio::fs::remove_dir_all(&types_dir).await {
        Ok(()) => {},
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
        Err(e) => return Err(e.into()),
    }
    tokio::fs::create_dir_all(&types_dir).await?;

    let transforms = declaration_files.iter().map(|path| {
        let types_dir = types_dir.clone();
        async move {
            let source = tokio::fs::read_to_string(path).await?;
            let output = bindings::transform_declaration(&source);
            let file_name = path.file_name().map_or_else(
                || RESERVED_BINDING_FILE.to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            tokio::fs::write(types_dir.join(&file_name), output).await?;
            Ok::<String, crate::Error>(
                file_name.trim_end_matches(".ts").to_string(),
            )
        }
    });
    let mut modules = try_join_all(transforms).await?;
    modules.sort();

    let index = bindings::build_index(&modules);
    tokio::fs::write(layout.index_path(), index).await?;
    info!(
        modules = modules.len(),
        destination = %types_dir.display(),
        "wrote transformed bindings and index"
    );

    Ok(BindingsOutcome { modules })
}
