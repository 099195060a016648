//! Scan command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use typesync_core::{EnumUpdate, Layout, pipeline};

use crate::output::{OutputFormat, json, report};

/// Execute the scan command.
pub async fn execute(
    root: &Path,
    target: &Path,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let layout = Layout::new(root, target);
    layout
        .ensure_core_present()
        .context("scan precondition failed")?;

    let outcome = pipeline::run_scan(&layout)
        .await
        .with_context(|| format!("failed to scan {}", root.display()))?;

    match format {
        OutputFormat::Text => print_text(&outcome),
        OutputFormat::Json => json::print_summary(&outcome.summary())?,
    }

    if dry_run {
        if matches!(format, OutputFormat::Text) {
            println!();
            println!("  Dry run: constants file left untouched");
        }
        return Ok(());
    }

    let updates = pipeline::apply_enum_updates(&layout, &outcome)
        .await
        .context("failed to rewrite enum declarations")?;

    if matches!(format, OutputFormat::Text) {
        print_updates(&updates);
    }

    Ok(())
}

fn print_text(outcome: &pipeline::ScanOutcome) {
    println!(
        "Scanning {} Rust files...",
        outcome.files_scanned.to_string().bold()
    );

    report::print_category("CONTENT TYPES (meta item type field)", &outcome.content);
    report::print_category("EXTRA TYPES (ExtraProp.name values)", &outcome.extra);
    report::print_category("RESOURCE TYPES (resource names)", &outcome.resource);

    report::print_section("JSON OUTPUT");
    if let Ok(body) = serde_json::to_string_pretty(&outcome.summary()) {
        println!("{body}");
    }
}

fn print_updates(updates: &[EnumUpdate]) {
    report::print_section("UPDATING ENUMS IN constants.rs");
    for update in updates {
        match update {
            EnumUpdate::Updated { name, variants } => {
                println!(
                    "  Updated {} enum with {} variants",
                    name.green(),
                    variants
                );
            },
            EnumUpdate::Missing { name } => {
                println!("  {} enum not found, skipped", name.yellow());
            },
        }
    }
}
