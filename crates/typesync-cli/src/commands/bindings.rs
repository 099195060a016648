//! Bindings command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use typesync_core::{Layout, pipeline};

/// Execute the bindings command.
pub async fn execute(root: &Path, target: &Path) -> Result<()> {
    let layout = Layout::new(root, target);
    layout
        .ensure_core_present()
        .context("bindings precondition failed")?;
    layout
        .ensure_bindings_present()
        .context("bindings precondition failed")?;

    let outcome = pipeline::run_bindings(&layout)
        .await
        .with_context(|| format!("failed to transform bindings under {}", root.display()))?;

    println!(
        "Transformed {} declaration files into {}",
        outcome.modules.len().to_string().bold(),
        layout.types_dir().display()
    );
    for module in &outcome.modules {
        println!("  {}", module.green());
    }
    println!("Wrote {}", layout.index_path().display());

    Ok(())
}
