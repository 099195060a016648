//! Machine-readable output.

use anyhow::Result;
use typesync_core::ScanSummary;

/// Print the combined classified-lists structure as pretty JSON.
pub fn print_summary(summary: &ScanSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
