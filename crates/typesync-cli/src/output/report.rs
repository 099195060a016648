//! Human-readable occurrence report.

use colored::Colorize;
use typesync_core::Classified;

const BAR_WIDTH: usize = 70;
const SNIPPET_MAX: usize = 60;

/// Print a section header with banner bars.
pub fn print_section(title: &str) {
    println!();
    println!("{}", "═".repeat(BAR_WIDTH));
    println!(" {title}");
    println!("{}", "═".repeat(BAR_WIDTH));
    println!();
}

/// Print one category's occurrence report and partition summary.
pub fn print_category(title: &str, classified: &Classified) {
    print_section(title);

    for record in &classified.records {
        let contexts: Vec<String> = record
            .contexts()
            .iter()
            .map(ToString::to_string)
            .collect();

        println!("  📌 {}", format!("\"{}\"", record.value).bold());
        println!("     Contexts: {}", contexts.join(", "));
        println!("     Occurrences: {}", record.occurrences.len());

        for occurrence in &record.occurrences {
            println!(
                "     {}",
                format!("{}:{}", occurrence.file, occurrence.line).cyan()
            );
            println!("        {}", truncate(&occurrence.raw_text));
        }
        println!();
    }

    if let Some(partition) = &classified.partition {
        if !partition.primary.is_empty() {
            println!("  Primary values:");
            for value in &partition.primary {
                println!("    • \"{value}\"");
            }
            println!();
        }

        if !partition.other.is_empty() {
            println!("  Additional values:");
            for value in &partition.other {
                println!("    • \"{value}\"");
            }
            println!();
        }
    }

    println!("  Total: {} unique values", classified.records.len());
}

fn truncate(snippet: &str) -> String {
    if snippet.chars().count() > SNIPPET_MAX {
        let cut: String = snippet.chars().take(SNIPPET_MAX).collect();
        format!("{cut}...")
    } else {
        snippet.to_string()
    }
}
