//! Console report text for the three binaries.
//!
//! Kept separate from the binaries so the wording is testable.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use crate::error::{FixtureError, StripError};
use crate::strip::{FileOutcome, StripSummary};

/// Path as shown to the user: relative to `root` when possible, without a
/// leading `./`.
pub fn display_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative.strip_prefix(".").unwrap_or(relative);
    relative.display().to_string()
}

/// One-line failure message. A missing feature gets its install hint; any
/// other failure is reported as an error while doing `action`.
pub fn failure_line(action: &str, err: &FixtureError) -> String {
    if err.is_missing_dependency() {
        format!("❌ {}", err)
    } else {
        format!("❌ Error {}: {}", action, err)
    }
}

fn numbered(lines: &[String]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn documents_report(files: &[PathBuf], root: &Path, app_url: &str) -> String {
    let created: Vec<String> = files.iter().map(|f| display_path(f, root)).collect();
    let steps = vec![
        format!("Go to {}/#/new-option", app_url.trim_end_matches('/')),
        "Click 'Add Files' button".to_string(),
        "Select one of the created DOCX files".to_string(),
        "Check if file preview appears".to_string(),
        "Submit the form to test file upload".to_string(),
    ];

    format!(
        "\n✅ Created {} sample DOCX files:\n{}\n\n🧪 How to test:\n{}",
        files.len(),
        numbered(&created),
        numbered(&steps)
    )
}

pub fn image_created_line(file: &Path, root: &Path) -> String {
    format!("✅ Created {}", display_path(file, root))
}

pub fn images_report(files: &[PathBuf], root: &Path, app_url: &str) -> String {
    let descriptions = ["Detailed agent card", "Simple text for basic testing"];
    let created: Vec<String> = files
        .iter()
        .zip(descriptions.iter().chain(std::iter::repeat(&"Test image")))
        .map(|(f, desc)| format!("{} - {}", display_path(f, root), desc))
        .collect();
    let steps = vec![
        format!("Go to {}/#/new-agent", app_url.trim_end_matches('/')),
        "Click the OCR upload area".to_string(),
        "Select one of the created images".to_string(),
        "Check if the agent information is extracted correctly".to_string(),
    ];

    format!(
        "\n📋 Test Images Created:\n{}\n\n🧪 How to test:\n{}",
        numbered(&created),
        numbered(&steps)
    )
}

/// Lines for one processed file: `Fixed:` if it was rewritten, one warning
/// per occurrence left in place, or the error that stopped it.
pub fn strip_entry_lines(
    entry: &Result<FileOutcome, StripError>,
    root: &Path,
    parameter: &str,
) -> Vec<String> {
    let mut lines = Vec::new();

    match entry {
        Ok(outcome) => {
            let shown = display_path(&outcome.path, root);
            if outcome.modified {
                lines.push(format!("Fixed: {}", shown));
            }
            for ambiguity in &outcome.ambiguities {
                lines.push(format!(
                    "Warning: {}:{}: left '{}:' in place ({})",
                    shown, ambiguity.line, parameter, ambiguity.reason
                ));
            }
        }
        Err(e) => {
            let shown = e
                .path()
                .map(|p| display_path(p, root))
                .unwrap_or_else(|| "<unknown>".to_string());
            let detail = e.source().map(|s| s.to_string()).unwrap_or_else(|| e.to_string());
            lines.push(format!("Error processing {}: {}", shown, detail));
        }
    }

    lines
}

pub fn strip_total_line(summary: &StripSummary) -> String {
    format!("Fixed {} files", summary.fixed_count())
}

/// Per-file lines in processing order, then the total.
pub fn strip_report(summary: &StripSummary, root: &Path, parameter: &str) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .entries
        .iter()
        .flat_map(|entry| strip_entry_lines(entry, root, parameter))
        .collect();
    lines.push(strip_total_line(summary));
    lines
}
