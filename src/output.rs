//! CLI output formatting.
//!
//! Everything printed to stdout goes through here. Warnings are not: they
//! are logged and end up on stderr, so redirecting stdout captures only the
//! summary.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Presets
//! 001 Docker (v1.0, 3 parameters)
//!     Source: presets/docker/preset.yml
//!     Install: mooncake presets install docker
//! 002 ollama
//!     Source: presets/ollama.yml
//!     Install: mooncake presets install ollama
//!
//! Skipped
//!     presets/broken.yml: did not find expected node content
//!
//! Found 2 presets
//! ```
//!
//! ## Generate
//!
//! ```text
//! Generated docs/presets/available.md with 2 presets
//! ✓ Preset documentation generated successfully
//! ```
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::config::RenderConfig;
use crate::generate::Outcome;
use crate::render::sorted_by_name;
use crate::scan::Discovery;
use crate::types::PresetRecord;

/// Longest description shown in the inventory before truncation.
const DESCRIPTION_WIDTH: usize = 72;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Version and parameter count in parentheses, if the preset has either.
///
/// ```text
/// (v1.0, 3 parameters)
/// (1 parameter)
/// ```
fn preset_details(record: &PresetRecord) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(version) = record.version() {
        parts.push(format!("v{}", version));
    }
    match record.parameter_count() {
        0 => {}
        1 => parts.push("1 parameter".to_string()),
        n => parts.push(format!("{} parameters", n)),
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("({})", parts.join(", ")))
    }
}

fn preset_header(index: usize, record: &PresetRecord) -> String {
    match preset_details(record) {
        Some(details) => format!(
            "{} {} {}",
            format_index(index),
            record.display_name(),
            details
        ),
        None => format!("{} {}", format_index(index), record.display_name()),
    }
}

/// Format the `check` inventory: presets in page order, then skipped files.
pub fn format_check_output(discovery: &Discovery, options: &RenderConfig) -> Vec<String> {
    let mut lines = vec!["Presets".to_string()];

    let sorted = sorted_by_name(&discovery.records);
    for (i, record) in sorted.iter().enumerate() {
        lines.push(preset_header(i + 1, record));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            record.source_path.display()
        ));
        let description = record.description();
        let description = description.trim();
        if !description.is_empty() {
            let single_line = description.split_whitespace().collect::<Vec<_>>().join(" ");
            lines.push(format!(
                "{}Description: {}",
                indent(1),
                truncate_desc(&single_line, DESCRIPTION_WIDTH)
            ));
        }
        lines.push(format!(
            "{}Install: {}",
            indent(1),
            options.install_command(&record.name)
        ));
    }

    if !discovery.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skipped in &discovery.skipped {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                skipped.path.display(),
                skipped.error
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Found {} presets", sorted.len()));
    lines
}

pub fn print_check_output(discovery: &Discovery, options: &RenderConfig) {
    for line in format_check_output(discovery, options) {
        println!("{}", line);
    }
}

/// Format the end-of-run summary.
pub fn format_generate_output(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Written { path, count } => vec![
            format!("Generated {} with {} presets", path.display(), count),
            "✓ Preset documentation generated successfully".to_string(),
        ],
        Outcome::Skipped => vec!["No presets found, nothing generated".to_string()],
    }
}

pub fn print_generate_output(outcome: &Outcome) {
    for line in format_generate_output(outcome) {
        println!("{}", line);
    }
}
