//! The documentation pipeline.
//!
//! Ties the stages together for one run:
//!
//! ```text
//! presets/  →  scan  →  duplicate policy  →  render  →  docs/presets/available.md
//! ```
//!
//! A missing presets root is fatal here (the library-level [`scan::scan`]
//! only warns). An empty scan is a warning; by default nothing is written so
//! an existing page survives a run from the wrong directory.

use crate::config::{DocsConfig, DuplicatePolicy};
use crate::render;
use crate::scan;
use crate::types::{PresetLayout, PresetRecord};
use log::warn;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Presets directory '{}' not found", .0.display())]
    MissingRootDirectory(PathBuf),
    #[error("Preset '{0}' is defined both as {0}/preset.yml and {0}.yml")]
    DuplicatePreset(String),
}

/// What a pipeline run did.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The page was written.
    Written { path: PathBuf, count: usize },
    /// No presets were found and `skip_empty` left the output untouched.
    Skipped,
}

/// Run the full pipeline for `config`.
pub fn generate(config: &DocsConfig) -> Result<Outcome, GenerateError> {
    if !config.presets_root.exists() {
        return Err(GenerateError::MissingRootDirectory(
            config.presets_root.clone(),
        ));
    }

    let records = scan::scan(&config.presets_root);
    let records = resolve_duplicates(records, config.duplicates)?;

    if records.is_empty() {
        warn!("No presets found");
        if config.skip_empty {
            return Ok(Outcome::Skipped);
        }
    }

    let content = render::render(&records, config.mode, &config.render);
    write_document(&content, &config.output_path)?;

    Ok(Outcome::Written {
        path: config.output_path.clone(),
        count: records.len(),
    })
}

/// Apply the duplicate policy to names found in both layouts.
pub fn resolve_duplicates(
    records: Vec<PresetRecord>,
    policy: DuplicatePolicy,
) -> Result<Vec<PresetRecord>, GenerateError> {
    if policy == DuplicatePolicy::Keep {
        return Ok(records);
    }

    let directory_names: HashSet<String> = records
        .iter()
        .filter(|r| r.layout == PresetLayout::Directory)
        .map(|r| r.name.clone())
        .collect();

    let mut resolved = Vec::with_capacity(records.len());
    for record in records {
        let shadowed =
            record.layout == PresetLayout::Flat && directory_names.contains(&record.name);
        if !shadowed {
            resolved.push(record);
            continue;
        }
        match policy {
            DuplicatePolicy::Error => return Err(GenerateError::DuplicatePreset(record.name)),
            _ => warn!(
                "Ignoring {}: preset '{}' already defined by its directory",
                record.source_path.display(),
                record.name
            ),
        }
    }
    Ok(resolved)
}

/// Write `content` as the complete contents of `path`, creating parent
/// directories as needed.
pub fn write_document(content: &str, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
