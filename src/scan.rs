//! Preset discovery.
//!
//! Walks the presets root and turns every preset definition into a
//! [`PresetRecord`]. Two layouts are supported side by side:
//!
//! ```text
//! presets/                         # Presets root
//! ├── docker/                      # Directory layout
//! │   ├── preset.yml               # Definition (name = "docker")
//! │   └── templates/               # Anything else is ignored
//! ├── neovim/
//! │   └── preset.yml
//! ├── notes/                       # No preset.yml = not a preset
//! ├── ollama.yml                   # Flat layout (name = "ollama")
//! └── .draft.yml                   # Flat layout (name = ".draft")
//! ```
//!
//! Directory-layout presets are collected first, then flat-layout presets,
//! each group in file-name order. The groups are concatenated without
//! deduplication; ordering and duplicate handling belong to the caller.
//!
//! A file that can't be read or parsed never fails the scan, and neither does
//! an entry the walk can't read. Both are reported in [`Discovery::skipped`],
//! and [`scan`] logs a warning for each.

use crate::types::{PRESET_EXTENSION, PRESET_FILE, PresetError, PresetLayout, PresetRecord};
use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Result of walking a presets root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Directory-layout records followed by flat-layout records.
    pub records: Vec<PresetRecord>,
    /// Files that looked like presets but failed to load, and entries the
    /// walk could not read.
    pub skipped: Vec<SkippedFile>,
    /// The root itself does not exist.
    pub root_missing: bool,
}

/// A preset file or unreadable entry excluded from the scan.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: PresetError,
}

/// Scan `root` for presets, logging a warning for every problem found.
///
/// A missing root yields an empty vector rather than an error so library
/// callers can treat "no presets" uniformly.
pub fn scan(root: &Path) -> Vec<PresetRecord> {
    let discovery = discover(root);

    if discovery.root_missing {
        warn!("Presets directory '{}' not found", root.display());
    }
    for skipped in &discovery.skipped {
        let action = match skipped.error {
            PresetError::Io(_) => "read",
            _ => "parse",
        };
        warn!(
            "Failed to {} {}: {}",
            action,
            skipped.path.display(),
            skipped.error
        );
    }

    discovery.records
}

/// Walk `root` without logging.
pub fn discover(root: &Path) -> Discovery {
    if !root.exists() {
        return Discovery {
            root_missing: true,
            ..Discovery::default()
        };
    }

    let mut discovery = Discovery::default();
    let entries = collect_entries(root, &mut discovery);

    // Directory layout: <root>/<name>/preset.yml
    for entry in entries.iter().filter(|e| e.path().is_dir()) {
        let preset_file = entry.path().join(PRESET_FILE);
        match fs::metadata(&preset_file) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                discovery.skipped.push(SkippedFile {
                    path: preset_file,
                    error: PresetError::Io(e),
                });
                continue;
            }
        }
        let name = entry.file_name().to_string_lossy().to_string();
        load_into(&mut discovery, name, preset_file, PresetLayout::Directory);
    }

    // Flat layout: <root>/<name>.yml
    for entry in entries.iter().filter(|e| is_flat_preset(e.path())) {
        let name = entry
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        load_into(
            &mut discovery,
            name,
            entry.path().to_path_buf(),
            PresetLayout::Flat,
        );
    }

    discovery
}

fn load_into(discovery: &mut Discovery, name: String, path: PathBuf, layout: PresetLayout) {
    match PresetRecord::load(name, &path, layout) {
        Ok(record) => discovery.records.push(record),
        Err(error) => discovery.skipped.push(SkippedFile { path, error }),
    }
}

/// Immediate children of `root`, sorted by file name.
///
/// Entries the walk can't read are recorded as skipped.
fn collect_entries(root: &Path, discovery: &mut Discovery) -> Vec<DirEntry> {
    let mut entries = Vec::new();
    let walk = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for result in walk {
        match result {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                discovery.skipped.push(SkippedFile {
                    path,
                    error: PresetError::Io(err.into()),
                });
            }
        }
    }
    entries
}

fn is_flat_preset(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e == PRESET_EXTENSION)
            .unwrap_or(false)
}
