//! Shared test utilities for the preset-docs test suite.
//!
//! Fixture writers create presets in either layout under a temp root;
//! in-memory builders produce records for renderer tests without touching
//! the filesystem.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_dir_preset(tmp.path(), "foo", FOO_YAML);
//! write_flat_preset(tmp.path(), "bar", "name: Bar\n");
//!
//! let records = scan(tmp.path());
//! assert_eq!(record_names(&records), vec!["foo", "bar"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{PRESET_FILE, PresetLayout, PresetRecord, parse_preset};

/// Scenario preset: display name, description and version, no parameters.
pub const FOO_YAML: &str = "name: Foo\ndescription: \"desc\"\nversion: \"1.0\"\n";

// =========================================================================
// Fixture writers
// =========================================================================

/// Write `<root>/<name>/preset.yml`.
pub fn write_dir_preset(root: &Path, name: &str, yaml: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(PRESET_FILE);
    fs::write(&path, yaml).unwrap();
    path
}

/// Write `<root>/<name>.yml`.
pub fn write_flat_preset(root: &Path, name: &str, yaml: &str) -> PathBuf {
    fs::create_dir_all(root).unwrap();
    let path = root.join(format!("{name}.yml"));
    fs::write(&path, yaml).unwrap();
    path
}

// =========================================================================
// In-memory records
// =========================================================================

/// Build a flat-layout record from YAML text. Panics on invalid YAML.
pub fn record(name: &str, yaml: &str) -> PresetRecord {
    record_with_layout(name, yaml, PresetLayout::Flat)
}

/// Build a record with an explicit layout. Panics on invalid YAML.
pub fn record_with_layout(name: &str, yaml: &str, layout: PresetLayout) -> PresetRecord {
    let source_path = match layout {
        PresetLayout::Directory => PathBuf::from(format!("presets/{name}/{PRESET_FILE}")),
        PresetLayout::Flat => PathBuf::from(format!("presets/{name}.yml")),
    };
    PresetRecord {
        name: name.to_string(),
        data: parse_preset(yaml)
            .unwrap_or_else(|e| panic!("invalid fixture yaml for '{name}': {e}")),
        source_path,
        layout,
    }
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All record names in order.
pub fn record_names(records: &[PresetRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

/// Lines of a rendered document starting with `prefix`.
pub fn lines_starting_with<'a>(doc: &'a str, prefix: &str) -> Vec<&'a str> {
    doc.lines().filter(|l| l.starts_with(prefix)).collect()
}
