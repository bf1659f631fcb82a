//! Preset records shared by the scanner and the renderer.
//!
//! A record keeps the parsed YAML mapping as-is rather than deserializing
//! into a fixed struct: preset files carry many keys the generator never
//! reads (steps, platforms, parameter schemas), and none of the keys it does
//! read are required. Typed accessors below define how each recognized field
//! is interpreted.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name that marks a directory-layout preset.
pub const PRESET_FILE: &str = "preset.yml";

/// Extension of flat-layout preset files.
pub const PRESET_EXTENSION: &str = "yml";

/// A preset file that could not be turned into a record.
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("expected a mapping at the top level, found {0}")]
    NotAMapping(&'static str),
}

/// Where a preset definition was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetLayout {
    /// `<root>/<name>/preset.yml`
    Directory,
    /// `<root>/<name>.yml`
    Flat,
}

/// One discovered preset.
#[derive(Debug, Clone)]
pub struct PresetRecord {
    /// Directory name or file stem; sort key and install name.
    pub name: String,
    /// Parsed top-level mapping of the definition file.
    pub data: Mapping,
    /// Definition file, for diagnostics.
    pub source_path: PathBuf,
    pub layout: PresetLayout,
}

impl PresetRecord {
    /// Read and parse a preset definition.
    pub fn load(name: String, path: &Path, layout: PresetLayout) -> Result<Self, PresetError> {
        let content = fs::read_to_string(path)?;
        let data = parse_preset(&content)?;
        Ok(Self {
            name,
            data,
            source_path: path.to_path_buf(),
            layout,
        })
    }

    /// The preset's own `name` field, or the filesystem name when absent.
    pub fn display_name(&self) -> String {
        self.field_text("name")
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.name.clone())
    }

    /// The `description` field, empty when absent.
    pub fn description(&self) -> String {
        self.field_text("description").unwrap_or_default()
    }

    /// The `version` field. Numeric versions (`version: 2`) are accepted.
    pub fn version(&self) -> Option<String> {
        self.field_text("version")
    }

    /// Number of entries under `parameters`, 0 when absent or not a collection.
    pub fn parameter_count(&self) -> usize {
        match self.data.get("parameters") {
            Some(Value::Mapping(m)) => m.len(),
            Some(Value::Sequence(s)) => s.len(),
            _ => 0,
        }
    }

    fn field_text(&self, key: &str) -> Option<String> {
        self.data.get(key).and_then(scalar_text)
    }
}

/// Parse preset file content, requiring a mapping at the top level.
///
/// An empty file parses as null and is rejected like any other non-mapping.
pub fn parse_preset(content: &str) -> Result<Mapping, PresetError> {
    match serde_yaml::from_str::<Value>(content)? {
        Value::Mapping(m) => Ok(m),
        other => Err(PresetError::NotAMapping(value_kind(&other))),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, yaml: &str) -> PresetRecord {
        PresetRecord {
            name: name.to_string(),
            data: parse_preset(yaml).unwrap(),
            source_path: PathBuf::from(format!("presets/{name}.yml")),
            layout: PresetLayout::Flat,
        }
    }

    #[test]
    fn display_name_from_data() {
        let r = record("foo", "name: Foo\n");
        assert_eq!(r.display_name(), "Foo");
    }

    #[test]
    fn display_name_falls_back_to_filesystem_name() {
        let r = record("foo", "description: no name here\n");
        assert_eq!(r.display_name(), "foo");
    }

    #[test]
    fn display_name_falls_back_when_blank() {
        let r = record("foo", "name: \"\"\n");
        assert_eq!(r.display_name(), "foo");
    }

    #[test]
    fn description_empty_when_absent() {
        let r = record("foo", "name: Foo\n");
        assert_eq!(r.description(), "");
    }

    #[test]
    fn version_accepts_numbers() {
        let r = record("foo", "version: 2\n");
        assert_eq!(r.version().as_deref(), Some("2"));
    }

    #[test]
    fn version_none_when_absent() {
        let r = record("foo", "name: Foo\n");
        assert_eq!(r.version(), None);
    }

    #[test]
    fn parameter_count_of_mapping() {
        let r = record(
            "foo",
            "parameters:\n  port:\n    type: int\n  host:\n    type: string\n",
        );
        assert_eq!(r.parameter_count(), 2);
    }

    #[test]
    fn parameter_count_of_sequence() {
        let r = record(
            "foo",
            "parameters:\n  - name: a\n  - name: b\n  - name: c\n",
        );
        assert_eq!(r.parameter_count(), 3);
    }

    #[test]
    fn parameter_count_zero_for_scalar_or_absent() {
        assert_eq!(record("foo", "parameters: none\n").parameter_count(), 0);
        assert_eq!(record("foo", "name: Foo\n").parameter_count(), 0);
    }

    #[test]
    fn parse_rejects_empty_document() {
        assert!(matches!(
            parse_preset(""),
            Err(PresetError::NotAMapping(_)) | Err(PresetError::Yaml(_))
        ));
    }

    #[test]
    fn parse_rejects_sequence_document() {
        let err = parse_preset("- a\n- b\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a mapping at the top level, found a sequence"
        );
    }

    #[test]
    fn parse_rejects_invalid_yaml() {
        assert!(matches!(
            parse_preset("name: [unclosed\n"),
            Err(PresetError::Yaml(_))
        ));
    }
}
