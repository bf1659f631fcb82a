//! Generator configuration.
//!
//! Handles loading, validating, and merging `preset-docs.toml`. Stock defaults
//! reproduce the behavior of running the generator with no configuration at
//! all from the project root; a sparse config file overrides just the keys it
//! names, and command-line flags override both.
//!
//! ## Config File Location
//!
//! The file is looked up in the working directory:
//!
//! ```text
//! project/
//! ├── preset-docs.toml         # Optional generator config
//! ├── presets/                 # Presets root
//! │   ├── docker/
//! │   │   └── preset.yml       # Directory layout
//! │   └── neovim.yml           # Flat layout
//! └── docs/
//!     └── presets/
//!         └── available.md     # Generated page
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! presets_root = "presets"
//! output_path = "docs/presets/available.md"
//! mode = "cards"             # "cards" or "table"
//! skip_empty = true          # Don't write a page when no presets are found
//! duplicates = "keep"        # "keep", "prefer-directory" or "error"
//!
//! [render]
//! tool = "mooncake"
//! guide_link = "../guide/presets.md"
//! source_link = "../../presets/{name}/"
//! source_url = "https://github.com/alehatsman/mooncake/tree/master/presets/{name}"
//! ```
//!
//! Relative paths are resolved against the working directory. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "preset-docs.toml";

/// Placeholder substituted with the preset name in link templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `preset-docs.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Directory scanned for preset definitions.
    pub presets_root: PathBuf,
    /// Markdown file that receives the generated page.
    pub output_path: PathBuf,
    /// Layout of the generated page.
    pub mode: RenderMode,
    /// When no presets are found, warn and leave the output untouched.
    pub skip_empty: bool,
    /// How to treat a preset present in both directory and flat layout.
    pub duplicates: DuplicatePolicy,
    /// Text and link templates used inside each rendered entry.
    pub render: RenderConfig,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            presets_root: PathBuf::from("presets"),
            output_path: PathBuf::from("docs/presets/available.md"),
            mode: RenderMode::default(),
            skip_empty: true,
            duplicates: DuplicatePolicy::default(),
            render: RenderConfig::default(),
        }
    }
}

impl DocsConfig {
    /// Validate values that would otherwise produce a broken page.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.tool.trim().is_empty() {
            return Err(ConfigError::Validation(
                "render.tool must not be empty".into(),
            ));
        }
        if !self.render.source_link.contains(NAME_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "render.source_link must contain {NAME_PLACEHOLDER}"
            )));
        }
        if !self.render.source_url.contains(NAME_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "render.source_url must contain {NAME_PLACEHOLDER}"
            )));
        }
        Ok(())
    }
}

/// Page layout: a grid of cards or a single markdown table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// One HTML card per preset; usage instructions after the grid.
    #[default]
    Cards,
    /// One table row per preset; usage instructions before the table.
    Table,
}

/// Resolution rule for a name discovered as both `name/preset.yml` and `name.yml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Render both entries.
    #[default]
    Keep,
    /// Drop the flat-layout entry when a directory-layout twin exists.
    PreferDirectory,
    /// Fail the run.
    Error,
}

/// Text and link templates for rendered entries.
///
/// `{name}` in `source_link` and `source_url` is replaced with the preset's
/// filesystem name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// CLI name used in install snippets (`<tool> presets install <name>`).
    pub tool: String,
    /// Card "Documentation" link target.
    pub guide_link: String,
    /// Card "Source" link target.
    pub source_link: String,
    /// Table link target for the preset name.
    pub source_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tool: "mooncake".to_string(),
            guide_link: "../guide/presets.md".to_string(),
            source_link: "../../presets/{name}/".to_string(),
            source_url: "https://github.com/alehatsman/mooncake/tree/master/presets/{name}"
                .to_string(),
        }
    }
}

impl RenderConfig {
    pub fn source_link_for(&self, name: &str) -> String {
        self.source_link.replace(NAME_PLACEHOLDER, name)
    }

    pub fn source_url_for(&self, name: &str) -> String {
        self.source_url.replace(NAME_PLACEHOLDER, name)
    }

    pub fn install_command(&self, name: &str) -> String {
        format!("{} presets install {}", self.tool, name)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock settings as a TOML table: `presets` root, `docs/presets/available.md`,
/// card mode, `keep` duplicates and the `mooncake` render links.
///
/// A `preset-docs.toml` only needs the keys it changes; everything else
/// comes from here.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(DocsConfig::default()).expect("default config must serialize")
}

/// Lay a sparse `preset-docs.toml` over the stock table.
///
/// Nested tables such as `[render]` merge per key, so setting only
/// `render.tool` keeps the stock link templates. Any other value, arrays
/// included, is replaced whole.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `dir/preset-docs.toml` without interpreting its keys.
///
/// A missing file is `Ok(None)`; unreadable files and TOML syntax errors are
/// errors. Unknown keys are only caught later, by [`resolve_config`].
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Turn stock values plus an optional `preset-docs.toml` table into a
/// [`DocsConfig`], rejecting unknown keys and failing [`DocsConfig::validate`].
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<DocsConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: DocsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Settings for a run from `dir`: stock values, overridden by
/// `dir/preset-docs.toml` when present. CLI flags are applied by the caller.
pub fn load_config(dir: &Path) -> Result<DocsConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `preset-docs.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Preset Docs Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# Relative paths are resolved against the directory the generator runs in.

# Directory scanned for presets. Both layouts are discovered:
#   presets/<name>/preset.yml   (directory layout)
#   presets/<name>.yml          (flat layout)
presets_root = "presets"

# Generated markdown page. Parent directories are created as needed and the
# file is overwritten on every run.
output_path = "docs/presets/available.md"

# Page layout:
#   "cards" - a grid of HTML cards, usage instructions after the grid
#   "table" - one markdown table, usage instructions before it
mode = "cards"

# When no presets are found, warn and leave the output file untouched.
# Set to false to write a page reporting "Found 0 presets" instead.
skip_empty = true

# A preset present as both <name>/preset.yml and <name>.yml:
#   "keep"             - render both entries
#   "prefer-directory" - drop the flat-layout entry
#   "error"            - fail the run
duplicates = "keep"

# ---------------------------------------------------------------------------
# Entry rendering
# ---------------------------------------------------------------------------
[render]
# CLI name used in install snippets: "<tool> presets install <name>".
tool = "mooncake"

# Card "Documentation" link.
guide_link = "../guide/presets.md"

# Card "Source" link. {name} is replaced with the preset name.
source_link = "../../presets/{name}/"

# Table link target for the preset name. {name} is replaced.
source_url = "https://github.com/alehatsman/mooncake/tree/master/presets/{name}"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_paths() {
        let config = DocsConfig::default();
        assert_eq!(config.presets_root, PathBuf::from("presets"));
        assert_eq!(
            config.output_path,
            PathBuf::from("docs/presets/available.md")
        );
    }

    #[test]
    fn default_config_behaves_like_bare_run() {
        let config = DocsConfig::default();
        assert_eq!(config.mode, RenderMode::Cards);
        assert!(config.skip_empty);
        assert_eq!(config.duplicates, DuplicatePolicy::Keep);
        assert_eq!(config.render.tool, "mooncake");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
mode = "table"

[render]
tool = "mc"
"#;
        let config: DocsConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.mode, RenderMode::Table);
        assert_eq!(config.render.tool, "mc");
        // Defaults preserved
        assert_eq!(config.render.guide_link, "../guide/presets.md");
        assert_eq!(config.presets_root, PathBuf::from("presets"));
    }

    #[test]
    fn parse_duplicate_policy_kebab_case() {
        let config: DocsConfig = toml::from_str(r#"duplicates = "prefer-directory""#).unwrap();
        assert_eq!(config.duplicates, DuplicatePolicy::PreferDirectory);
    }

    #[test]
    fn source_link_substitutes_name() {
        let render = RenderConfig::default();
        assert_eq!(render.source_link_for("docker"), "../../presets/docker/");
        assert_eq!(
            render.source_url_for("docker"),
            "https://github.com/alehatsman/mooncake/tree/master/presets/docker"
        );
    }

    #[test]
    fn install_command_uses_tool() {
        let render = RenderConfig {
            tool: "mc".to_string(),
            ..RenderConfig::default()
        };
        assert_eq!(render.install_command("node"), "mc presets install node");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.mode, RenderMode::Cards);
        assert_eq!(config.presets_root, PathBuf::from("presets"));
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
presets_root = "catalog"
skip_empty = false

[render]
source_link = "/presets/{name}.html"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.presets_root, PathBuf::from("catalog"));
        assert!(!config.skip_empty);
        assert_eq!(config.render.source_link, "/presets/{name}.html");
        // Unspecified values are defaults
        assert_eq!(config.render.tool, "mooncake");
        assert_eq!(
            config.output_path,
            PathBuf::from("docs/presets/available.md")
        );
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "mode = [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_raw_config_keeps_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());

        fs::write(tmp.path().join(CONFIG_FILE), "preset_root = \"x\"\n").unwrap();
        let raw = load_raw_config(tmp.path()).unwrap().unwrap();
        assert_eq!(raw["preset_root"].as_str(), Some("x"));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "preset_root = \"x\"\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml = r#"
[render]
tools = "mc"
"#;
        let result: Result<DocsConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_mode_rejected() {
        let result: Result<DocsConfig, _> = toml::from_str(r#"mode = "grid""#);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(DocsConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_tool() {
        let mut config = DocsConfig::default();
        config.render.tool = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_source_url_requires_placeholder() {
        let mut config = DocsConfig::default();
        config.render.source_url = "https://example.com/presets".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.source_url"));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[render]\nsource_link = \"../presets/\"\n",
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Merge tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[render]\ntool = \"mc\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["render"]["tool"].as_str(), Some("mc"));
        assert_eq!(
            merged["render"]["guide_link"].as_str(),
            Some("../guide/presets.md")
        );
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("[render]\ntool = \"\"").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: DocsConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = DocsConfig::default();
        assert_eq!(parsed.presets_root, defaults.presets_root);
        assert_eq!(parsed.output_path, defaults.output_path);
        assert_eq!(parsed.mode, defaults.mode);
        assert_eq!(parsed.skip_empty, defaults.skip_empty);
        assert_eq!(parsed.duplicates, defaults.duplicates);
        assert_eq!(parsed.render.tool, defaults.render.tool);
        assert_eq!(parsed.render.guide_link, defaults.render.guide_link);
        assert_eq!(parsed.render.source_link, defaults.render.source_link);
        assert_eq!(parsed.render.source_url, defaults.render.source_url);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value();
        let table = value.as_table().unwrap();
        for key in [
            "presets_root",
            "output_path",
            "mode",
            "skip_empty",
            "duplicates",
            "render",
        ] {
            assert!(table.contains_key(key), "missing key {key}");
        }
    }
}
