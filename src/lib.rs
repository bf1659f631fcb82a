//! # Preset Docs
//!
//! Generates the "Available Presets" page of the documentation site from the
//! preset catalog. The presets directory is the data source: every
//! `presets/<name>/preset.yml` and every `presets/<name>.yml` becomes one
//! entry on a single markdown page that MkDocs picks up at build time.
//!
//! # Architecture: Scan, Render, Write
//!
//! ```text
//! 1. Scan      presets/  →  Vec<PresetRecord>   (filesystem → parsed YAML)
//! 2. Render    records   →  String              (sorted, cards or table)
//! 3. Write     String    →  docs/presets/available.md
//! ```
//!
//! Rendering is a pure function, so tests exercise page structure without
//! touching the filesystem, and identical inputs always produce identical
//! pages.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Discovers presets in both layouts, skipping files that fail to parse |
//! | [`render`] | Renders the page in card or table layout |
//! | [`generate`] | Runs the pipeline: root check, duplicates, empty set, write |
//! | [`config`] | `preset-docs.toml` loading, merging and validation |
//! | [`types`] | `PresetRecord` and accessors for the recognized YAML fields |
//! | [`output`] | CLI output formatting for `check` and the run summary |
//!
//! # Design Decisions
//!
//! ## Tolerant Parsing
//!
//! The generator documents presets, it doesn't validate them. A file that
//! fails to parse is skipped with a warning, and every recognized field is
//! optional: a missing `name` falls back to the file name, a missing
//! `version` drops the badge.
//!
//! ## One Renderer, Two Layouts
//!
//! Cards and table are variants of [`config::RenderMode`] passed to a
//! single renderer. Header, usage instructions and footer are shared; only
//! the per-preset fragment and the position of the usage section differ.
//!
//! ## Explicit Configuration
//!
//! Paths are carried in [`config::DocsConfig`] instead of being read from
//! the working directory deep in the pipeline. Only the binary resolves
//! defaults against the working directory.

pub mod config;
pub mod generate;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
