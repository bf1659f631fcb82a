//! Markdown page rendering.
//!
//! Turns scanned preset records into the "Available Presets" page. The page
//! has one of two layouts, selected by [`RenderMode`]:
//!
//! ```text
//! Cards                              Table
//! -----                              -----
//! # Available Presets                # Available Presets
//! intro                              intro
//! <div class="preset-grid">          ## Using Presets
//!   one card per preset              ---
//! </div>                             ## Presets
//! ---                                | Preset | Description | Install |
//! ## Using Presets                   one row per preset
//! ---                                ---
//! *Found N presets*                  *Found N presets*
//! ```
//!
//! Records are sorted by filesystem name before rendering; that is the only
//! ordering guarantee. Rendering is a pure function of records, mode and
//! [`RenderConfig`], so identical inputs produce byte-identical pages.
//!
//! ## Cards
//!
//! Card markup is generated with maud, so preset text is HTML-escaped.
//! Each element is emitted on its own line with blank lines between them:
//! MkDocs' `md_in_html` only treats the elements as blocks when separated
//! that way.
//!
//! ## Table rows
//!
//! Cells are escaped with [`escape_table_cell`]: literal `|` becomes `\|`
//! and line breaks collapse to spaces, keeping every row on one line with
//! exactly three cells.

use crate::config::{RenderConfig, RenderMode};
use crate::types::PresetRecord;
use maud::{Markup, html};

const TITLE: &str = "# Available Presets";

const INTRO: &str =
    "Browse our collection of ready-to-use presets for common development tools and infrastructure.";

const TABLE_HEADER: &str = "| Preset | Description | Install |\n|--------|-------------|---------|\n";

/// Render the full page for `records` in the given layout.
pub fn render(records: &[PresetRecord], mode: RenderMode, options: &RenderConfig) -> String {
    let sorted = sorted_by_name(records);

    let mut content = format!("{TITLE}\n\n{INTRO}\n");

    match mode {
        RenderMode::Cards => {
            content.push_str("\n<div class=\"preset-grid\">\n");
            for record in &sorted {
                content.push_str(&render_card(record, options));
            }
            content.push_str("\n</div>\n\n---\n\n");
            content.push_str(&using_presets(options));
        }
        RenderMode::Table => {
            content.push('\n');
            content.push_str(&using_presets(options));
            content.push_str("\n---\n\n## Presets\n\n");
            content.push_str(TABLE_HEADER);
            for record in &sorted {
                content.push_str(&render_row(record, options));
            }
        }
    }

    content.push_str(&footer(sorted.len()));
    content
}

/// Records in ascending name order. The sort is stable, so same-named
/// records keep their discovery order.
pub fn sorted_by_name(records: &[PresetRecord]) -> Vec<&PresetRecord> {
    let mut sorted: Vec<&PresetRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

/// Render one preset card, surrounded by newlines.
pub fn render_card(record: &PresetRecord, options: &RenderConfig) -> String {
    let description = record.description();

    let mut blocks: Vec<String> = vec![
        r#"<div class="grid-card">"#.to_string(),
        html! { h3 { (record.display_name()) } }.into_string(),
    ];
    if let Some(meta) = card_meta(record) {
        blocks.push(meta.into_string());
    }
    if !description.is_empty() {
        blocks.push(html! { p { (description) } }.into_string());
    }
    blocks.push(
        html! {
            pre { code class="language-bash" { (options.install_command(&record.name)) } }
        }
        .into_string(),
    );
    blocks.push(
        html! {
            p class="card-actions" {
                a href=(options.guide_link) { "Documentation" }
                " "
                span { "•" }
                " "
                a href=(options.source_link_for(&record.name)) { "Source" }
            }
        }
        .into_string(),
    );
    blocks.push("</div>".to_string());

    format!("\n{}\n", blocks.join("\n\n"))
}

/// Version badge and parameter count; `None` when the preset has neither.
fn card_meta(record: &PresetRecord) -> Option<Markup> {
    let version = record.version();
    let param_count = record.parameter_count();
    if version.is_none() && param_count == 0 {
        return None;
    }

    Some(html! {
        p class="card-meta" {
            @if let Some(v) = &version {
                span class="badge" { "v" (v) }
            }
            @if version.is_some() && param_count > 0 {
                " "
            }
            @if param_count > 0 {
                strong { "Parameters:" } " " (param_count)
            }
        }
    })
}

/// Render one table row, terminated by a newline.
pub fn render_row(record: &PresetRecord, options: &RenderConfig) -> String {
    format!(
        "| [{}]({}) | {} | `{}` |\n",
        escape_table_cell(&record.name),
        options.source_url_for(&record.name),
        escape_table_cell(&record.description()),
        escape_table_cell(&options.install_command(&record.name)),
    )
}

/// Make text safe for a single markdown table cell.
///
/// Every `|` becomes `\|`; line breaks (with surrounding indentation)
/// collapse to a single space and blank lines are dropped.
pub fn escape_table_cell(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

/// The "Using Presets" instructions, ending with a newline.
fn using_presets(options: &RenderConfig) -> String {
    format!(
        r#"## Using Presets

Install a preset interactively:

```bash
{tool} presets -K
```

Or install a specific preset:

```bash
{tool} presets install -K <preset-name>
```

For more information, see the [Preset Guide]({guide}).
"#,
        tool = options.tool,
        guide = options.guide_link,
    )
}

fn footer(count: usize) -> String {
    format!("\n---\n\n*Found {count} presets*\n")
}
