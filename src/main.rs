use clap::{Parser, Subcommand};
use log::{Level, warn};
use preset_docs::config::{self, DocsConfig, RenderMode};
use preset_docs::generate::{self, GenerateError};
use preset_docs::{output, scan};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "preset-docs")]
#[command(about = "Generate the available-presets documentation page")]
#[command(long_about = "\
Generate the available-presets documentation page

Run from the project root. Presets are discovered in two layouts:

  presets/
  ├── docker/
  │   └── preset.yml               # Directory layout (name = docker)
  └── ollama.yml                   # Flat layout (name = ollama)

and rendered, sorted by name, into docs/presets/available.md.

Settings come from stock defaults, then preset-docs.toml in the working
directory, then flags. Run 'preset-docs gen-config' for a documented config.")]
#[command(version)]
struct Cli {
    /// Presets directory [default: presets]
    #[arg(long, global = true)]
    presets_root: Option<PathBuf>,

    /// Generated markdown file [default: docs/presets/available.md]
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Page layout [default: cards]
    #[arg(long, value_enum, global = true)]
    mode: Option<RenderMode>,

    /// Write the page even when no presets are found
    #[arg(long, global = true)]
    write_empty: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan presets and print what would be rendered, without writing
    Check,
    /// Print a stock preset-docs.toml with all options documented
    GenConfig,
}

impl Cli {
    /// Load the config file from the working directory and apply flags on top.
    fn resolve_config(&self) -> Result<DocsConfig, config::ConfigError> {
        let mut config = config::load_config(&std::env::current_dir()?)?;
        if let Some(root) = &self.presets_root {
            config.presets_root = root.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.write_empty {
            config.skip_empty = false;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        None => {
            let config = cli.resolve_config()?;
            let outcome = generate::generate(&config)?;
            output::print_generate_output(&outcome);
        }
        Some(Command::Check) => {
            let config = cli.resolve_config()?;
            let discovery = scan::discover(&config.presets_root);
            if discovery.root_missing {
                return Err(GenerateError::MissingRootDirectory(config.presets_root).into());
            }
            if discovery.records.is_empty() {
                warn!("No presets found");
            }
            output::print_check_output(&discovery, &config.render);
        }
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Route log records to stderr as `Warning: ...` lines.
///
/// Defaults to `warn`; `RUST_LOG` overrides. Fatal errors bypass the logger.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let label = match record.level() {
                Level::Error => "Error",
                Level::Warn => "Warning",
                Level::Info => "Info",
                Level::Debug => "Debug",
                Level::Trace => "Trace",
            };
            writeln!(buf, "{}: {}", label, record.args())
        })
        .init();
}
