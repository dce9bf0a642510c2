//! CLI command definitions, routing, and tracing setup.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use html2ipynb_core::output::OutputTarget;
use html2ipynb_core::pipeline::{
    ConvertFileResult, ConvertOptions, ProgressReporter, convert_files, convert_html, read_html,
};
use html2ipynb_shared::{
    AppConfig, Html2IpynbError, ProfileChoice, init_config, load_config, load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// html2ipynb: turn notebook HTML exports back into notebooks.
#[derive(Parser)]
#[command(
    name = "html2ipynb",
    version,
    about = "Convert rendered notebook HTML exports back into .ipynb notebooks.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.html2ipynb/html2ipynb.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert HTML exports to notebooks, written next to each input.
    Convert {
        /// HTML export(s) to convert.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write notebooks into this directory instead.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the notebook JSON instead of writing a file (single input only).
        #[arg(long, conflicts_with = "out")]
        stdout: bool,

        /// Overwrite existing notebooks even if the config says not to.
        #[arg(short, long)]
        force: bool,

        /// JSON indent width (defaults to the config value).
        #[arg(long)]
        indent: Option<usize>,

        /// Exporter markup: auto, lab, or classic.
        #[arg(long)]
        profile: Option<ProfileChoice>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "html2ipynb=warn",
        1 => "html2ipynb=info",
        2 => "html2ipynb=debug",
        _ => "html2ipynb=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Convert {
            inputs,
            out,
            stdout,
            force,
            indent,
            profile,
        } => {
            let mut config = resolve_config(config_path.as_deref())?;
            if let Some(indent) = indent {
                config.output.indent = indent;
            }
            if let Some(profile) = profile {
                config.extract.profile = profile;
            }
            if force {
                config.output.overwrite = true;
            }
            config.validate()?;

            if stdout {
                cmd_convert_stdout(&inputs, &config)
            } else {
                cmd_convert(&inputs, out, &config)
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

/// Load the explicit config file if given, else the user config (or defaults).
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn convert_options(config: &AppConfig) -> ConvertOptions {
    ConvertOptions {
        profile: config.extract.profile,
        indent: config.output.indent,
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_convert(inputs: &[PathBuf], out: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let opts = convert_options(config);
    let target = OutputTarget {
        out_dir: out,
        overwrite: config.output.overwrite,
    };

    info!(
        inputs = inputs.len(),
        profile = %opts.profile,
        indent = opts.indent,
        overwrite = target.overwrite,
        "converting exports"
    );

    let reporter = CliProgress::new(inputs.len());
    let results = convert_files(inputs, &opts, &target, &reporter);

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        return Err(eyre!("{failed} of {} conversions failed", results.len()));
    }
    Ok(())
}

fn cmd_convert_stdout(inputs: &[PathBuf], config: &AppConfig) -> Result<()> {
    let [input] = inputs else {
        return Err(eyre!("--stdout takes exactly one input, got {}", inputs.len()));
    };

    let html = read_html(input)?;
    let conversion = convert_html(&html, &convert_options(config));

    info!(
        input = %input.display(),
        profile = %conversion.profile,
        cells = conversion.notebook.cells.len(),
        skipped = conversion.skipped,
        "converted export"
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(conversion.json.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter: a bar for multi-file runs, one line per result.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new(total: usize) -> Self {
        let bar = if total > 1 {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {msg}")
                    .expect("valid progress template")
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }
}

/// One line per written notebook: paths, cell counts, and time taken.
fn summary_line(result: &ConvertFileResult) -> String {
    let skipped = if result.skipped > 0 {
        format!(", {} skipped", result.skipped)
    } else {
        String::new()
    };
    format!(
        "  {} -> {} ({} markdown, {} code{skipped}) in {}ms",
        result.input.display(),
        result.output.display(),
        result.markdown_cells,
        result.code_cells,
        result.elapsed.as_millis(),
    )
}

impl ProgressReporter for CliProgress {
    fn started(&self, input: &Path, _current: usize, _total: usize) {
        self.bar.set_message(input.display().to_string());
    }

    fn converted(&self, result: &ConvertFileResult) {
        self.bar.inc(1);
        self.bar.suspend(|| println!("{}", summary_line(result)));
    }

    fn failed(&self, input: &Path, error: &Html2IpynbError) {
        self.bar.inc(1);
        self.bar.suspend(|| {
            eprintln!("  {}: {error}", input.display());
        });
    }

    fn done(&self, _succeeded: usize, _failed: usize) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_convert_flags() {
        let cli = Cli::try_parse_from([
            "html2ipynb",
            "convert",
            "a.html",
            "b.htm",
            "--profile",
            "classic",
            "--indent",
            "2",
            "-f",
        ])
        .expect("parse");

        match cli.command {
            Command::Convert {
                inputs,
                profile,
                indent,
                force,
                stdout,
                ..
            } => {
                assert_eq!(inputs, vec![PathBuf::from("a.html"), PathBuf::from("b.htm")]);
                assert_eq!(profile, Some(ProfileChoice::Classic));
                assert_eq!(indent, Some(2));
                assert!(force);
                assert!(!stdout);
            }
            Command::Config { .. } => panic!("expected convert"),
        }
    }

    #[test]
    fn stdout_conflicts_with_out_dir() {
        let parsed = Cli::try_parse_from([
            "html2ipynb",
            "convert",
            "a.html",
            "--stdout",
            "--out",
            "nbs",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn convert_requires_an_input() {
        assert!(Cli::try_parse_from(["html2ipynb", "convert"]).is_err());
    }

    #[test]
    fn unknown_profile_is_a_usage_error() {
        let parsed =
            Cli::try_parse_from(["html2ipynb", "convert", "a.html", "--profile", "zeppelin"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn summary_line_reports_counts_and_elapsed_time() {
        let result = ConvertFileResult {
            input: PathBuf::from("a.html"),
            output: PathBuf::from("a.ipynb"),
            markdown_cells: 2,
            code_cells: 3,
            skipped: 1,
            elapsed: std::time::Duration::from_millis(42),
        };
        assert_eq!(
            summary_line(&result),
            "  a.html -> a.ipynb (2 markdown, 3 code, 1 skipped) in 42ms"
        );
    }
}
