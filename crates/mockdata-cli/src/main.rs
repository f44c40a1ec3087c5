mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use logging::{LogFormat, init_logging};
use mockdata_generate::faker_rs::LocaleKey;
use mockdata_generate::output::report::write_report;
use mockdata_generate::{
    Config, ConfigError, GenerationEngine, GenerationError, ProviderRegistry,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "mockdata",
    version,
    about = "Generate mock CSV datasets from a config file"
)]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
    /// Append logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Enable debug logging.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset.
    Generate(GenerateArgs),
    /// List provider names usable as column specs.
    Providers,
    /// List locales with a built-in data set.
    Locales,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
    /// Output file; overrides `output` in [MAIN].
    #[arg(long)]
    out: Option<PathBuf>,
    /// Number of data rows; overrides `lines` in [MAIN].
    #[arg(long)]
    lines: Option<u64>,
    /// Seed for reproducible output; overrides `seed` in [MAIN].
    #[arg(long)]
    seed: Option<u64>,
    /// Write a JSON generation report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_format, cli.verbose, cli.log_file.as_deref()) {
        eprintln!("ERROR: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Generate(args) => run_generate(args),
        Command::Providers => {
            for id in ProviderRegistry::new().ids() {
                println!("{id}");
            }
            Ok(())
        }
        Command::Locales => {
            for locale in LocaleKey::ALL {
                println!("{locale}");
            }
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        config: config_path,
        out,
        lines,
        seed,
        report,
    } = args;

    let mut config = Config::load(&config_path)?;
    tracing::info!(event = "config_loaded", path = %config_path.display());
    apply_overrides(&mut config, out, lines, seed);

    let engine = GenerationEngine::new(ProviderRegistry::new());
    let result = engine.run(&config)?;

    if let Some(path) = report {
        write_report(&path, &result.report)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        output = %result.output.display(),
        rows = result.report.rows_generated,
        duration_ms = result.report.duration_ms
    );
    Ok(())
}

fn apply_overrides(
    config: &mut Config,
    out: Option<PathBuf>,
    lines: Option<u64>,
    seed: Option<u64>,
) {
    if let Some(out) = out {
        config.output = out;
    }
    if let Some(lines) = lines {
        config.lines = lines;
    }
    if seed.is_some() {
        config.seed = seed;
    }
}
