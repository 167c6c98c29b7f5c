//! # annogen
//!
//! Run comment-annotation generators over a Rust source tree.
//!
//! ## Usage
//!
//! ```bash
//! # Generate into ./generated
//! annogen generate --input src
//!
//! # Preview without writing
//! annogen generate --dry-run
//!
//! # Show registered generators
//! annogen list
//!
//! # Dump classified declarations as JSON
//! annogen inspect --input src
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use annogen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::CliError,
    logging,
    pipeline::{Pipeline, RunReport},
    writer::WriteResult,
};

#[derive(Parser)]
#[command(name = "annogen")]
#[command(author, version, about = "Generate code from comment annotations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan sources and run the generators their annotations name
    Generate {
        /// Input directory containing Rust source files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Preview generated files without writing them
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only scan files matching this glob
        #[arg(long)]
        filter: Option<String>,

        /// Log at debug level
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a default annogen.toml
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "annogen.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List registered generators and the declaration kinds they handle
    List {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print classified declarations and their directives as JSON
    Inspect {
        /// Input directory containing Rust source files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            dry_run,
            config,
            filter,
            verbose,
        } => {
            let args = CliArgs {
                output,
                dry_run,
                filter,
                verbose,
            };
            cmd_generate(&input, load_config(config.as_deref(), &args)?)
        }
        Commands::Init { output, force } => cmd_init(&output, force),
        Commands::List { config } => {
            cmd_list(load_config(config.as_deref(), &CliArgs::default())?)
        }
        Commands::Inspect { input, config } => {
            cmd_inspect(&input, load_config(config.as_deref(), &CliArgs::default())?)
        }
    }
}

/// Resolve the configuration with CLI overrides, then install logging from it.
fn load_config(path: Option<&Path>, args: &CliArgs) -> Result<Config, CliError> {
    let config = ConfigManager::resolve(path, args)?;
    if let Err(e) = logging::init_logging(&config.logging) {
        eprintln!("{} logging disabled: {}", "Warning:".yellow(), e);
    }
    Ok(config)
}

fn cmd_generate(input: &Path, config: Config) -> Result<(), CliError> {
    println!("{} {}", "Scanning".cyan(), input.display());

    let pipeline = Pipeline::from_config(config)?;
    let report = pipeline.run(input)?;

    print_report(&report, pipeline.config().output.dry_run);

    let failed = report.failed_declarations() + report.failed_writes();
    if failed > 0 {
        return Err(CliError::GenerationFailed { failed });
    }
    Ok(())
}

fn print_report(report: &RunReport, dry_run: bool) {
    println!(
        "  Found {} file(s), {} package(s)",
        report.files.to_string().green(),
        report.packages.to_string().green()
    );

    for error in &report.classify_errors {
        println!("{} {}", "Warning:".yellow(), error);
    }

    for (result, error) in report.batch.errors() {
        let label = if error.is_fatal() {
            "error:".red()
        } else {
            "warning:".yellow()
        };
        println!("{} {} ({})", label, error, result.position);
    }

    for write in &report.writes {
        match write {
            Ok(WriteResult::Written { path, bytes }) => {
                println!("{} {} ({} bytes)", "✓".green(), path.display(), bytes);
            }
            Ok(WriteResult::Skipped { path }) => {
                println!("{} {} (exists)", "-".dimmed(), path.display());
            }
            Ok(WriteResult::DryRun { path, content }) => {
                println!("{} Would write {}:", "[dry-run]".yellow(), path.display());
                println!("{}", "─".repeat(60).dimmed());
                print!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
            Err(e) => println!("{} {}", "error:".red(), e),
        }
    }

    let written = report.writes.iter().filter(|w| matches!(w, Ok(r) if r.was_written())).count();
    if !dry_run {
        println!("  Wrote {} file(s)", written.to_string().green());
    }
}

fn cmd_init(output: &Path, force: bool) -> Result<(), CliError> {
    ConfigManager::init(output, force)?;
    println!("{} Created configuration file: {}", "✓".green(), output.display());
    Ok(())
}

fn cmd_list(config: Config) -> Result<(), CliError> {
    let pipeline = Pipeline::from_config(config)?;
    let registry = pipeline.registry();

    if registry.is_empty() {
        println!("{}", "No generators registered.".yellow());
        return Ok(());
    }

    for name in registry.names() {
        let shapes: Vec<String> = registry
            .shapes(&name)
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("@{}  {}", name.bold(), shapes.join(", ").dimmed());
    }
    Ok(())
}

fn cmd_inspect(input: &Path, config: Config) -> Result<(), CliError> {
    let pipeline = Pipeline::from_config(config)?;
    let (packages, errors) = pipeline.classify(input)?;

    for error in &errors {
        eprintln!("{} {}", "Warning:".yellow(), error);
    }
    println!("{}", serde_json::to_string_pretty(&packages)?);
    Ok(())
}
