//! Propbridge CLI - copy JSON and YAML documents between declared types
//!
//! This is the main entry point for the Propbridge CLI application, providing
//! commands for checking schemas and plans and for running copy plans over
//! source documents.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    // Configuration feeds both logging and output, so it loads first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, cli.use_color()),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, &config) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, use_color),
    }
}

fn exit_with(error: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(error, use_color));
    process::exit(error.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = match cli.output {
        Some(format) => format,
        None => config.output_format()?,
    };
    let mut output = OutputWriter::new(format, cli.use_color() && config.output.color, cli.quiet);

    tracing::info!(
        verbosity = cli.verbosity_level(),
        run_id = logging::current_run_id().unwrap_or("-"),
        "Executing command"
    );

    match cli.command {
        Commands::Copy(args) => handlers::handle_copy(args, &mut output),
        Commands::Check(args) => handlers::handle_check(args, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    // file settings only apply when no -v flag was given
    if cli.verbosity_level() == 0 {
        logging_config.merge_with_file(&config.logging)?;
    }
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
