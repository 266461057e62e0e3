//! `scim-filter-lex`: tokenizes SCIM filters given on the command line, or
//! interactively when none are given.

mod repl;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scim_filter_lexer::config::{CliConfig, OutputFormat, DEFAULT_CONFIG_FILE};
use scim_filter_lexer::render::{render_error, render_json, render_table, with_prefix};
use scim_filter_lexer::tokenize;

/// Tokenize SCIM filter expressions (RFC 7644 §3.4.2.2)
#[derive(Parser, Debug)]
#[command(name = "scim-filter-lex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenize SCIM filter expressions", long_about = None)]
struct Cli {
    /// Filters to tokenize; `filter=` is prepended when missing unless the
    /// config disables it. Starts a REPL when none are given.
    filters: Vec<String>,

    /// Print tokens as JSON
    #[arg(long)]
    json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = CliConfig::load_or_default(&cli.config);
    if cli.json {
        config.output = OutputFormat::Json;
    }

    if cli.filters.is_empty() {
        let mut repl = repl::Repl::new(config).context("failed to start the REPL")?;
        repl.run().context("REPL terminated unexpectedly")?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut all_ok = true;
    for filter in &cli.filters {
        let input = with_prefix(filter, config.auto_prefix);
        all_ok &= print_lexed(&input, config.output);
    }

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Lexes `input` and prints the tokens, or the error with a caret pointer.
/// Returns whether lexing succeeded.
pub(crate) fn print_lexed(input: &str, format: OutputFormat) -> bool {
    match tokenize(input) {
        Ok(tokens) => {
            match format {
                OutputFormat::Table => print!("{}", render_table(&tokens)),
                OutputFormat::Json => match render_json(&tokens) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("cannot serialize tokens: {e}"),
                },
            }
            true
        }
        Err(err) => {
            eprintln!("{}", render_error(input, &err));
            false
        }
    }
}
