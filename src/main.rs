//! Modcache - persistent HTTP cache for module resolution toolchains
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use modcache::cli::{self, Cli, Commands};
use modcache::config::CacheConfig;
use modcache::error::CacheResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> CacheResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("modcache=warn"),
        1 => EnvFilter::new("modcache=info"),
        _ => EnvFilter::new("modcache=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = CacheConfig::load(cli.config.as_deref())?;
    let options = cli::create_options(&cli, &config)?;

    match cli.command {
        Commands::Get(args) => cli::commands::get(args, options),
        Commands::Headers(args) => cli::commands::headers(args, options),
        Commands::Set(args) => cli::commands::set(args, options),
        Commands::Path(args) => cli::commands::path(args, options),
    }
}
