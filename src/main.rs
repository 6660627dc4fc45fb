mod cli;
mod commands;
mod engine;
mod model;
mod parse;
mod report;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Overview(args) => commands::overview::run(args),
        Commands::Models(args) => commands::models::run(args),
        Commands::Judges(args) => commands::judges::run(args),
        Commands::Categories(args) => commands::categories::run(args),
        Commands::Depth(args) => commands::depth::run(args),
        Commands::Questions(args) => commands::questions::run(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
