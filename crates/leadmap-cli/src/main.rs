//! Leadmap CLI - map lead spreadsheets onto CRM fields.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
            }),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Map {
            file,
            output,
            object,
            llm,
            model,
            locale,
            json,
        } => commands::map::run(file, output, object, llm, model, locale, json, cli.verbose),

        Commands::Clean {
            file,
            output,
            object,
            llm,
            model,
        } => commands::clean::run(file, output, object, llm, model),

        Commands::Fields { object } => commands::fields::run(object),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
