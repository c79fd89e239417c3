mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Extract { source, json } => commands::extract(source, *json, &config),
        Commands::Export {
            source,
            format,
            output,
            no_comments,
        } => commands::export(source, *format, output.as_deref(), *no_comments, &config),
        Commands::Scale { color, json } => commands::scale(color, *json),
        Commands::Contrast {
            foreground,
            background,
        } => {
            commands::contrast(foreground, background);
            Ok(())
        }
        Commands::Harmony { colors } => {
            commands::harmony(colors);
            Ok(())
        }
    }
}
