use clap::Parser;

mod cli;
mod commands;
mod convert;
mod error;
mod settings;

use crate::{cli::Cli, error::Result, settings::Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    let level = cli.level.clone().unwrap_or_else(|| settings.level.clone());

    tracing_subscriber::fmt()
        .with_env_filter(format!("divido={level},engine={level}"))
        .with_writer(std::io::stderr)
        .init();

    match commands::run(cli.command, &settings) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            tracing::error!("{err}");
            Err(err)
        }
    }
}
