use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use engine::{Currency, Money, SplitMode};

#[derive(Parser, Debug)]
#[command(name = "divido")]
#[command(about = "Split expense totals between payers and debtors")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the log level (also read from `DIVIDO_LEVEL`).
    #[arg(long, global = true)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a total between participants given on the command line.
    Split(SplitArgs),
    /// Run an allocation request read as JSON.
    Allocate(InputArgs),
    /// Validate an expense form read as JSON and print the request body.
    Expense(InputArgs),
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Total to split (e.g. `10`, `10.50`, `10,50`).
    #[arg(long)]
    pub total: Money,
    /// Split mode, `equal` or `weighted`; defaults to the configured one.
    #[arg(long)]
    pub mode: Option<SplitMode>,
    /// Participant as `id` or `id:shares`, in display order.
    #[arg(long = "participant", required = true)]
    pub participants: Vec<String>,
    /// Participant listed but excluded from the split.
    #[arg(long)]
    pub inactive: Vec<String>,
    /// Hand-typed amount as `id=amount`, applied after the split.
    #[arg(long = "override")]
    pub overrides: Vec<String>,
    /// Currency used when printing; defaults to the configured one.
    #[arg(long)]
    pub currency: Option<Currency>,
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// JSON file to read; stdin when omitted.
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}
