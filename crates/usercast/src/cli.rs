//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use usercast_core::ImportantStrategy;

/// Compile userstyle documents into injectable CSS.
#[derive(Parser)]
#[command(name = "usercast")]
#[command(version)]
#[command(about = "Compile userstyle documents into injectable CSS")]
pub struct Cli {
    /// Enable verbose output (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform one or more userstyle files and write the results
    Build(BuildArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Input userstyle files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for the compiled CSS
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Metadata JSON applied to every input, overriding sibling
    /// `<stem>.meta.json` files
    #[arg(long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// How declarations are promoted to !important
    #[arg(long, value_enum, default_value_t = Strategy::Structural)]
    pub strategy: Strategy,

    /// Report failing inputs but keep transforming the rest
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Line-oriented regex rewrite
    Textual,
    /// Escalation through the parsed tree
    Structural,
}

impl From<Strategy> for ImportantStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Textual => ImportantStrategy::Textual,
            Strategy::Structural => ImportantStrategy::Structural,
        }
    }
}
