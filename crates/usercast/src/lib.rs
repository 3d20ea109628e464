//! The `usercast` command-line tool.
//!
//! A thin driver over [`usercast_core`]: argument parsing lives in [`cli`],
//! the batch compiler in [`batch`]. The binary entry point delegates to
//! [`run`] so integration tests can drive the same code path.

pub mod batch;
pub mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::batch::{build, load_metadata_file, BuildOptions};
use crate::cli::{Cli, Command};

/// Parses arguments from the process environment and runs the tool.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Build(args) => run_build(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_build(args: cli::BuildArgs) -> anyhow::Result<()> {
    let metadata_override = match &args.metadata {
        Some(path) => Some(
            load_metadata_file(path)
                .with_context(|| format!("loading metadata from {}", path.display()))?,
        ),
        None => None,
    };

    let options = BuildOptions {
        pipeline: usercast_core::PipelineOptions {
            strategy: args.strategy.into(),
        },
        keep_going: args.keep_going,
        metadata_override,
    };

    let outcome = build(&args.inputs, &args.output, &options)?;
    for (input, warning) in &outcome.warnings {
        eprintln!("{}: {}", input.display(), warning);
    }
    for (input, error) in &outcome.failures {
        eprintln!("error: {}: {}", input.display(), error);
    }
    // With --keep-going a partial batch still counts as success; only a batch
    // where nothing compiled fails the run.
    if !outcome.failures.is_empty() && outcome.written.is_empty() {
        bail!("all {} inputs failed", args.inputs.len());
    }
    Ok(())
}
