//! Veneer CLI — the command-line interface for the Veneer assembly
//! pipeline.
//!
//! Provides `veneer assemble` for running the full pipeline against the
//! configured version coordinate and `veneer clean` for removing a
//! coordinate's working tree.

#![warn(missing_docs)]

mod assemble;
mod clean;

use std::process;

use clap::{Parser, Subcommand};

/// Veneer — abstracted-API assembly for versioned binary distributions.
#[derive(Parser, Debug)]
#[command(name = "veneer", version, about = "Veneer assembly pipeline")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a custom `veneer.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full assembly pipeline for the configured coordinate.
    Assemble,
    /// Remove a coordinate's working tree.
    Clean(CleanArgs),
}

/// Arguments for the `veneer clean` subcommand.
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Remove the entire working directory, not just the configured
    /// coordinate's tree.
    #[arg(long)]
    pub all: bool,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Assemble => assemble::run(&global),
        Command::Clean(ref args) => clean::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
