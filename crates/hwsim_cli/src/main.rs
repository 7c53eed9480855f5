//! hwsim CLI — command-line driver for the boolean circuit simulator.
//!
//! Provides `hwsim run` to simulate a JSON circuit description and print its
//! traces, and `hwsim check` to validate a description without running it.

#![warn(missing_docs)]

mod check;
mod pipeline;
mod run;

use std::process;

use clap::{ArgAction, Parser, Subcommand};

/// hwsim — a cycle-based boolean circuit simulator.
#[derive(Parser, Debug)]
#[command(name = "hwsim", version, about = "Boolean circuit simulator")]
pub struct Cli {
    /// Suppress all output except errors and traces.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a custom `hwsim.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a circuit and print its traces.
    Run(RunArgs),
    /// Validate a circuit and its stimulus without simulating.
    Check(CheckArgs),
}

/// Arguments for `hwsim run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Circuit description (JSON).
    pub circuit: String,

    /// Write a VCD waveform to this path.
    #[arg(long)]
    pub vcd: Option<String>,

    /// Disable waveform recording even if the configuration enables it.
    #[arg(long, conflicts_with = "vcd")]
    pub no_waveform: bool,
}

/// Arguments for `hwsim check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Circuit description (JSON).
    pub circuit: String,
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

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.quiet, cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Maps `-q` / `-v` flags to a tracing filter directive.
fn log_filter(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
