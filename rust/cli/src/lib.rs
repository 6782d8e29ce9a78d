//! # Handlens CLI Library
//!
//! Command-line inspection of recorded hands and job score series.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["handlens", "replay", "--input", "hand.json", "--mode", "round"];
//! let code = handlens_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `replay`: Step through a hand record by action or by betting round
//! - `validate`: Check the minimal shape of a hand record
//! - `stats`: Per-iteration statistics of a job's score series
//! - `highlights`: Ranked interesting games of a job
//! - `chart`: Downsampled per-player chart series of a job
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
mod macros;
pub mod ui;

use cli::{Commands, HandlensCli};
use commands::{
    handle_cfg_command, handle_chart_command, handle_highlights_command, handle_replay_command,
    handle_stats_command, handle_validate_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["replay", "validate", "stats", "highlights", "chart", "cfg"];

/// Parses `args` and dispatches to the subcommand handler.
///
/// Returns the process exit code: `0` for success, `2` for errors. Help and version
/// output go to `out` with exit code `0`.
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = handlens_cli::run(["handlens", "--help"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("replay"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HandlensCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: handlens <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: handlens --help");
                    exit_code::ERROR
                }
            };
        }
    };

    tracing::debug!(command = ?cli.cmd, "dispatching");
    match cli.cmd {
        Commands::Replay {
            input,
            mode,
            cursor,
            scope,
        } => finish!(
            handle_replay_command(
                &input,
                mode.into(),
                cursor,
                scope.map(Into::into),
                out,
                err
            ),
            err
        ),
        Commands::Validate { input } => finish!(handle_validate_command(&input, out), err),
        Commands::Stats { input } => finish!(handle_stats_command(&input, out), err),
        Commands::Highlights { input, top } => {
            finish!(handle_highlights_command(&input, top, out, err), err)
        }
        Commands::Chart {
            input,
            bucket,
            from,
            to,
        } => finish!(handle_chart_command(&input, bucket, from, to, out), err),
        Commands::Cfg => finish!(handle_cfg_command(out), err),
    }
}
