//! Command-line definition.

use clap::{Parser, Subcommand, ValueEnum};
use handlens_engine::reconstruct::{CursorMode, PotScope};

#[derive(Parser, Debug)]
#[command(
    name = "handlens",
    version,
    about = "Handlens replay and job analytics CLI"
)]
pub struct HandlensCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Step through a recorded hand
    Replay {
        /// Hand record JSON (optionally .zst compressed)
        #[arg(long)]
        input: String,
        #[arg(long, value_enum, default_value_t = ModeArg::Action)]
        mode: ModeArg,
        /// Show only this cursor position instead of every step
        #[arg(long)]
        cursor: Option<usize>,
        /// Pot figures to show; defaults to the configured scope
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },
    /// Check that a hand record has the minimal shape
    Validate {
        #[arg(long)]
        input: String,
    },
    /// Per-iteration statistics of a job's score series
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Ranked interesting games of a job
    Highlights {
        #[arg(long)]
        input: String,
        /// Maximum number of games to report
        #[arg(long)]
        top: Option<usize>,
    },
    /// Downsampled chart series of a job
    Chart {
        #[arg(long)]
        input: String,
        /// Hands averaged into one point
        #[arg(long)]
        bucket: Option<usize>,
        /// First hand of the zoom window
        #[arg(long)]
        from: Option<usize>,
        /// End (exclusive) of the zoom window
        #[arg(long)]
        to: Option<usize>,
    },
    /// Display the resolved configuration
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// One step per action
    Action,
    /// One step per betting round
    Round,
}

impl From<ModeArg> for CursorMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Action => CursorMode::Action,
            ModeArg::Round => CursorMode::Round,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Pot of the current betting round
    Round,
    /// Pot accumulated over the hand
    Total,
}

impl From<ScopeArg> for PotScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Round => PotScope::Round,
            ScopeArg::Total => PotScope::Total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        HandlensCli::command().debug_assert();
    }

    #[test]
    fn parses_replay_flags() {
        let cli = HandlensCli::try_parse_from([
            "handlens", "replay", "--input", "h.json", "--mode", "round", "--cursor", "2",
            "--scope", "total",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Replay {
                mode,
                cursor,
                scope,
                ..
            } => {
                assert_eq!(mode, ModeArg::Round);
                assert_eq!(cursor, Some(2));
                assert_eq!(scope, Some(ScopeArg::Total));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
