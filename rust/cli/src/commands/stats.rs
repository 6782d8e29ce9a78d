//! Per-iteration statistics of a job's score series.

use super::load_job;
use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Prints mean, variance, standard deviation and range of every iteration as JSON.
pub fn handle_stats_command(input: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let viewer = load_job(input, resolved.config.viewer_settings())?;
    let stats = viewer.iteration_stats()?;
    writeln!(out, "{}", serde_json::to_string_pretty(stats)?)?;
    Ok(())
}
