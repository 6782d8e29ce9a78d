//! Command handler modules for the handlens CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed as parameters
//! - Errors propagated via `CliError`; `run` reports them and maps them to exit codes

mod cfg;
mod chart;
mod highlights;
mod replay;
mod stats;
mod validate;

pub use cfg::handle_cfg_command;
pub use chart::handle_chart_command;
pub use highlights::handle_highlights_command;
pub use replay::handle_replay_command;
pub use stats::handle_stats_command;
pub use validate::handle_validate_command;

use crate::error::CliError;
use crate::io_utils::read_text_auto;

/// Reads an input file, naming it in the error.
fn read_input(path: &str) -> Result<String, CliError> {
    read_text_auto(path).map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", path, e)))
}

/// Loads a job's score series into a viewer built from the resolved configuration.
fn load_job(
    input: &str,
    settings: handlens_viewer::ViewerSettings,
) -> Result<handlens_viewer::JobViewer, CliError> {
    let content = read_input(input)?;
    let mut viewer = handlens_viewer::JobViewer::new(settings)?;
    viewer.load_json(&content)?;
    Ok(viewer)
}
