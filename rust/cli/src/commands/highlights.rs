//! Ranked interesting games of a job.

use super::load_job;
use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_highlights_command(
    input: &str,
    top: Option<usize>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let mut settings = resolved.config.viewer_settings();
    if let Some(top) = top {
        settings.highlight_count = top;
    }

    let viewer = load_job(input, settings)?;
    let highlights = viewer.highlights()?;
    if highlights.is_empty() {
        ui::display_warning(err, "no iteration passed the change gate")?;
    }
    writeln!(out, "{}", serde_json::to_string_pretty(highlights)?)?;
    Ok(())
}
