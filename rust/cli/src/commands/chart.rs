//! Chart series of a job: anchored and downsampled per player.

use super::load_job;
use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_chart_command(
    input: &str,
    bucket: Option<usize>,
    from: Option<usize>,
    to: Option<usize>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let mut settings = resolved.config.viewer_settings();
    if let Some(bucket) = bucket {
        settings.bucket_size = bucket;
    }

    let mut viewer = load_job(input, settings)?;
    if from.is_some() || to.is_some() {
        let start = from.unwrap_or(0);
        let end = to.unwrap_or(usize::MAX);
        if start >= end {
            return Err(CliError::InvalidInput(format!(
                "empty zoom window {}..{}",
                start, end
            )));
        }
        viewer.set_zoom(start..end);
    }

    let display = serde_json::json!({
        "bucketSize": viewer.bucket_size(),
        "zoom": viewer.zoom().map(|range| [range.start, range.end]),
        "series": viewer.chart()?,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;
    Ok(())
}
