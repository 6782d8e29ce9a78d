//! Validate command: minimal shape check of a hand record.

use super::read_input;
use crate::error::CliError;
use handlens_engine::record::HandRecord;
use std::io::Write;

/// Prints `valid` when the record passes the shape check and decodes; otherwise the
/// invalid-game-data reason is returned as the error.
pub fn handle_validate_command(input: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let content = read_input(input)?;
    let record = HandRecord::from_json(&content)?;
    tracing::debug!(
        input,
        players = record.seats().len(),
        actions = record.action_count(),
        "record validated"
    );
    writeln!(out, "valid")?;
    Ok(())
}
