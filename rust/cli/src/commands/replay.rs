//! Replay command handler.
//!
//! Loads a hand record into a [`HandViewer`] and prints the reconstructed state at one
//! cursor position, or at every position of the chosen mode. The winner/loser summary
//! follows when the last position is the end of the hand.

use super::read_input;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_snapshot, format_summary};
use crate::ui;
use handlens_engine::reconstruct::{CursorMode, PotScope};
use handlens_viewer::{HandViewer, SessionError};
use std::io::Write;

pub fn handle_replay_command(
    input: &str,
    mode: CursorMode,
    cursor: Option<usize>,
    scope: Option<PotScope>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let mut settings = resolved.config.viewer_settings();
    settings.cursor_mode = mode;
    if let Some(scope) = scope {
        settings.pot_scope = scope;
    }

    let content = read_input(input)?;
    let mut viewer = HandViewer::new(settings)?;
    viewer.load_json(&content)?;
    let record = viewer.record().ok_or(SessionError::NothingLoaded)?;

    writeln!(
        out,
        "hand {}  players {}  actions {}",
        record.game_id.as_deref().unwrap_or("-"),
        record.seats().len(),
        record.action_count()
    )?;

    let last = viewer.last_index()?;
    let positions = match cursor {
        Some(index) => {
            if index > last {
                ui::display_warning(
                    err,
                    &format!("cursor {} is past the end, showing {}", index, last),
                )?;
            }
            index.min(last)..=index.min(last)
        }
        None => 0..=last,
    };

    let label = match mode {
        CursorMode::Action => "action",
        CursorMode::Round => "round",
    };
    for index in positions {
        let at = viewer.jump_to(index)?;
        ui::section(out, &format!("{} {}/{}", label, at.index, last))?;
        for line in format_snapshot(&*viewer.snapshot()?) {
            writeln!(out, "  {}", line)?;
        }
    }

    if let Some(summary) = viewer.summary()? {
        ui::section(out, "summary")?;
        for line in format_summary(&summary) {
            writeln!(out, "  {}", line)?;
        }
        if !summary.is_conserved() {
            ui::display_warning(
                err,
                &format!("deltas sum to {:+}; chips are not conserved", summary.net),
            )?;
        }
    }
    Ok(())
}
