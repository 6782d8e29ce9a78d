//! Configuration command handler.
//!
//! Displays the resolved configuration with the source of every value (default,
//! configuration file, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "bucket_size": {
//!     "value": 1,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "bucket_size": {
            "value": config.bucket_size,
            "source": sources.bucket_size,
        },
        "top": {
            "value": config.top,
            "source": sources.top,
        },
        "scope": {
            "value": config.scope,
            "source": sources.scope,
        },
        "thresholds": {
            "value": config.thresholds,
            "source": sources.thresholds,
        }
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;
    Ok(())
}
