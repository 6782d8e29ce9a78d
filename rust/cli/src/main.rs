use std::io;

use handlens_viewer::logging::{init_logging_with, LogFormat, DEFAULT_FILTER};

/// `json` switches log output to one JSON object per line.
const LOG_FORMAT_ENV: &str = "HANDLENS_LOG_FORMAT";

fn main() {
    let format = match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    };
    if let Err(e) = init_logging_with(DEFAULT_FILTER, format) {
        eprintln!("WARNING: logging disabled: {}", e);
    }
    let code = handlens_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
