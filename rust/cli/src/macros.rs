//! Macros for common CLI error handling patterns.

/// Write a line to a stream and return the error exit code if writing fails.
///
/// ```ignore
/// write_or_exit!(err, "Error: {}", message);
/// ```
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}

/// Map a command result to an exit code, reporting the error on `err`.
///
/// ```ignore
/// finish!(handle_stats_command(input, out), err)
/// ```
#[macro_export]
macro_rules! finish {
    ($result:expr, $err:expr) => {
        match $result {
            Ok(()) => $crate::exit_code::SUCCESS,
            Err(e) => {
                $crate::write_or_exit!($err, "Error: {}", e);
                $crate::exit_code::ERROR
            }
        }
    };
}
