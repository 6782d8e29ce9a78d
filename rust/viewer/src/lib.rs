pub mod errors;
pub mod logging;
pub mod session;
pub mod settings;

pub use errors::{ErrorResponse, ErrorSeverity, FetchError};
pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use session::{
    HandViewer, JobViewer, LoadOutcome, LoadTicket, SessionError, SessionId,
};
pub use settings::{SettingsError, ViewerSettings};
