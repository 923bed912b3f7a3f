pub mod logging;

pub use logging::{append_session_log, format_countdown, truncate_text};
