//! Application lifecycle events.

use tracing::{error, info, warn};

use crate::errors::WinpilotError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

/// Log an error with its code; user errors are warnings.
pub fn log_app_error<E: WinpilotError + ?Sized>(error: &E) {
    if error.is_user_error() {
        warn!(
            event = "core.app.user_error",
            error = %error,
            error_code = error.error_code()
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code()
        );
    }
}
