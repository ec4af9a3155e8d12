use std::error::Error;

/// Base trait for all winpilot errors
pub trait WinpilotError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    impl WinpilotError for Boom {
        fn error_code(&self) -> &'static str {
            "BOOM"
        }
    }

    #[test]
    fn test_is_user_error_defaults_to_false() {
        let error: Box<dyn WinpilotError> = Box::new(Boom);
        assert_eq!(error.error_code(), "BOOM");
        assert!(!error.is_user_error());
    }
}
