use crate::errors::WinpilotError;

/// Bad caller input, detected before any collaborator is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("appName is required")]
    EmptyAppName,

    #[error("Invalid appName '{name}': {reason}")]
    InvalidAppName { name: String, reason: String },

    #[error("width and height must be > 0 (got {width}x{height})")]
    NonPositiveSize { width: i32, height: i32 },

    #[error("windowIndex must be >= 1 (got {index})")]
    InvalidWindowIndex { index: i64 },

    #[error("position is required")]
    MissingPosition,

    #[error("invalid position preset: '{value}' (valid: {valid})")]
    UnknownPreset { value: String, valid: String },

    #[error("custom position requires xOffset, yOffset, width, and height (missing: {missing})")]
    MissingCustomFields { missing: String },

    #[error("{field} {offset} moves the window outside the coordinate space")]
    OffsetOutOfRange { field: &'static str, offset: i32 },

    #[error("invalid screen index {index} (available: 0-{last})", last = .count.saturating_sub(1))]
    ScreenIndexOutOfRange { index: i64, count: usize },
}

impl WinpilotError for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            ValidationError::EmptyAppName => "VALIDATION_EMPTY_APP_NAME",
            ValidationError::InvalidAppName { .. } => "VALIDATION_INVALID_APP_NAME",
            ValidationError::NonPositiveSize { .. } => "VALIDATION_NON_POSITIVE_SIZE",
            ValidationError::InvalidWindowIndex { .. } => "VALIDATION_INVALID_WINDOW_INDEX",
            ValidationError::MissingPosition => "VALIDATION_MISSING_POSITION",
            ValidationError::UnknownPreset { .. } => "VALIDATION_UNKNOWN_PRESET",
            ValidationError::MissingCustomFields { .. } => "VALIDATION_MISSING_CUSTOM_FIELDS",
            ValidationError::OffsetOutOfRange { .. } => "VALIDATION_OFFSET_OUT_OF_RANGE",
            ValidationError::ScreenIndexOutOfRange { .. } => "VALIDATION_SCREEN_INDEX_OUT_OF_RANGE",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_index_message_names_available_range() {
        let error = ValidationError::ScreenIndexOutOfRange { index: 3, count: 2 };
        assert_eq!(error.to_string(), "invalid screen index 3 (available: 0-1)");
        assert_eq!(error.error_code(), "VALIDATION_SCREEN_INDEX_OUT_OF_RANGE");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_non_positive_size_display() {
        let error = ValidationError::NonPositiveSize {
            width: 0,
            height: 600,
        };
        assert_eq!(
            error.to_string(),
            "width and height must be > 0 (got 0x600)"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationError>();
    }
}
