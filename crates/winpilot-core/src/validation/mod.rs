//! Caller-input checks shared by every mutating operation.

mod errors;

pub use errors::ValidationError;

/// Reject non-positive window dimensions.
pub fn validate_size(width: i32, height: i32) -> Result<(), ValidationError> {
    if width <= 0 || height <= 0 {
        return Err(ValidationError::NonPositiveSize { width, height });
    }
    Ok(())
}

/// Window indices are 1-based; 1 is the frontmost window of the application.
pub fn validate_window_index(index: i64) -> Result<u32, ValidationError> {
    u32::try_from(index)
        .ok()
        .filter(|i| *i >= 1)
        .ok_or(ValidationError::InvalidWindowIndex { index })
}

/// Resolve a caller-supplied screen index against the number of available displays.
pub fn validate_screen_index(index: i64, count: usize) -> Result<usize, ValidationError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < count)
        .ok_or(ValidationError::ScreenIndexOutOfRange { index, count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_size() {
        assert!(validate_size(800, 600).is_ok());
        assert!(validate_size(0, 600).is_err());
        assert!(validate_size(800, -1).is_err());
    }

    #[test]
    fn test_validate_window_index() {
        assert_eq!(validate_window_index(1), Ok(1));
        assert_eq!(validate_window_index(7), Ok(7));
        assert_eq!(
            validate_window_index(0),
            Err(ValidationError::InvalidWindowIndex { index: 0 })
        );
        assert!(validate_window_index(-3).is_err());
    }

    #[test]
    fn test_validate_screen_index() {
        assert_eq!(validate_screen_index(0, 1), Ok(0));
        assert_eq!(validate_screen_index(1, 2), Ok(1));
        assert_eq!(
            validate_screen_index(2, 2),
            Err(ValidationError::ScreenIndexOutOfRange { index: 2, count: 2 })
        );
        assert!(validate_screen_index(-1, 2).is_err());
    }
}
