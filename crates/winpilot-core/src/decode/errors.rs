use crate::errors::WinpilotError;

/// Collaborator output that does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("expected {expected} {delimiter}-separated values, got {actual} ({raw:?})")]
    FieldCount {
        expected: usize,
        actual: usize,
        delimiter: &'static str,
        raw: String,
    },

    #[error("invalid integer for {field} at position {position}: {segment:?}")]
    InvalidInteger {
        field: &'static str,
        position: usize,
        segment: String,
    },

    #[error("invalid geometry {raw:?}: {reason}")]
    InvalidGeometry { raw: String, reason: String },

    #[error("invalid display inventory JSON: {message}")]
    InvalidJson { message: String },
}

impl WinpilotError for FormatError {
    fn error_code(&self) -> &'static str {
        match self {
            FormatError::FieldCount { .. } => "FORMAT_FIELD_COUNT",
            FormatError::InvalidInteger { .. } => "FORMAT_INVALID_INTEGER",
            FormatError::InvalidGeometry { .. } => "FORMAT_INVALID_GEOMETRY",
            FormatError::InvalidJson { .. } => "FORMAT_INVALID_JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_names_both_counts() {
        let error = FormatError::FieldCount {
            expected: 4,
            actual: 3,
            delimiter: "comma",
            raw: "1,2,3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "expected 4 comma-separated values, got 3 (\"1,2,3\")"
        );
        assert_eq!(error.error_code(), "FORMAT_FIELD_COUNT");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_invalid_integer_names_segment_and_position() {
        let error = FormatError::InvalidInteger {
            field: "value",
            position: 2,
            segment: "abc".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid integer for value at position 2: \"abc\""
        );
    }
}
