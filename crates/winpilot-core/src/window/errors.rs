use crate::collaborator::{CollaboratorError, DomainError};
use crate::decode::FormatError;
use crate::errors::WinpilotError;
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to get desktop bounds: {source}")]
    DesktopBounds {
        #[source]
        source: Box<WindowError>,
    },

    #[error("failed to get screens: {source}")]
    ScreenList {
        #[source]
        source: Box<WindowError>,
    },
}

impl WindowError {
    /// Map a failed script run to a domain error when the script raised one
    /// of its own errors, keeping the raw failure otherwise.
    pub(crate) fn from_script_failure(error: CollaboratorError) -> Self {
        match error.output().and_then(DomainError::classify) {
            Some(domain) => WindowError::Domain(domain),
            None => WindowError::Collaborator(error),
        }
    }
}

impl WinpilotError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::Validation(e) => e.error_code(),
            WindowError::Format(e) => e.error_code(),
            WindowError::Collaborator(e) => e.error_code(),
            WindowError::Domain(e) => e.error_code(),
            WindowError::DesktopBounds { source } | WindowError::ScreenList { source } => {
                source.error_code()
            }
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            WindowError::Validation(e) => e.is_user_error(),
            WindowError::Format(e) => e.is_user_error(),
            WindowError::Collaborator(e) => e.is_user_error(),
            WindowError::Domain(e) => e.is_user_error(),
            WindowError::DesktopBounds { source } | WindowError::ScreenList { source } => {
                source.is_user_error()
            }
        }
    }
}
