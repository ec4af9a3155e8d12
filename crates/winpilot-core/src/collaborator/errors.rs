use crate::errors::WinpilotError;

/// An external command could not produce a result.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("Failed to start {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} error: {status} (output: {output})")]
    Failed {
        program: String,
        status: String,
        output: String,
    },

    #[error("{program} timed out after {timeout_secs}s")]
    TimedOut { program: String, timeout_secs: u64 },

    #[error("{program} was cancelled")]
    Cancelled { program: String },
}

impl CollaboratorError {
    /// Diagnostic text captured from the command, if it ran to completion.
    pub fn output(&self) -> Option<&str> {
        match self {
            CollaboratorError::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}

impl WinpilotError for CollaboratorError {
    fn error_code(&self) -> &'static str {
        match self {
            CollaboratorError::SpawnFailed { .. } => "COLLABORATOR_SPAWN_FAILED",
            CollaboratorError::Failed { .. } => "COLLABORATOR_FAILED",
            CollaboratorError::TimedOut { .. } => "COLLABORATOR_TIMED_OUT",
            CollaboratorError::Cancelled { .. } => "COLLABORATOR_CANCELLED",
        }
    }
}

/// A contradiction reported by the window manager itself.
///
/// Each variant keeps the collaborator's full output for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{message} (output: {output})")]
    AppNotRunning { message: String, output: String },

    #[error("{message} (output: {output})")]
    NoWindows { message: String, output: String },

    #[error("{message} (output: {output})")]
    WindowNotFound { message: String, output: String },
}

impl DomainError {
    /// Recognize the errors raised by our own scripts in a failed run's output.
    ///
    /// osascript reports them as `execution error: <message> (<code>)`.
    pub fn classify(output: &str) -> Option<DomainError> {
        let message = script_message(output);
        let output = output.to_string();
        if message.contains("is not running") {
            Some(DomainError::AppNotRunning { message, output })
        } else if message.contains("has no windows") {
            Some(DomainError::NoWindows { message, output })
        } else if message.contains("does not have window") {
            Some(DomainError::WindowNotFound { message, output })
        } else {
            None
        }
    }

    pub fn output(&self) -> &str {
        match self {
            DomainError::AppNotRunning { output, .. }
            | DomainError::NoWindows { output, .. }
            | DomainError::WindowNotFound { output, .. } => output,
        }
    }
}

fn script_message(output: &str) -> String {
    let text = output.trim();
    let text = text
        .find("execution error: ")
        .map_or(text, |i| &text[i + "execution error: ".len()..]);
    let text = match text.rfind(" (") {
        Some(i) if text.ends_with(')') => &text[..i],
        _ => text,
    };
    text.trim().to_string()
}

impl WinpilotError for DomainError {
    fn error_code(&self) -> &'static str {
        match self {
            DomainError::AppNotRunning { .. } => "DOMAIN_APP_NOT_RUNNING",
            DomainError::NoWindows { .. } => "DOMAIN_NO_WINDOWS",
            DomainError::WindowNotFound { .. } => "DOMAIN_WINDOW_NOT_FOUND",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
