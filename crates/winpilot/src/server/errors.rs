use winpilot_core::WinpilotError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("stdio error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl WinpilotError for ServerError {
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Io(_) => "SERVER_IO_ERROR",
            ServerError::Encode(_) => "SERVER_ENCODE_ERROR",
        }
    }
}
