use tokio_util::sync::CancellationToken;
#[allow(unused_imports)]
use tracing::{error, info};

/// Cancel `token` on SIGINT or SIGTERM.
///
/// In-flight collaborator calls observe the cancellation through child
/// tokens and the server loop stops reading.
pub async fn wait_for_shutdown_signal(token: CancellationToken) -> Result<(), std::io::Error> {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

        tokio::select! {
            _ = ctrl_c => {
                info!(event = "server.signal_received", signal = "SIGINT");
            }
            _ = sigterm.recv() => {
                info!(event = "server.signal_received", signal = "SIGTERM");
            }
            _ = token.cancelled() => return Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            result = ctrl_c => match result {
                Ok(()) => info!(event = "server.signal_received", signal = "SIGINT"),
                Err(e) => error!(
                    event = "server.signal_handler_failed",
                    error = %e,
                    "Ctrl-C handler failed, shutting down anyway",
                ),
            },
            _ = token.cancelled() => return Ok(()),
        }
    }

    token.cancel();
    Ok(())
}

/// A root token wired to the process signals.
pub fn signal_token() -> CancellationToken {
    let token = CancellationToken::new();
    tokio::spawn(wait_for_shutdown_signal(token.clone()));
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_when_token_cancelled_elsewhere() {
        let token = CancellationToken::new();
        token.cancel();
        wait_for_shutdown_signal(token.clone()).await.unwrap();
        assert!(token.is_cancelled());
    }
}
