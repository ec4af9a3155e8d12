//! Collaborator backed by `osascript` and `system_profiler`.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::errors::CollaboratorError;
use super::traits::Collaborator;
use crate::config::CollaboratorConfig;

/// Arguments that make `system_profiler` print the display inventory as JSON.
const INVENTORY_ARGS: [&str; 2] = ["SPDisplaysDataType", "-json"];

/// Runs the real OS tools as child processes.
///
/// Every call is raced against its cancellation token and the configured
/// timeout; the child is killed when either wins.
#[derive(Debug, Clone)]
pub struct SystemCollaborator {
    osascript: String,
    system_profiler: String,
    timeout: Duration,
}

impl SystemCollaborator {
    pub fn new(config: &CollaboratorConfig) -> Self {
        Self {
            osascript: config.osascript.clone(),
            system_profiler: config.system_profiler.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cancel: &CancellationToken,
    ) -> Result<String, CollaboratorError> {
        debug!(event = "core.collaborator.run_started", program = program);

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CollaboratorError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;

        let output = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(event = "core.collaborator.run_cancelled", program = program);
                return Err(CollaboratorError::Cancelled {
                    program: program.to_string(),
                });
            }
            result = tokio::time::timeout(self.timeout, child.wait_with_output()) => match result {
                Ok(output) => output.map_err(|source| CollaboratorError::SpawnFailed {
                    program: program.to_string(),
                    source,
                })?,
                Err(_) => {
                    warn!(
                        event = "core.collaborator.run_timed_out",
                        program = program,
                        timeout_secs = self.timeout.as_secs()
                    );
                    return Err(CollaboratorError::TimedOut {
                        program: program.to_string(),
                        timeout_secs: self.timeout.as_secs(),
                    });
                }
            },
        };

        let combined = combine_output(&output.stdout, &output.stderr);

        if output.status.success() {
            debug!(
                event = "core.collaborator.run_completed",
                program = program,
                bytes = combined.len()
            );
            Ok(combined)
        } else {
            debug!(
                event = "core.collaborator.run_failed",
                program = program,
                status = %output.status,
                output = %combined
            );
            Err(CollaboratorError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                output: combined,
            })
        }
    }
}

impl Collaborator for SystemCollaborator {
    async fn run_script(
        &self,
        script: &str,
        cancel: &CancellationToken,
    ) -> Result<String, CollaboratorError> {
        self.run(&self.osascript, &["-e", script], cancel).await
    }

    async fn run_inventory(&self, cancel: &CancellationToken) -> Result<String, CollaboratorError> {
        self.run(&self.system_profiler, &INVENTORY_ARGS, cancel).await
    }
}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    match (stdout.trim(), stderr.trim()) {
        (out, "") => out.to_string(),
        ("", err) => err.to_string(),
        (out, err) => format!("{out}\n{err}"),
    }
}
