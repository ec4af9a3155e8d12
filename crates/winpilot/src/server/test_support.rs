use std::collections::VecDeque;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use winpilot_core::Collaborator;
use winpilot_core::collaborator::CollaboratorError;

/// Collaborator that replays canned replies and records each script.
#[derive(Default)]
pub struct ScriptedCollaborator {
    replies: Mutex<VecDeque<Result<String, CollaboratorError>>>,
    inventory: Option<String>,
    scripts: Mutex<Vec<String>>,
}

impl ScriptedCollaborator {
    pub fn with_script_replies(replies: &[&str]) -> Self {
        let collaborator = Self::default();
        collaborator
            .replies
            .lock()
            .unwrap()
            .extend(replies.iter().map(|r| Ok(r.to_string())));
        collaborator
    }

    pub fn failing(output: &str) -> Self {
        let collaborator = Self::default();
        collaborator
            .replies
            .lock()
            .unwrap()
            .push_back(Err(CollaboratorError::Failed {
                program: "osascript".to_string(),
                status: "exit status: 1".to_string(),
                output: output.to_string(),
            }));
        collaborator
    }

    pub fn inventory(mut self, json: &str) -> Self {
        self.inventory = Some(json.to_string());
        self
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }
}

impl Collaborator for ScriptedCollaborator {
    async fn run_script(
        &self,
        script: &str,
        cancel: &CancellationToken,
    ) -> Result<String, CollaboratorError> {
        self.scripts.lock().unwrap().push(script.to_string());
        if cancel.is_cancelled() {
            return Err(CollaboratorError::Cancelled {
                program: "osascript".to_string(),
            });
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    async fn run_inventory(&self, _cancel: &CancellationToken) -> Result<String, CollaboratorError> {
        Ok(self.inventory.clone().unwrap_or_else(|| "{}".to_string()))
    }
}
