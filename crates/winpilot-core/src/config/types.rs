use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Top-level configuration, read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinpilotConfig {
    pub collaborators: CollaboratorConfig,
    pub logging: LoggingConfig,
}

/// Programs used to drive the window manager and list displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorConfig {
    pub osascript: String,
    pub system_profiler: String,
    /// Upper bound for a single external command.
    pub timeout_secs: u64,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            osascript: "osascript".to_string(),
            system_profiler: "system_profiler".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}
