use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::errors::ConfigError;
use super::types::WinpilotConfig;

const CONFIG_DIR_NAME: &str = "winpilot";
const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config dir>/winpilot/config.toml`, e.g. `~/Library/Application Support/winpilot/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<WinpilotConfig, ConfigError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::ConfigNotFound {
                    path: path.display().to_string(),
                });
            }
            path.to_path_buf()
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                debug!(event = "core.config.defaults_used");
                return Ok(WinpilotConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;

    info!(
        event = "core.config.loaded",
        path = %path.display(),
        timeout_secs = config.collaborators.timeout_secs
    );
    Ok(config)
}

/// Parse and validate a TOML document.
pub fn parse_config(content: &str) -> Result<WinpilotConfig, ConfigError> {
    let config: WinpilotConfig =
        toml::from_str(content).map_err(|e| ConfigError::ConfigParseError {
            message: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &WinpilotConfig) -> Result<(), ConfigError> {
    let collaborators = &config.collaborators;
    if collaborators.timeout_secs == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "collaborators.timeout_secs must be greater than 0".to_string(),
        });
    }
    if collaborators.osascript.trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "collaborators.osascript must not be empty".to_string(),
        });
    }
    if collaborators.system_profiler.trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "collaborators.system_profiler must not be empty".to_string(),
        });
    }
    Ok(())
}
