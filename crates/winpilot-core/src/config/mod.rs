//! TOML configuration for collaborator programs, timeouts and logging.

mod errors;
mod loading;
mod types;

pub use errors::ConfigError;
pub use loading::{default_config_path, load_config, parse_config, validate_config};
pub use types::{CollaboratorConfig, LoggingConfig, WinpilotConfig};
