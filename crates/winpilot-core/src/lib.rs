//! Window and display management for macOS, driven through AppleScript and
//! `system_profiler`.
//!
//! [`window::WindowManager`] is the entry point; everything it needs from
//! the operating system goes through the [`collaborator::Collaborator`] trait.

pub mod collaborator;
pub mod config;
pub mod decode;
pub mod display;
pub mod errors;
pub mod escape;
pub mod events;
pub mod geometry;
pub mod logging;
pub mod validation;
pub mod window;

pub use collaborator::{Collaborator, SystemCollaborator};
pub use config::{WinpilotConfig, load_config};
pub use display::{DisplayLayout, DisplayRegion};
pub use errors::WinpilotError;
pub use geometry::{CustomPlacement, PositionPreset, Rect};
pub use logging::{LogFormat, init_logging};
pub use window::{MoveOutcome, ScreenMoveOutcome, WindowError, WindowManager};
