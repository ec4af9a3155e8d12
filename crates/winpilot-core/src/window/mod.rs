mod errors;
mod handler;
mod scripts;
mod types;

pub use errors::WindowError;
pub use handler::WindowManager;
pub use types::{MoveOutcome, ScreenMoveOutcome};
