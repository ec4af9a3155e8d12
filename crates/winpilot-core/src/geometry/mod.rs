mod preset;
mod types;

pub use preset::{CustomPlacement, PositionPreset, compute_rect};
pub use types::Rect;
