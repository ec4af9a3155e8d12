use crate::geometry::{PositionPreset, Rect};

/// A window that was moved and resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub app_name: String,
    /// 1-based window index; 1 is the frontmost window.
    pub window_index: u32,
    pub bounds: Rect,
}

/// Result of placing an application's frontmost window on a display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenMoveOutcome {
    pub app_name: String,
    pub screen_index: usize,
    pub screen_name: String,
    pub preset: PositionPreset,
    pub bounds: Rect,
}
