use std::fmt;

use crate::geometry::{CustomPlacement, PositionPreset, Rect, compute_rect};
use crate::validation::ValidationError;

/// Name given to the synthetic region used when the inventory is unusable.
pub const FALLBACK_DISPLAY_NAME: &str = "Main Display";

/// A display's extent within the virtual desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRegion {
    /// 0-based position in the enumeration it came from; 0 is the main display.
    pub index: usize,
    pub name: String,
    pub bounds: Rect,
    pub is_main: bool,
}

impl DisplayRegion {
    /// Window rectangle for `preset` on this display.
    pub fn place(
        &self,
        preset: PositionPreset,
        custom: &CustomPlacement,
    ) -> Result<Rect, ValidationError> {
        compute_rect(&self.bounds, preset, custom)
    }
}

/// Why the layout builder fell back to a single synthetic display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    InventoryUnavailable,
    InventoryUnparseable,
    NoDisplays,
    NoUsableResolution,
    NoMainDisplay,
    MultipleMainDisplays,
    OutOfRange,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::InventoryUnavailable => "inventory_unavailable",
            FallbackReason::InventoryUnparseable => "inventory_unparseable",
            FallbackReason::NoDisplays => "no_displays",
            FallbackReason::NoUsableResolution => "no_usable_resolution",
            FallbackReason::NoMainDisplay => "no_main_display",
            FallbackReason::MultipleMainDisplays => "multiple_main_displays",
            FallbackReason::OutOfRange => "out_of_range",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, non-overlapping display regions plus the desktop totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLayout {
    pub displays: Vec<DisplayRegion>,
    /// Width of the virtual desktop bounds, not the sum of the regions.
    pub total_width: i32,
    /// Height of the virtual desktop bounds, not the sum of the regions.
    pub total_height: i32,
    /// Set when `displays` is the single synthetic region.
    pub fallback: Option<FallbackReason>,
}

impl DisplayLayout {
    /// One synthetic main region covering the whole virtual desktop.
    pub fn fallback(desktop: Rect, reason: FallbackReason) -> Self {
        Self {
            displays: vec![DisplayRegion {
                index: 0,
                name: FALLBACK_DISPLAY_NAME.to_string(),
                bounds: desktop,
                is_main: true,
            }],
            total_width: desktop.width(),
            total_height: desktop.height(),
            fallback: Some(reason),
        }
    }

    pub fn count(&self) -> usize {
        self.displays.len()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn get(&self, index: usize) -> Option<&DisplayRegion> {
        self.displays.get(index)
    }
}
