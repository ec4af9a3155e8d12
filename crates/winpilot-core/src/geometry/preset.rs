use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::Rect;
use crate::validation::{ValidationError, validate_size};

/// Named rule for deriving a window rectangle from a display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionPreset {
    Center,
    Maximize,
    LeftHalf,
    RightHalf,
    TopHalf,
    BottomHalf,
    Custom,
}

impl PositionPreset {
    pub const ALL: [PositionPreset; 7] = [
        PositionPreset::Center,
        PositionPreset::Maximize,
        PositionPreset::LeftHalf,
        PositionPreset::RightHalf,
        PositionPreset::TopHalf,
        PositionPreset::BottomHalf,
        PositionPreset::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionPreset::Center => "center",
            PositionPreset::Maximize => "maximize",
            PositionPreset::LeftHalf => "left-half",
            PositionPreset::RightHalf => "right-half",
            PositionPreset::TopHalf => "top-half",
            PositionPreset::BottomHalf => "bottom-half",
            PositionPreset::Custom => "custom",
        }
    }

    /// Comma-separated list of accepted preset names, for error messages and schemas.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PositionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionPreset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingPosition);
        }
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownPreset {
                value: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Offsets and size for [`PositionPreset::Custom`]. All four are required
/// for the custom preset and ignored by every other preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPlacement {
    pub x_offset: Option<i32>,
    pub y_offset: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl CustomPlacement {
    pub fn new(x_offset: i32, y_offset: i32, width: i32, height: i32) -> Self {
        Self {
            x_offset: Some(x_offset),
            y_offset: Some(y_offset),
            width: Some(width),
            height: Some(height),
        }
    }

    fn require(&self) -> Result<(i32, i32, i32, i32), ValidationError> {
        match (self.x_offset, self.y_offset, self.width, self.height) {
            (Some(x), Some(y), Some(w), Some(h)) => Ok((x, y, w, h)),
            _ => {
                let missing: Vec<&str> = [
                    ("xOffset", self.x_offset.is_none()),
                    ("yOffset", self.y_offset.is_none()),
                    ("width", self.width.is_none()),
                    ("height", self.height.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(ValidationError::MissingCustomFields {
                    missing: missing.join(", "),
                })
            }
        }
    }
}

/// Compute the absolute window rectangle for `preset` within `region`.
///
/// Halving truncates, so odd dimensions lose their remainder pixel. The
/// custom preset is applied verbatim relative to the region's top-left and
/// is not clamped to the region. Every preset must yield a positive size.
pub fn compute_rect(
    region: &Rect,
    preset: PositionPreset,
    custom: &CustomPlacement,
) -> Result<Rect, ValidationError> {
    let (l, t) = (region.left(), region.top());
    let (w, h) = (region.width(), region.height());

    let (x, y, width, height) = match preset {
        PositionPreset::Maximize => (l, t, w, h),
        PositionPreset::Center => {
            let (cw, ch) = (w / 2, h / 2);
            (l + (w - cw) / 2, t + (h - ch) / 2, cw, ch)
        }
        PositionPreset::LeftHalf => (l, t, w / 2, h),
        PositionPreset::RightHalf => (l + w / 2, t, w / 2, h),
        PositionPreset::TopHalf => (l, t, w, h / 2),
        PositionPreset::BottomHalf => (l, t + h / 2, w, h / 2),
        PositionPreset::Custom => {
            let (dx, dy, cw, ch) = custom.require()?;
            validate_size(cw, ch)?;
            let x = l
                .checked_add(dx)
                .ok_or(ValidationError::OffsetOutOfRange { field: "xOffset", offset: dx })?;
            let y = t
                .checked_add(dy)
                .ok_or(ValidationError::OffsetOutOfRange { field: "yOffset", offset: dy })?;
            (x, y, cw, ch)
        }
    };

    validate_size(width, height)?;
    Rect::from_origin_size(x, y, width, height)
        .ok_or(ValidationError::NonPositiveSize { width, height })
}
