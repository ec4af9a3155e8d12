//! Wire shapes for tool results. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use winpilot_core::decode::WindowRecord;
use winpilot_core::{DisplayLayout, DisplayRegion, Rect};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// Result of one `tools/call`: human-readable text plus optional structured data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<TextContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: text.into(),
            }],
            structured_content: None,
            is_error: false,
        }
    }

    pub fn structured<T: Serialize>(
        text: impl Into<String>,
        data: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            structured_content: Some(serde_json::to_value(data)?),
            ..Self::text(text)
        })
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }

    /// Text of the first content block.
    #[cfg(test)]
    pub fn first_text(&self) -> &str {
        self.content.first().map_or("", |c| c.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowGeometry {
    pub app_name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub fn new(app_name: &str, bounds: &Rect) -> Self {
        Self {
            app_name: app_name.to_string(),
            x: bounds.x(),
            y: bounds.y(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&Rect> for ScreenBounds {
    fn from(rect: &Rect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            right: rect.right(),
            bottom: rect.bottom(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInfo {
    pub app_name: String,
    pub window_title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&WindowRecord> for WindowInfo {
    fn from(record: &WindowRecord) -> Self {
        Self {
            app_name: record.app_name.clone(),
            window_title: record.title.clone(),
            x: record.bounds.x(),
            y: record.bounds.y(),
            width: record.bounds.width(),
            height: record.bounds.height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowList {
    pub windows: Vec<WindowInfo>,
    pub count: usize,
}

impl From<&[WindowRecord]> for WindowList {
    fn from(records: &[WindowRecord]) -> Self {
        let windows: Vec<WindowInfo> = records.iter().map(WindowInfo::from).collect();
        Self {
            count: windows.len(),
            windows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppWindowInfo {
    pub title: String,
    pub index: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&WindowRecord> for AppWindowInfo {
    fn from(record: &WindowRecord) -> Self {
        Self {
            title: record.title.clone(),
            index: record.index,
            x: record.bounds.x(),
            y: record.bounds.y(),
            width: record.bounds.width(),
            height: record.bounds.height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppWindowList {
    pub app_name: String,
    pub windows: Vec<AppWindowInfo>,
    pub count: usize,
}

impl AppWindowList {
    pub fn new(app_name: &str, records: &[WindowRecord]) -> Self {
        let windows: Vec<AppWindowInfo> = records.iter().map(AppWindowInfo::from).collect();
        Self {
            app_name: app_name.to_string(),
            count: windows.len(),
            windows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    pub index: usize,
    pub name: String,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub width: i32,
    pub height: i32,
    pub is_main: bool,
}

impl From<&DisplayRegion> for DisplayInfo {
    fn from(region: &DisplayRegion) -> Self {
        Self {
            index: region.index,
            name: region.name.clone(),
            left: region.bounds.left(),
            top: region.bounds.top(),
            right: region.bounds.right(),
            bottom: region.bounds.bottom(),
            width: region.bounds.width(),
            height: region.bounds.height(),
            is_main: region.is_main,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenList {
    pub displays: Vec<DisplayInfo>,
    pub count: usize,
    pub total_width: i32,
    pub total_height: i32,
}

impl From<&DisplayLayout> for ScreenList {
    fn from(layout: &DisplayLayout) -> Self {
        Self {
            displays: layout.displays.iter().map(DisplayInfo::from).collect(),
            count: layout.count(),
            total_width: layout.total_width,
            total_height: layout.total_height,
        }
    }
}
