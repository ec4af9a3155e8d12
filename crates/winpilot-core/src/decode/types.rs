use serde::Deserialize;

use crate::geometry::Rect;

/// A window as reported by the scripting engine.
///
/// `index` is the window's 1-based position within its owning application
/// (1 = frontmost).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub app_name: String,
    pub title: String,
    pub bounds: Rect,
    pub index: u32,
}

/// One physical display entry from the inventory document, before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDisplay {
    pub name: String,
    /// Free-form resolution text such as `"3840 x 2160 @ 60.00Hz"`.
    pub resolution: Option<String>,
    pub is_main: bool,
}

/// Value of `spdisplays_main` on the main display.
pub(crate) const MAIN_DISPLAY_FLAG: &str = "spdisplays_yes";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryDocument {
    #[serde(rename = "SPDisplaysDataType", default)]
    pub adapters: Vec<InventoryAdapter>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryAdapter {
    #[serde(rename = "spdisplays_ndrvs", default)]
    pub displays: Vec<InventoryDisplay>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryDisplay {
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_spdisplays_resolution")]
    pub resolution: Option<String>,
    #[serde(rename = "spdisplays_main")]
    pub main: Option<String>,
}
