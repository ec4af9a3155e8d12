//! The eight window tools: their schemas and their dispatch onto [`WindowManager`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use winpilot_core::events;
use winpilot_core::{Collaborator, CustomPlacement, WindowError, WindowManager};

use super::protocol::RpcError;
use super::results::{
    AppWindowList, ScreenBounds, ScreenList, ToolResult, WindowGeometry, WindowList,
};

struct ToolSpec {
    name: &'static str,
    description: &'static str,
    input_schema: fn() -> Value,
}

const TOOLS: [ToolSpec; 8] = [
    ToolSpec {
        name: "move_resize_app",
        description: "Move and resize an application's frontmost window using AppleScript on macOS.",
        input_schema: move_resize_app_schema,
    },
    ToolSpec {
        name: "get_app_window_geometry",
        description: "Get position and size of an application's frontmost window.",
        input_schema: app_name_schema,
    },
    ToolSpec {
        name: "get_main_screen_bounds",
        description: "Get the bounds of the main desktop (Finder desktop window).",
        input_schema: empty_schema,
    },
    ToolSpec {
        name: "list_all_windows",
        description: "List all visible windows from all running applications with their positions and sizes.",
        input_schema: empty_schema,
    },
    ToolSpec {
        name: "get_app_all_windows",
        description: "Get all windows for a specific application (handles multi-window apps).",
        input_schema: app_name_schema,
    },
    ToolSpec {
        name: "move_resize_app_window",
        description: "Move and resize a specific window by index for multi-window applications.",
        input_schema: move_resize_app_window_schema,
    },
    ToolSpec {
        name: "list_all_screens",
        description: "List all connected physical displays/monitors with their bounds and properties.",
        input_schema: empty_schema,
    },
    ToolSpec {
        name: "move_app_to_screen",
        description: "Convenience tool to move an application to a specific screen with positioning presets (center, maximize, left-half, right-half, etc.).",
        input_schema: move_app_to_screen_schema,
    },
];

/// `tools/list` entries: name, description and JSON input schema per tool.
pub fn tool_definitions() -> Vec<Value> {
    TOOLS
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
                "inputSchema": (tool.input_schema)(),
            })
        })
        .collect()
}

fn integer(description: &str) -> Value {
    json!({"type": "integer", "description": description})
}

fn app_name_property() -> Value {
    json!({"type": "string", "description": "Name of the application, e.g. 'Google Chrome'"})
}

fn empty_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

fn app_name_schema() -> Value {
    json!({
        "type": "object",
        "properties": {"appName": app_name_property()},
        "required": ["appName"],
    })
}

fn move_resize_app_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "appName": app_name_property(),
            "x": integer("X position in pixels"),
            "y": integer("Y position in pixels"),
            "width": integer("Window width in pixels"),
            "height": integer("Window height in pixels"),
        },
        "required": ["appName", "x", "y", "width", "height"],
    })
}

fn move_resize_app_window_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "appName": app_name_property(),
            "windowIndex": integer("Window index (1-based, 1 = frontmost window)"),
            "x": integer("X position in pixels"),
            "y": integer("Y position in pixels"),
            "width": integer("Window width in pixels"),
            "height": integer("Window height in pixels"),
        },
        "required": ["appName", "windowIndex", "x", "y", "width", "height"],
    })
}

fn move_app_to_screen_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "appName": app_name_property(),
            "screenIndex": integer("Target screen index (0 = main display)"),
            "position": {
                "type": "string",
                "description": "Positioning preset: 'center', 'maximize', 'left-half', 'right-half', 'top-half', 'bottom-half', or 'custom'",
            },
            "xOffset": integer("X offset from screen left (pixels, for custom position)"),
            "yOffset": integer("Y offset from screen top (pixels, for custom position)"),
            "width": integer("Window width (pixels, for custom position)"),
            "height": integer("Window height (pixels, for custom position)"),
        },
        "required": ["appName", "screenIndex", "position"],
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveResizeArgs {
    app_name: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppArgs {
    app_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveWindowArgs {
    app_name: String,
    window_index: i64,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveToScreenArgs {
    app_name: String,
    screen_index: i64,
    position: String,
    #[serde(flatten)]
    custom: CustomPlacement,
}

/// Why a call did not produce a normal result.
#[derive(Debug, thiserror::Error)]
enum CallError {
    /// The request itself was unusable; reported as a JSON-RPC error.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The tool ran and failed; reported as an `isError` tool result.
    #[error(transparent)]
    Window(#[from] WindowError),
}

impl From<serde_json::Error> for CallError {
    fn from(e: serde_json::Error) -> Self {
        CallError::Rpc(RpcError::internal(e))
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, RpcError> {
    serde_json::from_value(arguments).map_err(RpcError::invalid_params)
}

/// Run one tool.
///
/// Unknown tools and malformed arguments are JSON-RPC errors. Failures of
/// the operation itself come back as a result with `is_error` set.
pub async fn call_tool<C: Collaborator>(
    manager: &WindowManager<C>,
    name: &str,
    arguments: Value,
    cancel: &CancellationToken,
) -> Result<ToolResult, RpcError> {
    info!(event = "server.tool.call_started", tool = name);

    match dispatch(manager, name, arguments, cancel).await {
        Ok(result) => {
            info!(event = "server.tool.call_completed", tool = name);
            Ok(result)
        }
        Err(CallError::Window(e)) => {
            events::log_app_error(&e);
            Ok(ToolResult::error(e.to_string()))
        }
        Err(CallError::Rpc(e)) => {
            debug!(event = "server.tool.call_rejected", tool = name, error = %e);
            Err(e)
        }
    }
}

async fn dispatch<C: Collaborator>(
    manager: &WindowManager<C>,
    name: &str,
    arguments: Value,
    cancel: &CancellationToken,
) -> Result<ToolResult, CallError> {
    match name {
        "move_resize_app" => {
            let args: MoveResizeArgs = parse_args(arguments)?;
            let outcome = manager
                .move_resize_app(&args.app_name, args.x, args.y, args.width, args.height, cancel)
                .await?;
            let b = outcome.bounds;
            Ok(ToolResult::text(format!(
                "Moved '{}' to ({},{}) with size {}x{}",
                outcome.app_name,
                b.x(),
                b.y(),
                b.width(),
                b.height()
            )))
        }
        "get_app_window_geometry" => {
            let args: AppArgs = parse_args(arguments)?;
            let bounds = manager
                .get_app_window_geometry(&args.app_name, cancel)
                .await?;
            let geometry = WindowGeometry::new(args.app_name.trim(), &bounds);
            let text = format!(
                "Window '{}': pos=({},{}) size={}x{}",
                geometry.app_name, geometry.x, geometry.y, geometry.width, geometry.height
            );
            Ok(ToolResult::structured(text, &geometry)?)
        }
        "get_main_screen_bounds" => {
            let bounds = ScreenBounds::from(&manager.get_main_screen_bounds(cancel).await?);
            let text = format!(
                "Main desktop bounds: left={} top={} right={} bottom={} width={} height={}",
                bounds.left, bounds.top, bounds.right, bounds.bottom, bounds.width, bounds.height
            );
            Ok(ToolResult::structured(text, &bounds)?)
        }
        "list_all_windows" => {
            let windows = manager.list_all_windows(cancel).await?;
            let list = WindowList::from(windows.as_slice());
            let text = format!("Found {} windows across all applications", list.count);
            Ok(ToolResult::structured(text, &list)?)
        }
        "get_app_all_windows" => {
            let args: AppArgs = parse_args(arguments)?;
            let windows = manager.get_app_all_windows(&args.app_name, cancel).await?;
            let list = AppWindowList::new(args.app_name.trim(), &windows);
            let text = format!("Application '{}' has {} window(s)", list.app_name, list.count);
            Ok(ToolResult::structured(text, &list)?)
        }
        "move_resize_app_window" => {
            let args: MoveWindowArgs = parse_args(arguments)?;
            let outcome = manager
                .move_resize_app_window(
                    &args.app_name,
                    args.window_index,
                    args.x,
                    args.y,
                    args.width,
                    args.height,
                    cancel,
                )
                .await?;
            let b = outcome.bounds;
            Ok(ToolResult::text(format!(
                "Moved '{}' window {} to ({},{}) with size {}x{}",
                outcome.app_name,
                outcome.window_index,
                b.x(),
                b.y(),
                b.width(),
                b.height()
            )))
        }
        "list_all_screens" => {
            let layout = manager.list_all_screens(cancel).await?;
            let screens = ScreenList::from(&layout);
            let text = if layout.is_fallback() {
                format!(
                    "Found 1 display (fallback): {}x{}",
                    screens.total_width, screens.total_height
                )
            } else {
                format!(
                    "Found {} display(s), total virtual desktop: {}x{}",
                    screens.count, screens.total_width, screens.total_height
                )
            };
            Ok(ToolResult::structured(text, &screens)?)
        }
        "move_app_to_screen" => {
            let args: MoveToScreenArgs = parse_args(arguments)?;
            let outcome = manager
                .move_app_to_screen(
                    &args.app_name,
                    args.screen_index,
                    &args.position,
                    &args.custom,
                    cancel,
                )
                .await?;
            let b = outcome.bounds;
            Ok(ToolResult::text(format!(
                "Moved '{}' to screen {} ({}) at position '{}': ({},{}) {}x{}",
                outcome.app_name,
                outcome.screen_index,
                outcome.screen_name,
                outcome.preset,
                b.x(),
                b.y(),
                b.width(),
                b.height()
            )))
        }
        other => Err(RpcError::unknown_tool(other).into()),
    }
}
