use std::collections::HashMap;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::errors::WindowError;
use super::scripts::{
    ALL_WINDOWS_SCRIPT, DESKTOP_BOUNDS_SCRIPT, app_windows_script, move_window_script,
    window_geometry_script,
};
use super::types::{MoveOutcome, ScreenMoveOutcome};
use crate::collaborator::Collaborator;
use crate::decode::{
    WindowRecord, decode_app_window_record, decode_bounds, decode_display_inventory,
    decode_geometry, decode_window_record, split_records,
};
use crate::display::{DisplayLayout, FallbackReason, build_layout, fallback_layout};
use crate::errors::WinpilotError;
use crate::escape::AppName;
use crate::geometry::{CustomPlacement, PositionPreset, Rect};
use crate::validation::{
    ValidationError, validate_screen_index, validate_size, validate_window_index,
};

/// Window and display operations on top of a [`Collaborator`].
///
/// Holds no state besides the collaborator: every call builds its own script
/// and parses its own reply. Mutating calls validate their input before any
/// command is issued and are never retried.
pub struct WindowManager<C> {
    collaborator: C,
}

impl<C: Collaborator> WindowManager<C> {
    pub fn new(collaborator: C) -> Self {
        Self { collaborator }
    }

    pub fn collaborator(&self) -> &C {
        &self.collaborator
    }

    async fn run_script(
        &self,
        script: &str,
        cancel: &CancellationToken,
    ) -> Result<String, WindowError> {
        self.collaborator
            .run_script(script, cancel)
            .await
            .map_err(WindowError::from_script_failure)
    }

    async fn apply_move(
        &self,
        app: &AppName,
        window_index: u32,
        bounds: Rect,
        cancel: &CancellationToken,
    ) -> Result<MoveOutcome, WindowError> {
        let script = move_window_script(app, window_index, &bounds);
        self.run_script(&script, cancel).await?;
        Ok(MoveOutcome {
            app_name: app.to_string(),
            window_index,
            bounds,
        })
    }

    /// Move and resize an application's frontmost window.
    pub async fn move_resize_app(
        &self,
        app_name: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        cancel: &CancellationToken,
    ) -> Result<MoveOutcome, WindowError> {
        info!(
            event = "core.window.move_started",
            app = app_name,
            x = x,
            y = y,
            width = width,
            height = height
        );

        let app = AppName::new(app_name)?;
        validate_size(width, height)?;
        let bounds = target_rect(x, y, width, height)?;

        let outcome = self
            .apply_move(&app, 1, bounds, cancel)
            .await
            .inspect_err(|e| log_failure("core.window.move_failed", app.as_str(), e))?;

        info!(event = "core.window.move_completed", app = app.as_str());
        Ok(outcome)
    }

    /// Move and resize one window of a multi-window application.
    #[allow(clippy::too_many_arguments)]
    pub async fn move_resize_app_window(
        &self,
        app_name: &str,
        window_index: i64,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        cancel: &CancellationToken,
    ) -> Result<MoveOutcome, WindowError> {
        info!(
            event = "core.window.move_indexed_started",
            app = app_name,
            window_index = window_index
        );

        let app = AppName::new(app_name)?;
        let index = validate_window_index(window_index)?;
        validate_size(width, height)?;
        let bounds = target_rect(x, y, width, height)?;

        let outcome = self
            .apply_move(&app, index, bounds, cancel)
            .await
            .inspect_err(|e| log_failure("core.window.move_indexed_failed", app.as_str(), e))?;

        info!(
            event = "core.window.move_indexed_completed",
            app = app.as_str(),
            window_index = index
        );
        Ok(outcome)
    }

    /// Position and size of an application's frontmost window.
    pub async fn get_app_window_geometry(
        &self,
        app_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Rect, WindowError> {
        info!(event = "core.window.geometry_started", app = app_name);

        let app = AppName::new(app_name)?;
        let raw = self
            .run_script(&window_geometry_script(&app), cancel)
            .await
            .inspect_err(|e| log_failure("core.window.geometry_failed", app.as_str(), e))?;
        let bounds = decode_geometry(&raw)?;

        info!(
            event = "core.window.geometry_completed",
            app = app.as_str(),
            bounds = %bounds
        );
        Ok(bounds)
    }

    /// Bounds of the Finder desktop window, which spans the whole virtual desktop.
    pub async fn get_main_screen_bounds(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Rect, WindowError> {
        debug!(event = "core.desktop.bounds_started");

        let bounds = self
            .run_script(DESKTOP_BOUNDS_SCRIPT, cancel)
            .await
            .and_then(|raw| decode_bounds(&raw).map_err(WindowError::from))
            .inspect_err(|e| log_op_failure("core.desktop.bounds_failed", e))?;

        debug!(event = "core.desktop.bounds_completed", bounds = %bounds);
        Ok(bounds)
    }

    /// Every window of every visible application.
    ///
    /// Malformed records are skipped; the rest are still returned. Each
    /// record's index is its position among its application's windows.
    pub async fn list_all_windows(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<WindowRecord>, WindowError> {
        info!(event = "core.window.list_started");

        let raw = self
            .run_script(ALL_WINDOWS_SCRIPT, cancel)
            .await
            .inspect_err(|e| log_op_failure("core.window.list_failed", e))?;

        let mut per_app: HashMap<String, u32> = HashMap::new();
        let windows: Vec<WindowRecord> = split_records(&raw)
            .filter_map(|(position, record)| match decode_window_record(record) {
                Ok(mut window) => {
                    let count = per_app.entry(window.app_name.clone()).or_insert(0);
                    *count += 1;
                    window.index = *count;
                    Some(window)
                }
                Err(e) => {
                    debug!(
                        event = "core.window.record_skipped",
                        position = position,
                        error = %e
                    );
                    None
                }
            })
            .collect();

        info!(event = "core.window.list_completed", count = windows.len());
        Ok(windows)
    }

    /// Every window of one application, frontmost first.
    ///
    /// Malformed records are skipped without renumbering the others, so each
    /// index still addresses the same window in `move_resize_app_window`.
    pub async fn get_app_all_windows(
        &self,
        app_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<WindowRecord>, WindowError> {
        info!(event = "core.window.app_list_started", app = app_name);

        let app = AppName::new(app_name)?;
        let raw = self
            .run_script(&app_windows_script(&app), cancel)
            .await
            .inspect_err(|e| log_failure("core.window.app_list_failed", app.as_str(), e))?;

        let windows: Vec<WindowRecord> = split_records(&raw)
            .filter_map(|(position, record)| {
                decode_app_window_record(record, app.as_str(), position)
                    .inspect_err(|e| {
                        debug!(
                            event = "core.window.record_skipped",
                            app = app.as_str(),
                            position = position,
                            error = %e
                        );
                    })
                    .ok()
            })
            .collect();

        info!(
            event = "core.window.app_list_completed",
            app = app.as_str(),
            count = windows.len()
        );
        Ok(windows)
    }

    /// Enumerate displays as regions of the virtual desktop.
    ///
    /// The desktop bounds are required. The display inventory is not: any
    /// failure to obtain or parse it degrades to a single synthetic display.
    pub async fn list_all_screens(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DisplayLayout, WindowError> {
        info!(event = "core.display.list_started");

        let desktop = self
            .get_main_screen_bounds(cancel)
            .await
            .map_err(|e| WindowError::DesktopBounds {
                source: Box::new(e),
            })
            .inspect_err(|e| log_op_failure("core.display.list_failed", e))?;

        let layout = match self.collaborator.run_inventory(cancel).await {
            Ok(raw) => match decode_display_inventory(&raw) {
                Ok(inventory) => build_layout(desktop, &inventory),
                Err(e) => {
                    warn!(event = "core.display.inventory_unparseable", error = %e);
                    fallback_layout(desktop, FallbackReason::InventoryUnparseable)
                }
            },
            Err(e) => {
                warn!(event = "core.display.inventory_failed", error = %e);
                fallback_layout(desktop, FallbackReason::InventoryUnavailable)
            }
        };

        info!(
            event = "core.display.list_completed",
            count = layout.count(),
            fallback = layout.is_fallback()
        );
        Ok(layout)
    }

    /// Place an application's frontmost window on a display using a preset.
    ///
    /// No move is issued unless the display list was obtained, the screen
    /// index is in range and the preset produced a rectangle.
    pub async fn move_app_to_screen(
        &self,
        app_name: &str,
        screen_index: i64,
        position: &str,
        custom: &CustomPlacement,
        cancel: &CancellationToken,
    ) -> Result<ScreenMoveOutcome, WindowError> {
        info!(
            event = "core.window.move_to_screen_started",
            app = app_name,
            screen_index = screen_index,
            position = position
        );

        let app = AppName::new(app_name)?;
        let preset: PositionPreset = position.parse()?;

        let layout = self
            .list_all_screens(cancel)
            .await
            .map_err(|e| WindowError::ScreenList {
                source: Box::new(e),
            })?;

        let index = validate_screen_index(screen_index, layout.count())?;
        let region = layout
            .get(index)
            .ok_or(ValidationError::ScreenIndexOutOfRange {
                index: screen_index,
                count: layout.count(),
            })?;
        let bounds = region
            .place(preset, custom)
            .inspect_err(|e| {
                warn!(
                    event = "core.window.move_to_screen_rejected",
                    app = app.as_str(),
                    error = %e
                );
            })?;

        let outcome = self
            .apply_move(&app, 1, bounds, cancel)
            .await
            .inspect_err(|e| log_failure("core.window.move_to_screen_failed", app.as_str(), e))?;

        info!(
            event = "core.window.move_to_screen_completed",
            app = app.as_str(),
            screen = region.name.as_str(),
            bounds = %bounds
        );
        Ok(ScreenMoveOutcome {
            app_name: outcome.app_name,
            screen_index: index,
            screen_name: region.name.clone(),
            preset,
            bounds,
        })
    }
}

/// Rectangle for an explicit move; sizes are already known to be positive.
fn target_rect(x: i32, y: i32, width: i32, height: i32) -> Result<Rect, ValidationError> {
    Rect::from_origin_size(x, y, width, height).ok_or(if x.checked_add(width).is_none() {
        ValidationError::OffsetOutOfRange {
            field: "x",
            offset: x,
        }
    } else {
        ValidationError::OffsetOutOfRange {
            field: "y",
            offset: y,
        }
    })
}

fn log_op_failure(event: &'static str, e: &WindowError) {
    if e.is_user_error() {
        warn!(event = event, error = %e, error_code = e.error_code());
    } else {
        error!(event = event, error = %e, error_code = e.error_code());
    }
}

fn log_failure(event: &'static str, app: &str, e: &WindowError) {
    if e.is_user_error() {
        warn!(event = event, app = app, error = %e, error_code = e.error_code());
    } else {
        error!(event = event, app = app, error = %e, error_code = e.error_code());
    }
}
