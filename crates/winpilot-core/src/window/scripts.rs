//! AppleScript sources sent to the scripting engine.
//!
//! Placeholders are substituted with `str::replace`. `{app}` only ever
//! receives [`AppName::escaped`]; every other placeholder receives an integer.

use crate::escape::AppName;
use crate::geometry::Rect;

/// Move and resize one window of a running application, bringing it to the front.
const MOVE_WINDOW_SCRIPT: &str = r#"tell application "System Events"
	if not (exists application process "{app}") then
		error "Application '{app}' is not running."
	end if
	tell application process "{app}"
		set frontmost to true
		if (count of windows) is 0 then
			error "Application '{app}' has no windows."
		end if
		if (count of windows) < {index} then
			error "Application '{app}' does not have window {index}."
		end if
		tell window {index}
			set position to {{x}, {y}}
			set size to {{width}, {height}}
		end tell
	end tell
end tell"#;

/// Position and size of an application's frontmost window as `x,y,w,h`.
const WINDOW_GEOMETRY_SCRIPT: &str = r#"tell application "System Events"
	if not (exists application process "{app}") then
		error "Application '{app}' is not running."
	end if
	tell application process "{app}"
		if (count of windows) is 0 then
			error "Application '{app}' has no windows."
		end if
		tell window 1
			set {xPos, yPos} to position
			set {w, h} to size
			return (xPos as text) & "," & (yPos as text) & "," & (w as text) & "," & (h as text)
		end tell
	end tell
end tell"#;

/// Finder desktop window bounds as `left,top,right,bottom`; spans every display.
pub(crate) const DESKTOP_BOUNDS_SCRIPT: &str = r#"tell application "Finder"
	set {l, t, r, btm} to bounds of window of desktop
	return (l as text) & "," & (t as text) & "," & (r as text) & "," & (btm as text)
end tell"#;

/// Every window of every visible application as `app|title|x|y|w|h` records joined by `;`.
pub(crate) const ALL_WINDOWS_SCRIPT: &str = r#"tell application "System Events"
	set windowList to {}
	repeat with proc in (application processes whose visible is true)
		set appName to name of proc
		try
			repeat with w in (windows of proc)
				try
					set {x, y} to position of w
					set {wWidth, wHeight} to size of w
					set windowTitle to name of w
					set end of windowList to appName & "|" & windowTitle & "|" & x & "|" & y & "|" & wWidth & "|" & wHeight
				end try
			end repeat
		end try
	end repeat
	set AppleScript's text item delimiters to ";"
	return windowList as text
end tell"#;

/// Every window of one application as `title|x|y|w|h` records joined by `;`,
/// in window order (frontmost first).
const APP_WINDOWS_SCRIPT: &str = r#"tell application "System Events"
	if not (exists application process "{app}") then
		error "Application '{app}' is not running."
	end if
	tell application process "{app}"
		if (count of windows) is 0 then
			error "Application '{app}' has no windows."
		end if
		set windowData to {}
		repeat with w in windows
			try
				set {x, y} to position of w
				set {wWidth, wHeight} to size of w
				set windowTitle to name of w
				set end of windowData to windowTitle & "|" & x & "|" & y & "|" & wWidth & "|" & wHeight
			on error
				set end of windowData to ""
			end try
		end repeat
		set AppleScript's text item delimiters to ";"
		return windowData as text
	end tell
end tell"#;

pub(crate) fn move_window_script(app: &AppName, index: u32, rect: &Rect) -> String {
    MOVE_WINDOW_SCRIPT
        .replace("{index}", &index.to_string())
        .replace("{x}", &rect.x().to_string())
        .replace("{y}", &rect.y().to_string())
        .replace("{width}", &rect.width().to_string())
        .replace("{height}", &rect.height().to_string())
        .replace("{app}", &app.escaped())
}

pub(crate) fn window_geometry_script(app: &AppName) -> String {
    WINDOW_GEOMETRY_SCRIPT.replace("{app}", &app.escaped())
}

pub(crate) fn app_windows_script(app: &AppName) -> String {
    APP_WINDOWS_SCRIPT.replace("{app}", &app.escaped())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_script_substitutes_every_placeholder() {
        let app = AppName::new("Google Chrome").unwrap();
        let rect = Rect::from_origin_size(-1920, 25, 1280, 800).unwrap();
        let script = move_window_script(&app, 2, &rect);

        assert!(script.contains(r#"application process "Google Chrome""#));
        assert!(script.contains("tell window 2"));
        assert!(script.contains("set position to {-1920, 25}"));
        assert!(script.contains("set size to {1280, 800}"));
        assert!(script.contains("set frontmost to true"));
        for placeholder in ["{app}", "{index}", "{x}", "{y}", "{width}", "{height}"] {
            assert!(!script.contains(placeholder), "left {placeholder} in script");
        }
    }

    #[test]
    fn test_app_name_is_substituted_last() {
        // A name that looks like a placeholder must survive verbatim.
        let app = AppName::new("{x} Studio").unwrap();
        let rect = Rect::from_origin_size(1, 2, 3, 4).unwrap();
        let script = move_window_script(&app, 1, &rect);
        assert!(script.contains(r#"application process "{x} Studio""#));
    }

    #[test]
    fn test_quotes_in_app_name_cannot_close_the_literal() {
        let app = AppName::new(r#"Bad" & (do shell script "id") & ""#).unwrap();
        let script = window_geometry_script(&app);
        assert!(script.contains(r#"application process "Bad\" & (do shell script \"id\") & \"""#));
    }

    #[test]
    fn test_app_windows_script() {
        let app = AppName::new("Mail").unwrap();
        let script = app_windows_script(&app);
        assert!(script.contains(r#"application process "Mail""#));
        assert!(script.contains("text item delimiters to \";\""));
    }

    #[test]
    fn test_static_scripts() {
        assert!(DESKTOP_BOUNDS_SCRIPT.contains("bounds of window of desktop"));
        assert!(ALL_WINDOWS_SCRIPT.contains("whose visible is true"));
    }
}
