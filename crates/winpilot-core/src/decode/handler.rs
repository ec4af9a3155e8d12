use tracing::debug;

use super::errors::FormatError;
use super::types::{InventoryDocument, MAIN_DISPLAY_FLAG, RawDisplay, WindowRecord};
use crate::geometry::Rect;

/// Separator between values of a single-value reply (`x,y,w,h`).
const VALUE_DELIMITER: char = ',';

/// Separator between fields of one window record.
const FIELD_DELIMITER: char = '|';

/// Separator between window records in a batch reply.
const RECORD_DELIMITER: char = ';';

const WINDOW_FIELDS: [&str; 6] = ["appName", "title", "x", "y", "width", "height"];
const APP_WINDOW_FIELDS: [&str; 5] = ["title", "x", "y", "width", "height"];

fn parse_int(field: &'static str, position: usize, segment: &str) -> Result<i32, FormatError> {
    segment
        .trim()
        .parse::<i32>()
        .map_err(|_| FormatError::InvalidInteger {
            field,
            position,
            segment: segment.trim().to_string(),
        })
}

/// Decode exactly `expected` comma-separated integers.
///
/// Whitespace around values is ignored and empty segments (for example a
/// trailing comma) are dropped before counting. Values may be negative.
pub fn decode_int_list(raw: &str, expected: usize) -> Result<Vec<i32>, FormatError> {
    let raw = raw.trim();
    let parts: Vec<&str> = raw
        .split(VALUE_DELIMITER)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() != expected {
        return Err(FormatError::FieldCount {
            expected,
            actual: parts.len(),
            delimiter: "comma",
            raw: raw.to_string(),
        });
    }

    parts
        .iter()
        .enumerate()
        .map(|(i, p)| parse_int("value", i, p))
        .collect()
}

/// Decode a `left,top,right,bottom` reply into a rectangle.
pub fn decode_bounds(raw: &str) -> Result<Rect, FormatError> {
    let v = decode_int_list(raw, 4)?;
    Rect::new(v[0], v[1], v[2], v[3]).ok_or_else(|| FormatError::InvalidGeometry {
        raw: raw.trim().to_string(),
        reason: "edges are inverted or the size is not representable".to_string(),
    })
}

/// Decode an `x,y,width,height` reply into a rectangle.
pub fn decode_geometry(raw: &str) -> Result<Rect, FormatError> {
    let v = decode_int_list(raw, 4)?;
    geometry_from_parts(raw, v[0], v[1], v[2], v[3])
}

fn geometry_from_parts(raw: &str, x: i32, y: i32, w: i32, h: i32) -> Result<Rect, FormatError> {
    Rect::from_origin_size(x, y, w, h).ok_or_else(|| FormatError::InvalidGeometry {
        raw: raw.trim().to_string(),
        reason: format!("size {w}x{h} is not representable"),
    })
}

fn split_fields<'a>(raw: &'a str, fields: &[&str]) -> Result<Vec<&'a str>, FormatError> {
    let parts: Vec<&str> = raw.split(FIELD_DELIMITER).map(str::trim).collect();
    if parts.len() != fields.len() {
        return Err(FormatError::FieldCount {
            expected: fields.len(),
            actual: parts.len(),
            delimiter: "pipe",
            raw: raw.to_string(),
        });
    }
    Ok(parts)
}

/// Decode one `appName|title|x|y|width|height` record.
///
/// The returned record has `index` 1; batch callers reposition it within its
/// application.
pub fn decode_window_record(raw: &str) -> Result<WindowRecord, FormatError> {
    let parts = split_fields(raw, &WINDOW_FIELDS)?;
    let x = parse_int(WINDOW_FIELDS[2], 2, parts[2])?;
    let y = parse_int(WINDOW_FIELDS[3], 3, parts[3])?;
    let w = parse_int(WINDOW_FIELDS[4], 4, parts[4])?;
    let h = parse_int(WINDOW_FIELDS[5], 5, parts[5])?;

    Ok(WindowRecord {
        app_name: parts[0].to_string(),
        title: parts[1].to_string(),
        bounds: geometry_from_parts(raw, x, y, w, h)?,
        index: 1,
    })
}

/// Decode one `title|x|y|width|height` record of a single application's window.
pub fn decode_app_window_record(
    raw: &str,
    app_name: &str,
    index: u32,
) -> Result<WindowRecord, FormatError> {
    let parts = split_fields(raw, &APP_WINDOW_FIELDS)?;
    let x = parse_int(APP_WINDOW_FIELDS[1], 1, parts[1])?;
    let y = parse_int(APP_WINDOW_FIELDS[2], 2, parts[2])?;
    let w = parse_int(APP_WINDOW_FIELDS[3], 3, parts[3])?;
    let h = parse_int(APP_WINDOW_FIELDS[4], 4, parts[4])?;

    Ok(WindowRecord {
        app_name: app_name.to_string(),
        title: parts[0].to_string(),
        bounds: geometry_from_parts(raw, x, y, w, h)?,
        index,
    })
}

/// Split a batch reply into records, paired with their 1-based position in
/// the reply. Blank records are dropped but still consume a position.
pub fn split_records(raw: &str) -> impl Iterator<Item = (u32, &str)> {
    raw.split(RECORD_DELIMITER)
        .zip(1u32..)
        .filter(|(record, _)| !record.trim().is_empty())
        .map(|(record, position)| (position, record))
}

/// Decode the display inventory document.
///
/// Adapters without displays and documents without adapters yield an empty
/// list; only unparseable JSON is an error.
pub fn decode_display_inventory(raw_json: &str) -> Result<Vec<RawDisplay>, FormatError> {
    let document: InventoryDocument =
        serde_json::from_str(raw_json).map_err(|e| FormatError::InvalidJson {
            message: e.to_string(),
        })?;

    let displays: Vec<RawDisplay> = document
        .adapters
        .into_iter()
        .flat_map(|adapter| adapter.displays)
        .map(|d| RawDisplay {
            name: d.name,
            resolution: d.resolution.filter(|r| !r.trim().is_empty()),
            is_main: d.main.as_deref() == Some(MAIN_DISPLAY_FLAG),
        })
        .collect();

    debug!(event = "core.decode.inventory_decoded", count = displays.len());
    Ok(displays)
}

/// Parse `"<width> x <height>"` (trailing tokens such as a refresh rate are
/// ignored). Returns `None` when the text has fewer than three tokens or the
/// dimensions are not positive integers.
pub fn parse_resolution(text: &str) -> Option<(i32, i32)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }
    let width = tokens[0].parse::<i32>().ok().filter(|w| *w > 0)?;
    let height = tokens[2].parse::<i32>().ok().filter(|h| *h > 0)?;
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_int_list() {
        assert_eq!(decode_int_list("1,2,3", 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(
            decode_int_list(" -1920 , 0, 1920 ,1080 ", 4).unwrap(),
            vec![-1920, 0, 1920, 1080]
        );
    }

    #[test]
    fn test_decode_int_list_tolerates_empty_segments() {
        assert_eq!(decode_int_list("1,2,3,", 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(decode_int_list(",,1, ,2,3,,", 3).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_int_list_count_mismatch_names_both_counts() {
        let err = decode_int_list("1,2,3", 4).unwrap_err();
        assert_eq!(
            err,
            FormatError::FieldCount {
                expected: 4,
                actual: 3,
                delimiter: "comma",
                raw: "1,2,3".to_string(),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains('4') && msg.contains('3'));
    }

    #[test]
    fn test_decode_int_list_reports_offending_segment() {
        let err = decode_int_list("10,abc,30", 3).unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidInteger {
                field: "value",
                position: 1,
                segment: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_bounds() {
        let rect = decode_bounds("0, 0, 3840, 1080").unwrap();
        assert_eq!((rect.width(), rect.height()), (3840, 1080));
        assert!(matches!(
            decode_bounds("100,0,50,10"),
            Err(FormatError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_decode_bounds_rejects_unrepresentable_width() {
        assert!(matches!(
            decode_bounds("-2147483648,0,2147483647,10"),
            Err(FormatError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_decode_geometry() {
        let rect = decode_geometry("10,20,800,600").unwrap();
        assert_eq!((rect.x(), rect.y(), rect.right(), rect.bottom()), (10, 20, 810, 620));
    }

    #[test]
    fn test_decode_window_record() {
        let record = decode_window_record("Chrome|Tab|10|20|800|600").unwrap();
        assert_eq!(record.app_name, "Chrome");
        assert_eq!(record.title, "Tab");
        assert_eq!(record.bounds, Rect::from_origin_size(10, 20, 800, 600).unwrap());
    }

    #[test]
    fn test_decode_window_record_allows_empty_title() {
        let record = decode_window_record("Finder||0|25|400|300").unwrap();
        assert_eq!(record.title, "");
    }

    #[test]
    fn test_decode_window_record_wrong_field_count() {
        let err = decode_window_record("A|B|C").unwrap_err();
        assert!(matches!(
            err,
            FormatError::FieldCount {
                expected: 6,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_window_record_bad_number() {
        let err = decode_window_record("A|B|1|two|3|4").unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidInteger {
                field: "y",
                position: 3,
                segment: "two".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_app_window_record() {
        let record = decode_app_window_record("Inbox|0|25|1200|800", "Mail", 2).unwrap();
        assert_eq!(record.app_name, "Mail");
        assert_eq!(record.title, "Inbox");
        assert_eq!(record.index, 2);
        assert!(decode_app_window_record("Inbox|0|25|1200", "Mail", 1).is_err());
    }

    #[test]
    fn test_split_records_keeps_positions() {
        let records: Vec<_> = split_records("a|1;;b|2; ").collect();
        assert_eq!(records, vec![(1, "a|1"), (3, "b|2")]);
        assert_eq!(split_records("").count(), 0);
    }

    #[test]
    fn test_decode_display_inventory() {
        let json = r#"{
            "SPDisplaysDataType": [
                {
                    "_name": "Apple M2",
                    "spdisplays_ndrvs": [
                        {
                            "_name": "Built-in Retina Display",
                            "_spdisplays_resolution": "3024 x 1964 Retina",
                            "spdisplays_main": "spdisplays_yes"
                        },
                        {
                            "_name": "DELL U2720Q",
                            "_spdisplays_resolution": "3840 x 2160 @ 60.00Hz"
                        }
                    ]
                },
                { "_name": "eGPU" }
            ]
        }"#;
        let displays = decode_display_inventory(json).unwrap();
        assert_eq!(displays.len(), 2);
        assert_eq!(displays[0].name, "Built-in Retina Display");
        assert!(displays[0].is_main);
        assert!(!displays[1].is_main);
        assert_eq!(
            displays[1].resolution.as_deref(),
            Some("3840 x 2160 @ 60.00Hz")
        );
    }

    #[test]
    fn test_decode_display_inventory_empty_is_not_error() {
        assert!(decode_display_inventory("{}").unwrap().is_empty());
        assert!(
            decode_display_inventory(r#"{"SPDisplaysDataType": []}"#)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_decode_display_inventory_rejects_non_json() {
        let err = decode_display_inventory("system_profiler: command not found").unwrap_err();
        assert!(matches!(err, FormatError::InvalidJson { .. }));
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("1920 x 1080"), Some((1920, 1080)));
        assert_eq!(parse_resolution("3840  x\t2160 @ 60.00Hz"), Some((3840, 2160)));
        assert_eq!(parse_resolution("1920x1080"), None);
        assert_eq!(parse_resolution("1920 x"), None);
        assert_eq!(parse_resolution("wide x tall"), None);
        assert_eq!(parse_resolution("0 x 1080"), None);
    }
}
