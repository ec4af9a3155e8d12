use tracing::{info, warn};

use super::types::{DisplayLayout, DisplayRegion, FallbackReason};
use crate::decode::{RawDisplay, parse_resolution};
use crate::geometry::Rect;

/// Lay the inventory's displays out in the virtual desktop.
///
/// The inventory carries resolutions but no relative placement, so this is a
/// horizontal strip: the main display sits at the origin and every other
/// display follows to its right in inventory order, top-aligned at y = 0.
/// Displays physically left of or above the main one will be misplaced; that
/// is a known limitation of the source data.
///
/// A display whose resolution is unusable takes the desktop's size. The
/// layout degrades to a single region covering `desktop` when the inventory
/// is empty, has no usable resolution at all, or does not flag exactly one
/// main display.
pub fn build_layout(desktop: Rect, inventory: &[RawDisplay]) -> DisplayLayout {
    match place_displays(desktop, inventory) {
        Ok(displays) => {
            info!(
                event = "core.display.layout_built",
                count = displays.len(),
                total_width = desktop.width(),
                total_height = desktop.height()
            );
            DisplayLayout {
                displays,
                total_width: desktop.width(),
                total_height: desktop.height(),
                fallback: None,
            }
        }
        Err(reason) => fallback_layout(desktop, reason),
    }
}

/// Single synthetic display for `desktop`, logged with the reason.
pub fn fallback_layout(desktop: Rect, reason: FallbackReason) -> DisplayLayout {
    warn!(
        event = "core.display.layout_fallback",
        reason = %reason,
        width = desktop.width(),
        height = desktop.height()
    );
    DisplayLayout::fallback(desktop, reason)
}

fn place_displays(
    desktop: Rect,
    inventory: &[RawDisplay],
) -> Result<Vec<DisplayRegion>, FallbackReason> {
    if inventory.is_empty() {
        return Err(FallbackReason::NoDisplays);
    }

    let sizes: Vec<Option<(i32, i32)>> = inventory
        .iter()
        .map(|d| d.resolution.as_deref().and_then(parse_resolution))
        .collect();
    if sizes.iter().all(Option::is_none) {
        return Err(FallbackReason::NoUsableResolution);
    }

    let mut mains = inventory.iter().enumerate().filter(|(_, d)| d.is_main);
    let main = match (mains.next(), mains.next()) {
        (Some((i, _)), None) => i,
        (None, _) => return Err(FallbackReason::NoMainDisplay),
        (Some(_), Some(_)) => return Err(FallbackReason::MultipleMainDisplays),
    };

    let order = std::iter::once(main).chain((0..inventory.len()).filter(|i| *i != main));

    let mut displays: Vec<DisplayRegion> = Vec::with_capacity(inventory.len());
    for (index, source) in order.enumerate() {
        let raw = &inventory[source];
        let (width, height) = sizes[source].unwrap_or((desktop.width(), desktop.height()));
        let left = displays.last().map_or(0, |prev| prev.bounds.right());
        let bounds =
            Rect::from_origin_size(left, 0, width, height).ok_or(FallbackReason::OutOfRange)?;

        let name = if raw.name.trim().is_empty() {
            format!("Display {}", index)
        } else {
            raw.name.clone()
        };

        displays.push(DisplayRegion {
            index,
            name,
            bounds,
            is_main: source == main,
        });
    }

    Ok(displays)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, resolution: Option<&str>, is_main: bool) -> RawDisplay {
        RawDisplay {
            name: name.to_string(),
            resolution: resolution.map(str::to_string),
            is_main,
        }
    }

    fn desktop(right: i32, bottom: i32) -> Rect {
        Rect::new(0, 0, right, bottom).unwrap()
    }

    #[test]
    fn test_two_displays_side_by_side() {
        let inventory = vec![
            raw("main", Some("1920 x 1080"), true),
            raw("secondary", Some("1920 x 1080"), false),
        ];
        let layout = build_layout(desktop(3840, 1080), &inventory);

        assert!(!layout.is_fallback());
        assert_eq!(layout.count(), 2);
        assert_eq!(layout.total_width, 3840);
        assert_eq!(layout.total_height, 1080);

        let first = &layout.displays[0];
        assert_eq!((first.bounds.left(), first.bounds.right()), (0, 1920));
        assert!(first.is_main);
        assert_eq!(first.index, 0);

        let second = &layout.displays[1];
        assert_eq!((second.bounds.left(), second.bounds.right()), (1920, 3840));
        assert!(!second.is_main);
        assert_eq!(second.index, 1);
    }

    #[test]
    fn test_main_is_placed_first_regardless_of_source_order() {
        let inventory = vec![
            raw("left", Some("2560 x 1440"), false),
            raw("laptop", Some("1512 x 982"), true),
            raw("right", Some("1920 x 1080"), false),
        ];
        let layout = build_layout(desktop(5992, 1440), &inventory);

        let names: Vec<&str> = layout.displays.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["laptop", "left", "right"]);
        assert_eq!(layout.displays[0].bounds, Rect::new(0, 0, 1512, 982).unwrap());
        assert_eq!(layout.displays[1].bounds, Rect::new(1512, 0, 4072, 1440).unwrap());
        assert_eq!(layout.displays[2].bounds, Rect::new(4072, 0, 5992, 1080).unwrap());
        let indices: Vec<usize> = layout.displays.iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_regions_never_overlap() {
        let inventory = vec![
            raw("a", Some("1920 x 1080"), false),
            raw("b", Some("3840 x 2160"), true),
            raw("c", None, false),
            raw("d", Some("1280 x 1024"), false),
        ];
        let layout = build_layout(desktop(8000, 2160), &inventory);
        for (i, a) in layout.displays.iter().enumerate() {
            for b in &layout.displays[i + 1..] {
                assert!(!a.bounds.overlaps(&b.bounds), "{:?} overlaps {:?}", a, b);
            }
        }
        assert_eq!(layout.displays.iter().filter(|d| d.is_main).count(), 1);
    }

    #[test]
    fn test_unusable_resolution_uses_desktop_size() {
        let inventory = vec![
            raw("main", Some("1920 x 1080"), true),
            raw("odd", Some("1920x1080"), false),
        ];
        let layout = build_layout(desktop(3840, 1200), &inventory);
        assert!(!layout.is_fallback());
        assert_eq!(
            layout.displays[1].bounds,
            Rect::new(1920, 0, 5760, 1200).unwrap()
        );
    }

    #[test]
    fn test_main_without_resolution_uses_desktop_size() {
        let inventory = vec![
            raw("main", None, true),
            raw("other", Some("1280 x 800"), false),
        ];
        let layout = build_layout(desktop(2560, 1440), &inventory);
        assert_eq!(layout.displays[0].bounds, desktop(2560, 1440));
        assert_eq!(layout.displays[1].bounds.left(), 2560);
    }

    #[test]
    fn test_empty_inventory_falls_back_to_desktop() {
        let bounds = desktop(1728, 1117);
        let layout = build_layout(bounds, &[]);
        assert_eq!(layout.fallback, Some(FallbackReason::NoDisplays));
        assert_eq!(layout.count(), 1);
        assert_eq!(layout.displays[0].bounds, bounds);
        assert!(layout.displays[0].is_main);
        assert_eq!(layout.displays[0].name, "Main Display");
        assert_eq!(layout.total_width, 1728);
    }

    #[test]
    fn test_no_usable_resolution_falls_back() {
        let inventory = vec![raw("main", Some("unknown"), true), raw("b", None, false)];
        let layout = build_layout(desktop(1920, 1080), &inventory);
        assert_eq!(layout.fallback, Some(FallbackReason::NoUsableResolution));
        assert_eq!(layout.count(), 1);
    }

    #[test]
    fn test_missing_main_flag_falls_back() {
        let inventory = vec![
            raw("a", Some("1920 x 1080"), false),
            raw("b", Some("1920 x 1080"), false),
        ];
        let layout = build_layout(desktop(3840, 1080), &inventory);
        assert_eq!(layout.fallback, Some(FallbackReason::NoMainDisplay));
        assert_eq!(layout.displays[0].bounds, desktop(3840, 1080));
    }

    #[test]
    fn test_ambiguous_main_flag_falls_back() {
        let inventory = vec![
            raw("a", Some("1920 x 1080"), true),
            raw("b", Some("1920 x 1080"), true),
        ];
        let layout = build_layout(desktop(3840, 1080), &inventory);
        assert_eq!(layout.fallback, Some(FallbackReason::MultipleMainDisplays));
        assert_eq!(layout.count(), 1);
    }

    #[test]
    fn test_fallback_preserves_negative_desktop_origin() {
        let bounds = Rect::new(-1920, 0, 1920, 1080).unwrap();
        let layout = fallback_layout(bounds, FallbackReason::InventoryUnavailable);
        assert_eq!(layout.displays[0].bounds.left(), -1920);
        assert_eq!(layout.total_width, 3840);
    }

    #[test]
    fn test_totals_come_from_desktop_not_regions() {
        let inventory = vec![
            raw("main", Some("1920 x 1080"), true),
            raw("b", Some("1920 x 1080"), false),
        ];
        // Desktop reports a different aggregate than the strip sums to.
        let layout = build_layout(desktop(3000, 1200), &inventory);
        assert_eq!((layout.total_width, layout.total_height), (3000, 1200));
        assert_eq!(layout.displays[1].bounds.right(), 3840);
    }

    #[test]
    fn test_blank_names_are_numbered() {
        let inventory = vec![raw("", Some("1920 x 1080"), true)];
        let layout = build_layout(desktop(1920, 1080), &inventory);
        assert_eq!(layout.displays[0].name, "Display 0");
    }
}
