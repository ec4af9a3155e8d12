use crate::server::{AppWindowList, ScreenList, WindowList};

fn border(left: &str, mid: &str, right: &str, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(mid))
}

fn row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| truncate(cell, width))
        .collect();
    format!("│ {} │", padded.join(" │ "))
}

/// Render a box-drawn table. Column widths fit the widest cell, capped per column.
fn render(headers: &[&str], rows: &[Vec<String>], caps: &[usize]) -> Vec<String> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .min(caps[i])
        })
        .collect();

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![
        border("┌", "┬", "┐", &widths),
        row(&header_cells, &widths),
        border("├", "┼", "┤", &widths),
    ];
    lines.extend(rows.iter().map(|r| row(r, &widths)));
    lines.push(border("└", "┴", "┘", &widths));
    lines
}

fn position(x: i32, y: i32) -> String {
    format!("x:{x} y:{y}")
}

fn size(width: i32, height: i32) -> String {
    format!("{width}x{height}")
}

/// Print a formatted table of windows across applications
pub fn print_windows_table(list: &WindowList) {
    let rows: Vec<Vec<String>> = list
        .windows
        .iter()
        .map(|w| {
            vec![
                w.app_name.clone(),
                w.window_title.clone(),
                position(w.x, w.y),
                size(w.width, w.height),
            ]
        })
        .collect();
    for line in render(&["App", "Title", "Position", "Size"], &rows, &[20, 40, 15, 11]) {
        println!("{line}");
    }
    println!("\nTotal: {} window(s)", list.count);
}

/// Print one application's windows with the indices `move_resize_app_window` accepts
pub fn print_app_windows_table(list: &AppWindowList) {
    let rows: Vec<Vec<String>> = list
        .windows
        .iter()
        .map(|w| {
            vec![
                w.index.to_string(),
                w.title.clone(),
                position(w.x, w.y),
                size(w.width, w.height),
            ]
        })
        .collect();
    for line in render(&["#", "Title", "Position", "Size"], &rows, &[5, 40, 15, 11]) {
        println!("{line}");
    }
    println!("\nTotal: {} window(s) for {}", list.count, list.app_name);
}

/// Print a formatted table of displays
pub fn print_screens_table(list: &ScreenList) {
    let rows: Vec<Vec<String>> = list
        .displays
        .iter()
        .map(|d| {
            vec![
                d.index.to_string(),
                d.name.clone(),
                position(d.left, d.top),
                size(d.width, d.height),
                if d.is_main { "Yes" } else { "No" }.to_string(),
            ]
        })
        .collect();
    for line in render(
        &["Index", "Name", "Position", "Size", "Main"],
        &rows,
        &[5, 30, 15, 11, 4],
    ) {
        println!("{line}");
    }
    println!(
        "\nTotal: {} screen(s), virtual desktop {}x{}",
        list.count, list.total_width, list.total_height
    );
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Counts characters, not bytes, so multi-byte titles are cut safely.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
