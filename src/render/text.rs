use crate::render::{COLUMNS, Frame};
use crate::utils::{fit_to_width, format_price};

/// Widest a text column may grow before cells are truncated
const MAX_COLUMN_WIDTH: usize = 32;

/// Render a frame as a plain-text table for terminals
pub fn render(frame: &Frame) -> String {
    let cells: Vec<[String; 4]> = frame
        .rows
        .iter()
        .map(|r| {
            [
                r.id.clone(),
                r.name.clone(),
                format_price(r.price),
                r.date.clone(),
            ]
        })
        .collect();

    let widths = column_widths(&cells);
    let mut lines = Vec::with_capacity(cells.len() + 5);

    lines.push(frame.title.clone());
    lines.push(String::new());
    lines.push(format_row(&COLUMNS.map(str::to_string), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        lines.push(format_row(row, &widths));
    }

    if let Some(message) = frame.status.message() {
        lines.push(String::new());
        lines.push(message);
    }
    if frame.can_retry() {
        lines.push("[r] Retry".to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Width of every column: the widest of header and cells, capped
pub fn column_widths(cells: &[[String; 4]]) -> [usize; 4] {
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count()).min(MAX_COLUMN_WIDTH);
        }
    }
    widths
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| fit_to_width(cell, *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
