use crate::render::{COLUMNS, Frame, ListStatus};
use crate::utils::{escape_html, format_price};
use std::fmt::Write;

/// Render a frame as an HTML fragment
///
/// The last row carries `data-sentinel` so a host page can attach its
/// visibility observer to it.
pub fn render(frame: &Frame) -> String {
    let mut out = String::new();

    out.push_str("<div class=\"product-list\">\n");
    let _ = writeln!(out, "  <h1>{}</h1>", escape_html(&frame.title));
    out.push_str("  <table>\n    <thead>\n      <tr>");
    for column in COLUMNS {
        let _ = write!(out, "<th>{}</th>", column);
    }
    out.push_str("</tr>\n    </thead>\n    <tbody>\n");

    let sentinel_index = frame.sentinel.as_ref().map(|s| s.index);
    for (index, record) in frame.rows.iter().enumerate() {
        let marker = if Some(index) == sentinel_index {
            " data-sentinel=\"true\""
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "      <tr data-key=\"{}\"{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&record.id),
            marker,
            escape_html(&record.id),
            escape_html(&record.name),
            format_price(record.price),
            escape_html(&record.date),
        );
    }
    out.push_str("    </tbody>\n  </table>\n");

    if let Some(message) = frame.status.message() {
        let class = match frame.status {
            ListStatus::Failed(_) => "error",
            _ => "status",
        };
        let _ = writeln!(out, "  <p class=\"{}\">{}</p>", class, escape_html(&message));
    }
    if frame.can_retry() {
        out.push_str("  <button class=\"retry\">Retry</button>\n");
    }

    out.push_str("</div>\n");
    out
}
