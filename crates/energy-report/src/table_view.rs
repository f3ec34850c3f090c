//! Console table of the per-building summary.
//!
//! Renders one row per building plus a totals row, with columns aligned by
//! display width so non-ASCII building names line up.

use energy_core::formatting::{format_number, pad_left_to_width, pad_to_width, share_percent};
use energy_core::models::BuildingSummary;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 7] = ["Building", "Total kWh", "Mean", "Min", "Max", "Readings", "Share %"];

/// Render the building summary as an aligned text table.
///
/// Returns a single line stating that no readings were loaded when `summary`
/// is empty.
pub fn render_summary_table(summary: &[BuildingSummary]) -> String {
    if summary.is_empty() {
        return "No readings loaded.\n".to_string();
    }

    let campus_total: f64 = summary.iter().map(|r| r.total_kwh).sum();
    let campus_readings: usize = summary.iter().map(|r| r.readings).sum();

    let mut rows: Vec<[String; 7]> = summary
        .iter()
        .map(|r| {
            [
                r.building.clone(),
                format_number(r.total_kwh, 2),
                format_number(r.mean_kwh, 2),
                format_number(r.min_kwh, 2),
                format_number(r.max_kwh, 2),
                r.readings.to_string(),
                format_number(share_percent(r.total_kwh, campus_total), 1),
            ]
        })
        .collect();

    rows.push([
        "TOTAL".to_string(),
        format_number(campus_total, 2),
        String::new(),
        String::new(),
        String::new(),
        campus_readings.to_string(),
        String::new(),
    ]);

    let mut widths: [usize; 7] = HEADERS.map(|h| UnicodeWidthStr::width(h));
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut out = String::new();
    out.push_str(&render_line(&HEADERS.map(|h| h.to_string()), &widths));
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    let last = rows.len() - 1;
    for (i, row) in rows.iter().enumerate() {
        if i == last {
            out.push_str(&"-".repeat(rule_len));
            out.push('\n');
        }
        out.push_str(&render_line(row, &widths));
    }

    out
}

/// First column left-aligned, numeric columns right-aligned.
fn render_line(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(cells.len());
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i == 0 {
            parts.push(pad_to_width(cell, *width));
        } else {
            parts.push(pad_left_to_width(cell, *width));
        }
    }
    let mut line = parts.join("  ").trim_end().to_string();
    line.push('\n');
    line
}
