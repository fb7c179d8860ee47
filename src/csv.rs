// src/csv.rs
use std::io::{self, Write};

use crate::config::options::ExportFormat;
use crate::roster::{MonthSlot, RosterTimeline};

pub const HEADERS: [&str; 3] = ["Month", "Day", "Shift"];

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Timeline → rows ---------------- */

/// One `[Month, Day, Shift]` row per emitted day, in visitation order.
pub fn timeline_rows(timeline: &RosterTimeline) -> Vec<[String; 3]> {
    timeline
        .days()
        .map(|d| [d.month.clone(), d.day.to_string(), d.shift.clone()])
        .collect()
}

/// Console layout: a heading line per visited page, then one line per day.
pub fn write_text<W: Write>(mut w: W, timeline: &RosterTimeline) -> io::Result<()> {
    for slot in timeline.slots() {
        match slot {
            MonthSlot::Month(m) => {
                writeln!(w, "Month Heading: {}", m.label)?;
                for d in &m.days {
                    writeln!(w, "{:02} {}:  Shift: {}", d.day, d.month, d.shift)?;
                }
            }
            MonthSlot::Revisit { label } => writeln!(w, "Month Heading: {label} (already listed)")?,
            MonthSlot::Gap => writeln!(w, "Month Heading: <unreadable page>")?,
        }
    }
    Ok(())
}

/// Full export text for `format`.
pub fn to_export_string(timeline: &RosterTimeline, format: ExportFormat, include_headers: bool) -> String {
    let mut buf: Vec<u8> = Vec::new();

    match format.delim() {
        None => {
            let _ = write_text(&mut buf, timeline);
        }
        Some(sep) => {
            if include_headers {
                let _ = write_row(&mut buf, &HEADERS, sep);
            }
            for row in timeline_rows(timeline) {
                let _ = write_row(&mut buf, &row, sep);
            }
        }
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
