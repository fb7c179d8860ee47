// src/gui/table_model.rs
//! Flat Month / Day / Shift rows for the live table.
//!
//! Revisits and unreadable pages show up as marker rows so the table keeps
//! the visitation order; `hide_markers` drops them.

use crate::csv::HEADERS;
use crate::roster::{MonthSlot, RosterTimeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Shift,
    Marker,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub kind: RowKind,
    pub cells: [String; 3],
}

#[derive(Clone, Debug, Default)]
pub struct TableData {
    pub rows: Vec<TableRow>,
}

impl TableData {
    pub fn headers() -> [&'static str; 3] {
        HEADERS
    }

    pub fn from_timeline(timeline: &RosterTimeline, hide_markers: bool) -> Self {
        let mut rows = Vec::new();
        for slot in timeline.slots() {
            match slot {
                MonthSlot::Month(m) => {
                    rows.extend(m.days.iter().map(|d| TableRow {
                        kind: RowKind::Shift,
                        cells: [d.month.clone(), d.day.to_string(), d.shift.clone()],
                    }));
                }
                MonthSlot::Revisit { label } if !hide_markers => rows.push(TableRow {
                    kind: RowKind::Marker,
                    cells: [label.clone(), s!(), s!("(already listed)")],
                }),
                MonthSlot::Gap if !hide_markers => rows.push(TableRow {
                    kind: RowKind::Marker,
                    cells: [s!(), s!(), s!("(unreadable page)")],
                }),
                _ => {}
            }
        }
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn shift_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.kind == RowKind::Shift).count()
    }
}
