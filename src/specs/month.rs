// src/specs/month.rs

use crate::config::consts::{DATE_CELL_PREFIX, ID_MONTH_HEADING, MAX_GRID_CELLS};
use crate::core::{Document, sanitize::space_after_parens};
use crate::error::{Result, RosterError};
use crate::roster::{DayShift, MonthShifts};

/// Month heading of a calendar page, if the page is one.
pub fn month_label(doc: &Document) -> Option<String> {
    doc.find_text_by_id(ID_MONTH_HEADING).filter(|l| !l.is_empty())
}

/// Read one rendered calendar month.
///
/// Grid positions `1..=MAX_GRID_CELLS` are scanned in order. A position
/// with no cell element is grid padding and is skipped. A present cell
/// whose shift text is empty is skipped as well, and neither advances the
/// day counter: days are numbered by emitted shift, not by calendar date.
pub fn extract(doc: &Document) -> Result<MonthShifts> {
    let label = month_label(doc).ok_or_else(|| RosterError::InvalidMonthPage {
        heading_id: s!(ID_MONTH_HEADING),
    })?;

    let mut days = Vec::new();
    let mut day = 1u32;
    for pos in 1..=MAX_GRID_CELLS {
        let Some(raw) = doc.cell_text(&cell_id(pos)) else { continue };
        let shift = space_after_parens(&raw);
        if shift.is_empty() {
            continue;
        }
        days.push(DayShift { day, month: label.clone(), shift });
        day += 1;
    }

    tracing::debug!(month = %label, shifts = days.len(), "extracted month");
    Ok(MonthShifts { label, days })
}

pub fn cell_id(pos: u32) -> String {
    format!("{DATE_CELL_PREFIX}{pos}")
}
