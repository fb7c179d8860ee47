// src/calendar.rs
// Month-by-month navigation of the roster calendar widget.

use std::thread;
use std::time::Instant;

use crate::config::consts::{ID_NEXT_MONTH, ID_PREVIOUS_MONTH};
use crate::config::options::Settle;
use crate::core::Document;
use crate::driver::{Automation, DriverError, Locator, Session};
use crate::error::{Result, RosterError};
use crate::specs::month::month_label;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn control_id(self) -> &'static str {
        match self {
            Direction::Next => ID_NEXT_MONTH,
            Direction::Previous => ID_PREVIOUS_MONTH,
        }
    }
}

/// Click the month link for `direction`, let the postback settle and
/// capture the resulting page.
///
/// `previous_label` is the heading shown before the click; `Settle::Poll`
/// waits for a different heading to appear. If it never does, the last
/// capture is returned and the extractor's own heading check decides.
pub fn step<A: Automation>(
    session: &mut Session<A>,
    direction: Direction,
    settle: Settle,
    previous_label: Option<&str>,
) -> Result<Document> {
    let channel = session.channel()?;
    let control = direction.control_id();
    tracing::debug!(?direction, "navigating");

    match channel.click(&Locator::id(control)) {
        Ok(()) => {}
        Err(DriverError::ElementNotFound { .. }) => {
            tracing::error!(%control, "navigation control missing");
            return Err(RosterError::NavigationControlMissing { control: s!(control) });
        }
        Err(e) => return Err(e.into()),
    }

    match settle {
        Settle::Fixed(pause) => {
            thread::sleep(pause);
            Ok(Document::new(channel.current_document()?))
        }
        Settle::Poll { timeout, interval } => {
            let deadline = Instant::now() + timeout;
            loop {
                let doc = Document::new(channel.current_document()?);
                let settled = match (month_label(&doc), previous_label) {
                    (Some(now), Some(before)) => now != before,
                    (Some(_), None) => true,
                    (None, _) => false,
                };
                if settled {
                    return Ok(doc);
                }
                if Instant::now() >= deadline {
                    tracing::warn!(?direction, ?timeout, "month heading did not change before settle timeout");
                    return Ok(doc);
                }
                thread::sleep(interval);
            }
        }
    }
}
