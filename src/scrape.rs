// src/scrape.rs
//
// Roster assembler: one login, then current month → one month forward →
// `months_back` months backward, each page read into the timeline.

use std::iter;

use crate::{
    auth,
    calendar::{self, Direction},
    config::options::{Credentials, ScrapeOptions},
    core::Document,
    driver::{Automation, Session, webdriver::WebDriver},
    error::{Result, RosterError},
    progress::{NullProgress, Progress},
    roster::{MonthShifts, MonthSlot, RosterTimeline},
    specs::month,
};

/// Start a WebDriver browser session and run the full roster collection.
pub fn collect_roster(
    scrape: &ScrapeOptions,
    credentials: &Credentials,
    progress: Option<&mut dyn Progress>,
) -> Result<RosterTimeline> {
    let driver = WebDriver::connect(&scrape.webdriver)?;
    run(driver, scrape, credentials, progress)
}

/// Drive `channel` through a whole run.
///
/// The channel is released before returning on every path. Fatal errors
/// (login timeout, missing navigation link, channel failure, cancellation)
/// abort the run; a month page that stays unreadable after one re-read is
/// recorded as a gap and the run moves on.
pub fn run<A: Automation>(
    channel: A,
    scrape: &ScrapeOptions,
    credentials: &Credentials,
    progress: Option<&mut dyn Progress>,
) -> Result<RosterTimeline> {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };

    let mut session = Session::new(channel);
    progress.begin(scrape.total_steps());
    tracing::info!(months_back = scrape.months_back, "roster run started");

    let outcome = drive(&mut session, scrape, credentials, progress);
    let released = session.release();
    progress.finish();

    match (outcome, released) {
        (Ok(timeline), Ok(())) => {
            tracing::info!(
                slots = timeline.len(),
                shifts = timeline.days().count(),
                gaps = timeline.gap_positions().len(),
                "roster run finished"
            );
            Ok(timeline)
        }
        (Ok(timeline), Err(e)) => {
            tracing::warn!(error = %e, "session close failed after a complete run");
            Ok(timeline)
        }
        (Err(e), close) => {
            if let Err(ce) = close {
                tracing::error!(error = %ce, "session close failed");
            }
            tracing::error!(error = %e, "roster run aborted");
            Err(e)
        }
    }
}

fn drive<A: Automation>(
    session: &mut Session<A>,
    scrape: &ScrapeOptions,
    credentials: &Credentials,
    progress: &mut dyn Progress,
) -> Result<RosterTimeline> {
    let mut timeline = RosterTimeline::new();

    progress.log("Logging in…");
    auth::authenticate(session, &scrape.login_url, credentials, scrape.login_timeout)?;
    if let Some(url) = &scrape.roster_url {
        let channel = session.channel()?;
        channel.open(url)?;
        auth::wait_for_calendar(channel, scrape.login_timeout)?;
    }

    ensure_not_cancelled(progress)?;
    let doc = Document::new(session.channel()?.current_document()?);
    let mut last_label = record(session, &mut timeline, &doc, 0, progress)?;

    // One step forward first so the retreat starts from a freshly posted page.
    let plan = iter::once(Direction::Next)
        .chain(iter::repeat(Direction::Previous).take(scrape.months_back as usize));

    for (i, direction) in plan.enumerate() {
        ensure_not_cancelled(progress)?;
        let doc = calendar::step(session, direction, scrape.settle, last_label.as_deref())?;
        if let Some(label) = record(session, &mut timeline, &doc, i + 1, progress)? {
            last_label = Some(label);
        }
    }

    Ok(timeline)
}

fn ensure_not_cancelled(progress: &dyn Progress) -> Result<()> {
    if progress.cancelled() {
        tracing::warn!("run cancelled by caller");
        return Err(RosterError::Cancelled);
    }
    Ok(())
}

/// Extract `doc` into the timeline. Returns the month label when the page
/// was a valid month, `None` when the position became a gap.
fn record<A: Automation>(
    session: &mut Session<A>,
    timeline: &mut RosterTimeline,
    doc: &Document,
    position: usize,
    progress: &mut dyn Progress,
) -> Result<Option<String>> {
    let Some(month) = extract_with_retry(session, doc)? else {
        tracing::warn!(position, "no month heading after retry; recording gap");
        timeline.push_gap();
        progress.month_failed(position);
        return Ok(None);
    };

    let label = month.label.clone();
    let shifts = month.shift_count();
    match timeline.push_month(month) {
        MonthSlot::Revisit { .. } => {
            tracing::info!(month = %label, "month already collected");
            progress.month_done(&label, 0);
        }
        _ => {
            tracing::info!(month = %label, shifts, "month collected");
            progress.month_done(&label, shifts);
        }
    }
    Ok(Some(label))
}

/// An invalid page is re-captured from the same position once.
fn extract_with_retry<A: Automation>(session: &mut Session<A>, doc: &Document) -> Result<Option<MonthShifts>> {
    match month::extract(doc) {
        Ok(m) => Ok(Some(m)),
        Err(e) if e.is_recoverable() => {
            tracing::debug!("invalid month page; re-reading");
            let again = Document::new(session.channel()?.current_document()?);
            match month::extract(&again) {
                Ok(m) => Ok(Some(m)),
                Err(e) if e.is_recoverable() => Ok(None),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}
