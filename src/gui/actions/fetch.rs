// src/gui/actions/fetch.rs
use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread::{self, JoinHandle},
};

use crate::{
    config::options::Credentials,
    error::RosterError,
    gui::{app::App, progress::GuiProgress, table_model::TableData},
    scrape,
};

/// Start a roster run on a worker thread.
pub fn fetch(app: &mut App) {
    if app.running() {
        return;
    }
    let username = app.state.gui.username.trim().to_owned();
    if username.is_empty() || app.password.is_empty() {
        app.status("Enter personnel id and password");
        return;
    }

    let creds = Credentials::new(username, app.password.clone());
    let scrape_opts = app.state.options.scrape.clone();
    app.cancel.store(false, Ordering::Relaxed);
    let mut prog = GuiProgress::new(app.status.clone(), app.cancel.clone());

    tracing::info!(months_back = scrape_opts.months_back, "fetch requested");
    app.status("Starting browser…");

    let spawned = thread::Builder::new()
        .name(s!("roster-worker"))
        .spawn(move || scrape::collect_roster(&scrape_opts, &creds, Some(&mut prog)));

    match spawned {
        Ok(handle) => app.worker = Some(handle),
        Err(e) => {
            tracing::error!(error = %e, "could not start worker thread");
            app.status(format!("Error: {e}"));
        }
    }
}

/// Ask the running worker to stop before its next navigation step.
pub fn cancel(app: &mut App) {
    if app.running() {
        app.cancel.store(true, Ordering::Relaxed);
        app.status("Cancelling…");
    }
}

/// Stop the worker and wait for it, so its browser session is closed
/// before the window goes away.
pub fn shutdown(app: &mut App) {
    stop_worker(&app.cancel, &mut app.worker);
}

fn stop_worker<T>(cancel: &AtomicBool, worker: &mut Option<JoinHandle<T>>) {
    let Some(handle) = worker.take() else { return };
    cancel.store(true, Ordering::Relaxed);
    tracing::info!("waiting for roster worker to stop");
    if handle.join().is_err() {
        tracing::error!("worker thread panicked during shutdown");
    }
}

/// Collect the worker's result once it has finished.
pub fn poll(app: &mut App) {
    let finished = app.worker.as_ref().is_some_and(|h| h.is_finished());
    if !finished {
        return;
    }
    let Some(handle) = app.worker.take() else { return };

    match handle.join() {
        Ok(Ok(timeline)) => {
            let shifts = timeline.days().count();
            let gaps = timeline.gap_positions().len();
            app.table = TableData::from_timeline(&timeline, app.state.gui.hide_gaps);
            app.timeline = Some(timeline);
            if gaps == 0 {
                app.status(format!("Ready: {shifts} shifts"));
            } else {
                app.status(format!("Ready: {shifts} shifts, {gaps} page(s) skipped"));
            }
        }
        Ok(Err(RosterError::Cancelled)) => app.status("Cancelled"),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "fetch failed");
            app.status(format!("Error: {e}"));
        }
        Err(_) => {
            tracing::error!("worker thread panicked");
            app.status("Error: worker stopped unexpectedly");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use crate::config::options::{ScrapeOptions, Settle};
    use crate::driver::fake::FakeCalendar;

    #[test]
    fn stop_worker_cancels_joins_and_closes_browser_once() {
        let browser = FakeCalendar::new().with_step_delay(Duration::from_millis(20));
        let closes = browser.closes();
        let cancel = Arc::new(AtomicBool::new(false));
        let mut prog = GuiProgress::new(Arc::new(Mutex::new(s!())), cancel.clone());
        let scrape_opts = ScrapeOptions { months_back: 100, settle: Settle::Fixed(Duration::ZERO), ..ScrapeOptions::default() };

        let mut worker = Some(thread::spawn(move || {
            scrape::run(browser, &scrape_opts, &Credentials::new("1", "x"), Some(&mut prog))
        }));
        thread::sleep(Duration::from_millis(50));

        let started = Instant::now();
        stop_worker(&cancel, &mut worker);

        assert!(worker.is_none());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        // one in-flight step at most, not the remaining hundred
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn stop_worker_without_worker_is_noop() {
        let cancel = AtomicBool::new(false);
        let mut worker: Option<JoinHandle<()>> = None;
        stop_worker(&cancel, &mut worker);
        assert!(!cancel.load(Ordering::Relaxed));
    }
}
