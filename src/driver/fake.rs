// src/driver/fake.rs
//
// In-memory calendar for unit tests that need a `Send` channel, e.g. one
// moved onto a worker thread. Every login succeeds; each month page has a
// unique heading and one shift.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use super::{Automation, DriverError, Locator};
use crate::config::consts::{BUTTON_LOGIN, ID_MONTH_HEADING, ID_NEXT_MONTH, ID_PREVIOUS_MONTH};
use crate::specs::month::cell_id;

type StepHook = Box<dyn FnMut() + Send>;

pub(crate) struct FakeCalendar {
    offset: i32,
    signed_in: bool,
    closes: Arc<AtomicUsize>,
    step_delay: Duration,
    on_step: Option<StepHook>,
}

impl FakeCalendar {
    pub(crate) fn new() -> Self {
        Self {
            offset: 0,
            signed_in: false,
            closes: Arc::new(AtomicUsize::new(0)),
            step_delay: Duration::ZERO,
            on_step: None,
        }
    }

    /// Each month click takes this long.
    pub(crate) fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Runs after every month click.
    pub(crate) fn on_step(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_step = Some(Box::new(hook));
        self
    }

    pub(crate) fn closes(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }
}

impl Automation for FakeCalendar {
    fn open(&mut self, _url: &str) -> Result<(), DriverError> {
        Ok(())
    }

    fn wait_for_element(&mut self, _locator: &Locator, _timeout: Duration) -> Result<(), DriverError> {
        Ok(())
    }

    fn send_keys(&mut self, _locator: &Locator, _text: &str) -> Result<(), DriverError> {
        Ok(())
    }

    fn click(&mut self, locator: &Locator) -> Result<(), DriverError> {
        match locator.value() {
            v if v == BUTTON_LOGIN => {
                self.signed_in = true;
                return Ok(());
            }
            v if v == ID_NEXT_MONTH => self.offset += 1,
            v if v == ID_PREVIOUS_MONTH => self.offset -= 1,
            _ => return Err(DriverError::ElementNotFound { locator: locator.to_string() }),
        }
        thread::sleep(self.step_delay);
        if let Some(hook) = self.on_step.as_mut() {
            hook();
        }
        Ok(())
    }

    fn current_document(&mut self) -> Result<String, DriverError> {
        if !self.signed_in {
            return Ok(s!("<form>login</form>"));
        }
        Ok(format!(
            r#"<span id="{ID_MONTH_HEADING}">Month {}</span><table><tr><td id="{}"><a>1</a><div>E(0600)</div></td></tr></table>"#,
            self.offset,
            cell_id(1)
        ))
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
