// src/driver/mod.rs
//! Remote-browser automation channel.
//!
//! The roster engine only needs six operations from a browser, captured by
//! [`Automation`]. [`webdriver::WebDriver`] implements them against a W3C
//! WebDriver server; tests script their own implementations.
//!
//! A channel is always owned through a [`Session`], which closes it exactly
//! once on every exit path.

pub mod error;
pub mod webdriver;
#[cfg(test)]
pub(crate) mod fake;

use std::fmt;
use std::time::Duration;

pub use error::DriverError;

/// How an element is addressed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// `name` attribute (form fields).
    ByName(String),
    /// `id` attribute (calendar controls, cells).
    ById(String),
}

impl Locator {
    pub fn name(value: impl Into<String>) -> Self {
        Locator::ByName(value.into())
    }

    pub fn id(value: impl Into<String>) -> Self {
        Locator::ById(value.into())
    }

    pub fn value(&self) -> &str {
        match self {
            Locator::ByName(v) | Locator::ById(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::ByName(v) => write!(f, "name={v}"),
            Locator::ById(v) => write!(f, "id={v}"),
        }
    }
}

pub trait Automation {
    fn open(&mut self, url: &str) -> Result<(), DriverError>;

    /// Block until the element is present, or fail with `WaitTimeout`.
    fn wait_for_element(&mut self, locator: &Locator, timeout: Duration) -> Result<(), DriverError>;

    fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), DriverError>;

    fn click(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Full rendered HTML of the current page.
    fn current_document(&mut self) -> Result<String, DriverError>;

    fn close(&mut self) -> Result<(), DriverError>;
}

impl<A: Automation + ?Sized> Automation for Box<A> {
    fn open(&mut self, url: &str) -> Result<(), DriverError> {
        (**self).open(url)
    }
    fn wait_for_element(&mut self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        (**self).wait_for_element(locator, timeout)
    }
    fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        (**self).send_keys(locator, text)
    }
    fn click(&mut self, locator: &Locator) -> Result<(), DriverError> {
        (**self).click(locator)
    }
    fn current_document(&mut self) -> Result<String, DriverError> {
        (**self).current_document()
    }
    fn close(&mut self) -> Result<(), DriverError> {
        (**self).close()
    }
}

/// Exclusive owner of one automation channel for the length of a run.
///
/// `release` closes the channel and reports the outcome; if the session is
/// dropped without being released (error path, cancellation, unwinding) the
/// channel is closed from `Drop` and any close error is logged.
pub struct Session<A: Automation> {
    channel: A,
    released: bool,
}

impl<A: Automation> Session<A> {
    pub fn new(channel: A) -> Self {
        Self { channel, released: false }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn channel(&mut self) -> Result<&mut A, DriverError> {
        if self.released {
            return Err(DriverError::SessionClosed);
        }
        Ok(&mut self.channel)
    }

    pub fn release(mut self) -> Result<(), DriverError> {
        self.close_once()
    }

    fn close_once(&mut self) -> Result<(), DriverError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        tracing::debug!("closing automation session");
        self.channel.close()
    }
}

impl<A: Automation> Drop for Session<A> {
    fn drop(&mut self) {
        if let Err(e) = self.close_once() {
            tracing::error!(error = %e, "failed to close automation session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting(Rc<Cell<u32>>);

    impl Automation for Counting {
        fn open(&mut self, _url: &str) -> Result<(), DriverError> { Ok(()) }
        fn wait_for_element(&mut self, _l: &Locator, _t: Duration) -> Result<(), DriverError> { Ok(()) }
        fn send_keys(&mut self, _l: &Locator, _t: &str) -> Result<(), DriverError> { Ok(()) }
        fn click(&mut self, _l: &Locator) -> Result<(), DriverError> { Ok(()) }
        fn current_document(&mut self) -> Result<String, DriverError> { Ok(s!()) }
        fn close(&mut self) -> Result<(), DriverError> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn release_closes_once() {
        let closes = Rc::new(Cell::new(0));
        let session = Session::new(Counting(closes.clone()));
        session.release().unwrap();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn drop_closes_unreleased_session() {
        let closes = Rc::new(Cell::new(0));
        {
            let mut session = Session::new(Counting(closes.clone()));
            session.channel().unwrap().open("http://x").unwrap();
        }
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn locator_display() {
        assert_eq!(Locator::id("lnk").to_string(), "id=lnk");
        assert_eq!(Locator::name("a$b").to_string(), "name=a$b");
    }
}
