// src/auth.rs
// Login through the self-service form.

use std::time::Duration;

use crate::config::consts::{BUTTON_LOGIN, FIELD_PASSWORD, FIELD_PERSONNEL_ID, ID_NEXT_MONTH};
use crate::config::options::Credentials;
use crate::driver::{Automation, DriverError, Locator, Session};
use crate::error::{Result, RosterError};

/// Submit `credentials` on the login page and wait for the roster calendar.
///
/// Both waits are bounded by `timeout`; either one expiring is fatal
/// (`AuthenticationTimeout`). Calling this again performs a fresh login.
pub fn authenticate<A: Automation>(
    session: &mut Session<A>,
    login_url: &str,
    credentials: &Credentials,
    timeout: Duration,
) -> Result<()> {
    let channel = session.channel()?;
    let id_field = Locator::name(FIELD_PERSONNEL_ID);

    tracing::info!(url = %login_url, user = %credentials.identifier(), "logging in");
    channel.open(login_url)?;
    bounded_wait(channel, &id_field, timeout)?;

    channel.send_keys(&id_field, credentials.identifier())?;
    channel.send_keys(&Locator::name(FIELD_PASSWORD), credentials.secret())?;
    channel.click(&Locator::name(BUTTON_LOGIN))?;

    wait_for_calendar(channel, timeout)?;
    tracing::info!("login complete");
    Ok(())
}

/// Wait for the calendar's "next month" link, the post-login landmark.
pub fn wait_for_calendar<A: Automation + ?Sized>(channel: &mut A, timeout: Duration) -> Result<()> {
    bounded_wait(channel, &Locator::id(ID_NEXT_MONTH), timeout)
}

fn bounded_wait<A: Automation + ?Sized>(channel: &mut A, locator: &Locator, timeout: Duration) -> Result<()> {
    match channel.wait_for_element(locator, timeout) {
        Ok(()) => Ok(()),
        Err(DriverError::WaitTimeout { .. }) => {
            tracing::error!(%locator, ?timeout, "login wait expired");
            Err(RosterError::AuthenticationTimeout { element: s!(locator.value()), timeout })
        }
        Err(e) => Err(e.into()),
    }
}
