// src/direct.rs
//
// Browserless login: GET the login page, echo its WebForms state back in
// a form POST, then GET the roster page. The site only renders the current
// month this way; paging back needs postbacks a browser runs for us.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::consts::{
    BUTTON_LOGIN_X, BUTTON_LOGIN_Y, FIELD_PASSWORD, FIELD_PERSONNEL_ID, HTTP_TIMEOUT_SECS, USER_AGENT,
};
use crate::config::options::{Credentials, ScrapeOptions};
use crate::core::Document;
use crate::error::{Result, RosterError};
use crate::roster::{MonthShifts, RosterTimeline};
use crate::specs::{month, postback::PostbackTokens};

/// Page fetches with a shared cookie jar.
pub trait FormTransport {
    fn get(&mut self, url: &str) -> Result<String>;
    /// `pairs` may hold the secret; implementations must not log them.
    fn post_form(&mut self, url: &str, pairs: &[(&str, &str)]) -> Result<String>;
}

/// HTTPS transport with cookies kept between requests.
pub struct HttpForms {
    client: Client,
}

impl HttpForms {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RosterError::Transport { url: s!(), reason: e.to_string() })?;
        Ok(Self { client })
    }
}

impl FormTransport for HttpForms {
    fn get(&mut self, url: &str) -> Result<String> {
        tracing::debug!(url, "GET");
        read_body(url, self.client.get(url).send())
    }

    fn post_form(&mut self, url: &str, pairs: &[(&str, &str)]) -> Result<String> {
        tracing::debug!(url, fields = pairs.len(), "POST form");
        read_body(url, self.client.post(url).header("Referer", url).form(pairs).send())
    }
}

fn read_body(url: &str, sent: reqwest::Result<Response>) -> Result<String> {
    let transport = |reason: String| RosterError::Transport { url: s!(url), reason };
    let resp = sent.map_err(|e| transport(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(transport(format!("HTTP {status}")));
    }
    resp.text().map_err(|e| transport(e.to_string()))
}

/// Post the login form. Fails when the login page has no view state or the
/// reply still asks for a password.
pub fn login<T: FormTransport + ?Sized>(transport: &mut T, login_url: &str, credentials: &Credentials) -> Result<()> {
    let page = Document::new(transport.get(login_url)?);
    let tokens = PostbackTokens::from_document(&page).ok_or_else(|| RosterError::LoginRejected {
        reason: s!("login page carries no view state"),
    })?;

    let mut pairs = vec![
        (FIELD_PERSONNEL_ID, credentials.identifier()),
        (FIELD_PASSWORD, credentials.secret()),
    ];
    pairs.extend(tokens.form_pairs());
    pairs.push((BUTTON_LOGIN_X, "0"));
    pairs.push((BUTTON_LOGIN_Y, "0"));

    let reply = Document::new(transport.post_form(login_url, &pairs)?);
    if reply.has_field(FIELD_PASSWORD) {
        return Err(RosterError::LoginRejected { reason: s!("login form shown again") });
    }
    tracing::info!(user = credentials.identifier(), "form login accepted");
    Ok(())
}

/// Log in and read the month the roster page lands on.
pub fn fetch_current_month<T: FormTransport + ?Sized>(
    transport: &mut T,
    login_url: &str,
    roster_url: &str,
    credentials: &Credentials,
) -> Result<MonthShifts> {
    login(transport, login_url, credentials)?;
    let page = Document::new(transport.get(roster_url)?);
    if page.has_field(FIELD_PASSWORD) {
        return Err(RosterError::LoginRejected { reason: s!("roster page redirected to login") });
    }
    month::extract(&page)
}

/// One-slot timeline of the current month, without a browser.
pub fn collect_current_month(scrape: &ScrapeOptions, credentials: &Credentials) -> Result<RosterTimeline> {
    let mut http = HttpForms::new(Duration::from_secs(HTTP_TIMEOUT_SECS))?;
    let month = fetch_current_month(&mut http, &scrape.login_url, scrape.roster_page(), credentials)?;
    tracing::info!(month = %month.label, shifts = month.shift_count(), "current month collected");

    let mut timeline = RosterTimeline::new();
    timeline.push_month(month);
    Ok(timeline)
}
