// src/driver/webdriver.rs
//! Blocking W3C WebDriver client.
//!
//! Speaks the JSON wire protocol to a local chromedriver/geckodriver over
//! `core::net`. One `WebDriver` value is one browser session; dropping it
//! without `close` leaves the browser running, which is why callers own it
//! through [`super::Session`].

use std::{
    thread,
    time::{Duration, Instant},
};

use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use super::{Automation, DriverError, Locator};
use crate::core::net::{self, HttpResponse};

/// W3C web element reference key.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebDriverConfig {
    /// Base URL of the WebDriver server, e.g. `http://127.0.0.1:9515`.
    pub server_url: String,
    pub browser: Browser,
    pub headless: bool,
    /// Per-request socket timeout.
    pub request_timeout: Duration,
    /// Re-query interval for `wait_for_element`.
    pub poll_interval: Duration,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            server_url: s!(crate::config::consts::DEFAULT_WEBDRIVER_URL),
            browser: Browser::Chrome,
            headless: true,
            request_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(250),
        }
    }
}

pub struct WebDriver {
    host: String,
    port: u16,
    /// Server base path without trailing slash (`""` or e.g. `/wd/hub`).
    base: String,
    server_url: String,
    session_id: String,
    request_timeout: Duration,
    poll_interval: Duration,
    closed: bool,
}

#[derive(Debug, Deserialize)]
struct W3cError {
    error: String,
    #[serde(default)]
    message: String,
}

impl WebDriver {
    /// Start a new browser session on the configured server.
    pub fn connect(cfg: &WebDriverConfig) -> Result<Self, DriverError> {
        let url = Url::parse(&cfg.server_url).map_err(|e| DriverError::Connection {
            url: cfg.server_url.clone(),
            reason: e.to_string(),
        })?;
        if url.scheme() != "http" {
            return Err(DriverError::Connection {
                url: cfg.server_url.clone(),
                reason: s!("only plain http WebDriver endpoints are supported"),
            });
        }
        let host = url.host_str().unwrap_or("127.0.0.1").to_string();
        let port = url.port_or_known_default().unwrap_or(80);
        let base = url.path().trim_end_matches('/').to_string();

        let mut driver = Self {
            host,
            port,
            base,
            server_url: cfg.server_url.clone(),
            session_id: s!(),
            request_timeout: cfg.request_timeout,
            poll_interval: cfg.poll_interval,
            closed: false,
        };

        let reply = driver.command("POST", "/session", Some(capabilities(cfg)))?;
        driver.session_id = reply
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| protocol("new session reply has no sessionId"))?
            .to_string();

        tracing::info!(server = %driver.server_url, session = %driver.session_id, "WebDriver session started");
        Ok(driver)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn session_path(&self, tail: &str) -> String {
        format!("/session/{}{}", self.session_id, tail)
    }

    fn command(&self, method: &str, path: &str, body: Option<Value>) -> Result<Value, DriverError> {
        if self.closed {
            return Err(DriverError::SessionClosed);
        }
        let full = format!("{}{}", self.base, path);
        let payload = body.map(|b| b.to_string());
        tracing::trace!(%method, path = %full, "webdriver request");

        let resp = net::http_request(&self.host, self.port, method, &full, payload.as_deref(), self.request_timeout)
            .map_err(|e| DriverError::Connection {
                url: self.server_url.clone(),
                reason: e.to_string(),
            })?;
        decode_reply(resp)
    }

    fn find_element(&self, locator: &Locator) -> Result<String, DriverError> {
        let body = json!({ "using": "css selector", "value": css_selector(locator) });
        let value = self
            .command("POST", &self.session_path("/element"), Some(body))
            .map_err(|e| match e {
                DriverError::Http { ref code, .. } if code == "no such element" => {
                    DriverError::ElementNotFound { locator: locator.to_string() }
                }
                other => other,
            })?;

        value
            .get(ELEMENT_KEY)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| protocol("element reply has no element reference"))
    }
}

impl Automation for WebDriver {
    fn open(&mut self, url: &str) -> Result<(), DriverError> {
        tracing::debug!(%url, "open");
        self.command("POST", &self.session_path("/url"), Some(json!({ "url": url })))?;
        Ok(())
    }

    fn wait_for_element(&mut self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.find_element(locator) {
                Ok(_) => return Ok(()),
                Err(DriverError::ElementNotFound { .. }) if Instant::now() < deadline => {
                    thread::sleep(self.poll_interval);
                }
                Err(DriverError::ElementNotFound { .. }) => {
                    return Err(DriverError::WaitTimeout { locator: locator.to_string(), timeout });
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        // `text` may be a secret; only the locator is logged.
        tracing::debug!(%locator, "send keys");
        let element = self.find_element(locator)?;
        let path = self.session_path(&format!("/element/{element}/value"));
        self.command("POST", &path, Some(json!({ "text": text })))?;
        Ok(())
    }

    fn click(&mut self, locator: &Locator) -> Result<(), DriverError> {
        tracing::debug!(%locator, "click");
        let element = self.find_element(locator)?;
        let path = self.session_path(&format!("/element/{element}/click"));
        self.command("POST", &path, Some(json!({})))?;
        Ok(())
    }

    fn current_document(&mut self) -> Result<String, DriverError> {
        let value = self.command("GET", &self.session_path("/source"), None)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| protocol("page source is not a string"))
    }

    fn close(&mut self) -> Result<(), DriverError> {
        if self.closed {
            return Ok(());
        }
        let res = self.command("DELETE", &self.session_path(""), None);
        self.closed = true;
        tracing::info!(session = %self.session_id, "WebDriver session closed");
        res.map(|_| ())
    }
}

fn protocol(detail: &str) -> DriverError {
    DriverError::Protocol { detail: s!(detail) }
}

fn capabilities(cfg: &WebDriverConfig) -> Value {
    let always = match cfg.browser {
        Browser::Chrome => {
            let mut args = vec!["--disable-gpu", "--window-size=1280,1024"];
            if cfg.headless {
                args.push("--headless=new");
            }
            json!({ "browserName": "chrome", "goog:chromeOptions": { "args": args } })
        }
        Browser::Firefox => {
            let args: Vec<&str> = if cfg.headless { vec!["-headless"] } else { Vec::new() };
            json!({ "browserName": "firefox", "moz:firefoxOptions": { "args": args } })
        }
    };
    json!({ "capabilities": { "alwaysMatch": always } })
}

/// Attribute selectors avoid escaping `$` and `:` in ASP.NET control names.
pub fn css_selector(locator: &Locator) -> String {
    let attr = match locator {
        Locator::ByName(_) => "name",
        Locator::ById(_) => "id",
    };
    let escaped = locator.value().replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{attr}=\"{escaped}\"]")
}

/// Unwrap the W3C `{"value": …}` envelope, mapping error objects.
pub fn decode_reply(resp: HttpResponse) -> Result<Value, DriverError> {
    let parsed: Value = if resp.body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&resp.body).map_err(|e| DriverError::Protocol {
            detail: format!("invalid JSON (HTTP {}): {e}", resp.status),
        })?
    };
    let value = parsed.get("value").cloned().unwrap_or(Value::Null);

    if resp.is_success() {
        return Ok(value);
    }
    match serde_json::from_value::<W3cError>(value) {
        Ok(err) => Err(DriverError::Http { status: resp.status, code: err.error, message: err.message }),
        Err(_) => Err(DriverError::Http {
            status: resp.status,
            code: s!("unknown error"),
            message: resp.body,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> HttpResponse {
        HttpResponse { status, body: s!(body) }
    }

    #[test]
    fn selectors_quote_control_names() {
        assert_eq!(
            css_selector(&Locator::name("ctl00$ContentPlaceHolder1$txtPassword")),
            r#"[name="ctl00$ContentPlaceHolder1$txtPassword"]"#
        );
        assert_eq!(css_selector(&Locator::id(r#"a"b"#)), r#"[id="a\"b"]"#);
    }

    #[test]
    fn success_unwraps_value() {
        let v = decode_reply(reply(200, r#"{"value":{"sessionId":"abc"}}"#)).unwrap();
        assert_eq!(v["sessionId"], "abc");
        assert_eq!(decode_reply(reply(200, "")).unwrap(), Value::Null);
    }

    #[test]
    fn w3c_error_is_decoded() {
        let err = decode_reply(reply(
            404,
            r#"{"value":{"error":"no such element","message":"Unable to locate","stacktrace":""}}"#,
        ))
        .unwrap_err();
        match err {
            DriverError::Http { status, code, message } => {
                assert_eq!(status, 404);
                assert_eq!(code, "no such element");
                assert_eq!(message, "Unable to locate");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_protocol_error() {
        assert!(matches!(decode_reply(reply(500, "<html>")), Err(DriverError::Protocol { .. })));
    }

    #[test]
    fn capabilities_follow_config() {
        let cfg = WebDriverConfig { headless: false, ..WebDriverConfig::default() };
        let caps = capabilities(&cfg);
        let args = caps["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(!args.iter().any(|a| a == "--headless=new"));

        let ff = WebDriverConfig { browser: Browser::Firefox, ..WebDriverConfig::default() };
        assert_eq!(capabilities(&ff)["capabilities"]["alwaysMatch"]["browserName"], "firefox");
    }
}
