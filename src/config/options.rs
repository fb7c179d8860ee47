// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::driver::webdriver::WebDriverConfig;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// How the navigator decides a postback has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settle {
    /// Unconditional pause after the click.
    Fixed(Duration),
    /// Re-read the page until a new month heading shows up.
    Poll { timeout: Duration, interval: Duration },
}

impl Default for Settle {
    fn default() -> Self {
        Settle::Poll {
            timeout: Duration::from_millis(SETTLE_POLL_TIMEOUT_MS),
            interval: Duration::from_millis(SETTLE_POLL_INTERVAL_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub login_url: String,
    /// Opened after login when the landing page is not the roster.
    pub roster_url: Option<String>,
    /// Months retreated after the forced forward step.
    pub months_back: u32,
    pub login_timeout: Duration,
    pub settle: Settle,
    pub webdriver: WebDriverConfig,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            login_url: s!(LOGIN_URL),
            roster_url: None,
            months_back: DEFAULT_MONTHS_BACK,
            login_timeout: Duration::from_secs(LOGIN_TIMEOUT_SECS),
            settle: Settle::default(),
            webdriver: WebDriverConfig::default(),
        }
    }
}

impl Settle {
    /// The unconditional one-second pause of the reference run.
    pub fn reference() -> Self {
        Settle::Fixed(Duration::from_millis(SETTLE_FIXED_MS))
    }
}

impl ScrapeOptions {
    /// Month pages visited by a run: current, one forward, then `months_back`.
    pub fn total_steps(&self) -> usize {
        self.months_back as usize + 2
    }

    /// Roster page for transports that must request it explicitly.
    pub fn roster_page(&self) -> &str {
        self.roster_url.as_deref().unwrap_or(ROSTER_URL)
    }
}

/// Login identity. The secret never reaches `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), secret: secret.into() }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// `DD Month YYYY:  Shift: …` lines.
    #[default]
    Text,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }

    /// Field separator; `None` for the plain-text layout.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Text => None,
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    /// `None` writes to stdout (CLI) or the default path (GUI).
    pub out_path: Option<PathBuf>,
}

impl ExportOptions {
    pub fn default_path(&self) -> PathBuf {
        PathBuf::from(DEFAULT_OUT_DIR).join(format!("{}.{}", DEFAULT_FILE, self.format.ext()))
    }
}
