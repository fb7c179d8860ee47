// src/config/file.rs
//! Optional user config at `~/.roster_scrape/config.toml`.
//!
//! Every key is optional; missing keys keep the built-in defaults and CLI
//! flags override whatever the file sets.
//!
//! ```toml
//! username = "123456"
//! months-back = 12
//! webdriver-url = "http://127.0.0.1:9515"
//! headless = true
//! settle-ms = 1500          # fixed pause instead of polling
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::{CONFIG_DIR, CONFIG_FILE};
use super::options::{AppOptions, Settle};
use crate::driver::webdriver::Browser;
use crate::error::{Result, RosterError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub login_url: Option<String>,
    pub roster_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub months_back: Option<u32>,
    pub login_timeout_secs: Option<u64>,
    pub settle_ms: Option<u64>,
    pub webdriver_url: Option<String>,
    pub browser: Option<String>,
    pub headless: Option<bool>,
}

impl FileConfig {
    /// `~/.roster_scrape/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Read and parse `path`. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        let cfg = Self::parse(&text)
            .map_err(|e| RosterError::Config(format!("invalid config at {}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "loaded config file");
        Ok(Some(cfg))
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Overlay the file's settings onto `opts`.
    pub fn apply(&self, opts: &mut AppOptions) -> Result<()> {
        let scrape = &mut opts.scrape;
        if let Some(v) = &self.login_url { scrape.login_url = v.clone(); }
        if let Some(v) = &self.roster_url { scrape.roster_url = Some(v.clone()); }
        if let Some(v) = self.months_back { scrape.months_back = v; }
        if let Some(v) = self.login_timeout_secs { scrape.login_timeout = Duration::from_secs(v); }
        if let Some(v) = self.settle_ms { scrape.settle = Settle::Fixed(Duration::from_millis(v)); }
        if let Some(v) = &self.webdriver_url { scrape.webdriver.server_url = v.clone(); }
        if let Some(v) = self.headless { scrape.webdriver.headless = v; }
        if let Some(v) = &self.browser {
            scrape.webdriver.browser = parse_browser(v)?;
        }
        Ok(())
    }
}

pub fn parse_browser(name: &str) -> Result<Browser> {
    match name.to_ascii_lowercase().as_str() {
        "chrome" | "chromium" => Ok(Browser::Chrome),
        "firefox" => Ok(Browser::Firefox),
        other => Err(RosterError::Config(format!("unknown browser: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let cfg = FileConfig::parse(
            r#"
            username = "555"
            months-back = 3
            settle-ms = 1500
            browser = "Firefox"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.username.as_deref(), Some("555"));

        let mut opts = AppOptions::default();
        cfg.apply(&mut opts).unwrap();
        assert_eq!(opts.scrape.months_back, 3);
        assert_eq!(opts.scrape.settle, Settle::Fixed(Duration::from_millis(1500)));
        assert_eq!(opts.scrape.webdriver.browser, Browser::Firefox);
        assert_eq!(opts.scrape.login_url, super::super::consts::LOGIN_URL);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("months_back = 3").is_err());
    }

    #[test]
    fn missing_file_is_none() {
        let p = std::env::temp_dir().join("roster_scrape_no_such_config.toml");
        let _ = fs::remove_file(&p);
        assert_eq!(FileConfig::load(&p).unwrap(), None);
    }

    #[test]
    fn bad_browser_is_config_error() {
        let cfg = FileConfig { browser: Some(s!("lynx")), ..FileConfig::default() };
        let err = cfg.apply(&mut AppOptions::default()).unwrap_err();
        assert!(err.to_string().contains("lynx"));
    }
}
