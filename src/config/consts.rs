// src/config/consts.rs

// Site
pub const LOGIN_URL: &str = "https://ess.tmc.tambla.net/Microster.SelfService/Default.aspx";
pub const ROSTER_URL: &str = "https://ess.tmc.tambla.net/Microster.SelfService/MyRoster2.aspx";

// Login form (looked up by name)
pub const FIELD_PERSONNEL_ID: &str = "ctl00$ContentPlaceHolder1$txtPersonnelId";
pub const FIELD_PASSWORD: &str = "ctl00$ContentPlaceHolder1$txtPassword";
pub const BUTTON_LOGIN: &str = "ctl00$ContentPlaceHolder1$btnLogin";
// Image-button click coordinates posted by the browserless login
pub const BUTTON_LOGIN_X: &str = "ctl00$ContentPlaceHolder1$btnLogin.x";
pub const BUTTON_LOGIN_Y: &str = "ctl00$ContentPlaceHolder1$btnLogin.y";

// Legacy postback tokens
pub const FIELD_VIEWSTATE: &str = "__VIEWSTATE";
pub const FIELD_EVENTVALIDATION: &str = "__EVENTVALIDATION";

// Calendar page (looked up by id)
pub const ID_NEXT_MONTH: &str = "ctl00_ContentPlaceHolder1_calendar_lnkNextMonth";
pub const ID_PREVIOUS_MONTH: &str = "ctl00_ContentPlaceHolder1_calendar_lnkPreviousMonth";
pub const ID_MONTH_HEADING: &str = "ctl00_ContentPlaceHolder1_calendar_lblCurrentMonth";
pub const DATE_CELL_PREFIX: &str = "ctl00_ContentPlaceHolder1_calendar_DateCell";

/// Grid positions scanned per month: six weeks of seven days.
pub const MAX_GRID_CELLS: u32 = 42;

// Run
pub const DEFAULT_MONTHS_BACK: u32 = 24;
pub const LOGIN_TIMEOUT_SECS: u64 = 10;
pub const SETTLE_FIXED_MS: u64 = 1_000;
pub const SETTLE_POLL_TIMEOUT_MS: u64 = 10_000;
pub const SETTLE_POLL_INTERVAL_MS: u64 = 250;

// Browserless transport
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) roster_scrape/0.3";

// WebDriver
pub const DEFAULT_WEBDRIVER_URL: &str = "http://127.0.0.1:9515";

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const CONFIG_DIR: &str = ".roster_scrape";
pub const CONFIG_FILE: &str = "config.toml";
pub const PASSWORD_ENV: &str = "ROSTER_PASSWORD";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "roster";
