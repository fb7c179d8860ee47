// src/cli.rs
use std::{env, io::{self, Write}, path::PathBuf, process, time::Duration};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, eyre};

use crate::config::{
    consts::PASSWORD_ENV,
    file::{FileConfig, parse_browser},
    options::{AppOptions, Credentials, ExportFormat, Settle},
};
use crate::csv::to_export_string;
use crate::error::RosterError;
use crate::log::{self, Sink};
use crate::progress::Progress;
use crate::roster::RosterTimeline;

/// Collect a Microster self-service roster and print or export it.
#[derive(Parser, Debug)]
#[command(name = "roster_scrape", version, about)]
pub struct Args {
    /// Config file (default: ~/.roster_scrape/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Personnel id used to log in
    #[arg(short, long)]
    pub username: Option<String>,

    /// Months to walk back from the current month
    #[arg(short = 'm', long)]
    pub months_back: Option<u32>,

    #[arg(long)]
    pub login_url: Option<String>,

    /// Page opened after login when it does not land on the roster
    #[arg(long)]
    pub roster_url: Option<String>,

    /// WebDriver server, e.g. http://127.0.0.1:9515
    #[arg(long)]
    pub webdriver: Option<String>,

    /// chrome or firefox
    #[arg(long)]
    pub browser: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    /// Fixed pause after each month click instead of polling
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// One-second pause after each month click instead of polling
    #[arg(long, conflicts_with = "settle_ms")]
    pub fixed_settle: bool,

    /// Current month only, via a plain HTTPS form login (no browser)
    #[arg(long)]
    pub direct: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Header row for csv/tsv
    #[arg(long)]
    pub include_headers: bool,

    /// -v info, -vv debug
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => ExportFormat::Text,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

impl Args {
    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Built-in defaults, then the config file, then flags.
pub fn resolve_options(args: &Args, file: Option<&FileConfig>) -> crate::error::Result<AppOptions> {
    let mut opts = AppOptions::default();
    if let Some(f) = file {
        f.apply(&mut opts)?;
    }

    let scrape = &mut opts.scrape;
    if let Some(v) = &args.login_url { scrape.login_url = v.clone(); }
    if let Some(v) = &args.roster_url { scrape.roster_url = Some(v.clone()); }
    if let Some(v) = args.months_back { scrape.months_back = v; }
    if let Some(v) = &args.webdriver { scrape.webdriver.server_url = v.clone(); }
    if let Some(v) = &args.browser { scrape.webdriver.browser = parse_browser(v)?; }
    if args.fixed_settle { scrape.settle = Settle::reference(); }
    if let Some(v) = args.settle_ms { scrape.settle = Settle::Fixed(Duration::from_millis(v)); }
    if args.headful { scrape.webdriver.headless = false; }

    opts.export.format = args.format.into();
    opts.export.include_headers = args.include_headers;
    opts.export.out_path = args.out.clone();
    Ok(opts)
}

/// Identifier from flag → file → prompt; secret from env → file → prompt.
fn resolve_credentials(args: &Args, file: Option<&FileConfig>) -> Result<Credentials> {
    let username = match args.username.clone().or_else(|| file.and_then(|f| f.username.clone())) {
        Some(u) => u,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Personnel id")
            .interact_text()
            .wrap_err("reading personnel id")?,
    };

    let password = match env::var(PASSWORD_ENV).ok().or_else(|| file.and_then(|f| f.password.clone())) {
        Some(p) => p,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .wrap_err("reading password")?,
    };

    if username.trim().is_empty() {
        return Err(eyre!("personnel id is empty"));
    }
    Ok(Credentials::new(username.trim(), password))
}

/// Progress lines on stderr so stdout stays clean for the roster itself.
struct CliProgress {
    total: usize,
    done: usize,
    interrupted: Arc<AtomicBool>,
}

impl CliProgress {
    fn new(interrupted: Arc<AtomicBool>) -> Self {
        Self { total: 0, done: 0, interrupted }
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn month_done(&mut self, label: &str, shifts: usize) {
        self.done += 1;
        eprintln!("[{}/{}] {label}: {shifts} shifts", self.done, self.total);
    }

    fn month_failed(&mut self, position: usize) {
        self.done += 1;
        eprintln!("[{}/{}] page {position} unreadable, skipped", self.done, self.total);
    }

    fn cancelled(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}

/// First Ctrl-C asks the run to stop at the next step so the browser
/// session is closed; a second one exits at once.
fn install_interrupt() -> Result<Arc<AtomicBool>> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            process::exit(130);
        }
        eprintln!("Interrupted, closing the browser…");
    })
    .wrap_err("failed to set ctrl-c handler")?;
    Ok(interrupted)
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    log::init(Sink::Stderr, args.log_level()).wrap_err("starting logger")?;

    let config_path = args.config.clone().or_else(FileConfig::default_path);
    let file = match &config_path {
        Some(p) => FileConfig::load(p)?,
        None => None,
    };

    let opts = resolve_options(&args, file.as_ref())?;
    let creds = resolve_credentials(&args, file.as_ref())?;

    let timeline = if args.direct {
        crate::direct::collect_current_month(&opts.scrape, &creds)?
    } else {
        let mut progress = CliProgress::new(install_interrupt()?);
        match crate::scrape::collect_roster(&opts.scrape, &creds, Some(&mut progress)) {
            Ok(t) => t,
            Err(RosterError::Cancelled) => {
                eprintln!("Stopped after {} of {} pages", progress.done, progress.total);
                process::exit(130);
            }
            Err(e) => return Err(e.into()),
        }
    };

    emit(&opts, &timeline)
}

fn emit(opts: &AppOptions, timeline: &RosterTimeline) -> Result<()> {
    if opts.export.out_path.is_some() {
        let path = crate::file::export_timeline(&opts.export, timeline).wrap_err("writing export")?;
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }
    let text = to_export_string(timeline, opts.export.format, opts.export.include_headers);
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::ScrapeOptions;
    use crate::driver::{fake::FakeCalendar, webdriver::Browser};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("roster_scrape").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_keep_defaults() {
        let opts = resolve_options(&parse(&[]), None).unwrap();
        assert_eq!(opts, AppOptions::default());
    }

    #[test]
    fn flags_override_file() {
        let file = FileConfig { months_back: Some(6), browser: Some(s!("chrome")), ..FileConfig::default() };
        let args = parse(&["-m", "3", "--browser", "firefox", "--headful", "--format", "csv", "--settle-ms", "500"]);
        let opts = resolve_options(&args, Some(&file)).unwrap();
        assert_eq!(opts.scrape.months_back, 3);
        assert_eq!(opts.scrape.webdriver.browser, Browser::Firefox);
        assert!(!opts.scrape.webdriver.headless);
        assert_eq!(opts.scrape.settle, Settle::Fixed(Duration::from_millis(500)));
        assert_eq!(opts.export.format, ExportFormat::Csv);
    }

    #[test]
    fn file_applies_when_flag_absent() {
        let file = FileConfig { months_back: Some(6), ..FileConfig::default() };
        let opts = resolve_options(&parse(&["-o", "x.tsv"]), Some(&file)).unwrap();
        assert_eq!(opts.scrape.months_back, 6);
        assert_eq!(opts.export.out_path, Some(PathBuf::from("x.tsv")));
    }

    #[test]
    fn fixed_settle_selects_one_second_pause() {
        let opts = resolve_options(&parse(&["--fixed-settle"]), None).unwrap();
        assert_eq!(opts.scrape.settle, Settle::reference());
        assert!(Args::try_parse_from(["roster_scrape", "--fixed-settle", "--settle-ms", "5"]).is_err());
    }

    #[test]
    fn interrupt_stops_run_and_closes_browser_once() {
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);
        // Ctrl-C lands while the first month click is in flight.
        let browser = FakeCalendar::new().on_step(move || flag.store(true, Ordering::SeqCst));
        let closes = browser.closes();

        let scrape = ScrapeOptions { months_back: 24, settle: Settle::Fixed(Duration::ZERO), ..ScrapeOptions::default() };
        let mut progress = CliProgress::new(interrupted);
        let err = crate::scrape::run(browser, &scrape, &Credentials::new("1", "x"), Some(&mut progress)).unwrap_err();

        assert!(matches!(err, RosterError::Cancelled));
        assert_eq!(progress.done, 2);
        assert_eq!(progress.total, 26);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["roster_scrape", "--format", "xml"]).is_err());
    }

    #[test]
    fn verbosity_maps_to_level() {
        assert_eq!(parse(&[]).log_level(), "warn");
        assert_eq!(parse(&["-vv"]).log_level(), "debug");
    }
}
