// src/gui/app.rs
use std::{
    env,
    error::Error,
    sync::{Arc, Mutex, atomic::AtomicBool},
    thread::JoinHandle,
    time::Duration,
};

use eframe::egui;

use crate::{
    config::{
        consts::PASSWORD_ENV,
        file::FileConfig,
        state::AppState,
    },
    error::Result,
    roster::RosterTimeline,
};

use super::{actions, components, table_model::TableData};

pub fn run(options: eframe::NativeOptions) -> std::result::Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Roster Scraper",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    /// Login secret; kept out of `AppState` so it never lands in Debug output.
    pub password: String,

    // output text field UX (mapped onto ExportOptions on export)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // last completed run
    pub timeline: Option<RosterTimeline>,
    pub table: TableData,

    // worker shared state
    pub status: Arc<Mutex<String>>,
    pub cancel: Arc<AtomicBool>,
    pub worker: Option<JoinHandle<Result<RosterTimeline>>>,
}

impl App {
    pub fn new(mut state: AppState) -> Self {
        let mut password = env::var(PASSWORD_ENV).unwrap_or_default();
        let mut status = s!("Idle");

        if let Some(path) = FileConfig::default_path() {
            match FileConfig::load(&path) {
                Ok(Some(cfg)) => {
                    if let Err(e) = cfg.apply(&mut state.options) {
                        tracing::error!(error = %e, "config file rejected");
                        status = format!("Config error: {e}");
                    }
                    if let Some(u) = cfg.username { state.gui.username = u; }
                    if password.is_empty() {
                        if let Some(p) = cfg.password { password = p; }
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, "config file unreadable");
                    status = format!("Config error: {e}");
                }
            }
        }

        let out_path_text = state.options.export.default_path().to_string_lossy().into_owned();
        tracing::info!(months_back = state.options.scrape.months_back, "gui initialised");

        Self {
            state,
            password,
            out_path_text,
            out_path_dirty: false,
            timeline: None,
            table: TableData::default(),
            status: Arc::new(Mutex::new(status)),
            cancel: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn running(&self) -> bool { self.worker.is_some() }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Rebuild the table after a view toggle.
    pub fn rebuild_view(&mut self) {
        self.table = match &self.timeline {
            Some(t) => TableData::from_timeline(t, self.state.gui.hide_gaps),
            None => TableData::default(),
        };
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        actions::poll(self);
        if self.running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::SidePanel::left("login")
            .resizable(false)
            .show(ctx, |ui| {
                components::login_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::export_bar::draw(ui, self);

            ui.separator();

            components::data_table::draw(ui, self);
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Blocks until the worker's session has closed the browser.
        actions::shutdown(self);
    }
}
