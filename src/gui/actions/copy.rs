// src/gui/actions/copy.rs
use eframe::egui;

use crate::{csv::to_export_string, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let Some(timeline) = app.timeline.as_ref() else {
        app.status("Nothing to copy");
        tracing::debug!("copy clicked with no roster loaded");
        return;
    };

    let export = &app.state.options.export;
    let txt = to_export_string(timeline, export.format, export.include_headers);
    tracing::info!(format = ?export.format, shifts = timeline.days().count(), "copied roster");

    ui_ctx.copy_text(txt);
    app.status("Copied to clipboard");
}
