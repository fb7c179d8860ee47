// src/gui/actions/export.rs
use std::path::PathBuf;

use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    if app.out_path_dirty {
        let text = app.out_path_text.trim();
        app.state.options.export.out_path = if text.is_empty() { None } else { Some(PathBuf::from(text)) };
        app.out_path_dirty = false;
    }

    let Some(timeline) = app.timeline.as_ref() else {
        app.status("Nothing to export");
        tracing::debug!("export clicked with no roster loaded");
        return;
    };

    let msg = match file::export_timeline(&app.state.options.export, timeline) {
        Ok(path) => format!("Exported to {}", path.display()),
        Err(e) => {
            tracing::error!(error = %e, "export failed");
            format!("Export error: {e}")
        }
    };
    app.status(msg);
}
