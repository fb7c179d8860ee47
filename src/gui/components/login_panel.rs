// src/gui/components/login_panel.rs
//
// Left panel: credentials, run settings, Fetch / Cancel.

use eframe::egui;

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Login");
    ui.add_space(4.0);

    let running = app.running();

    ui.add_enabled_ui(!running, |ui| {
        ui.label("Personnel id");
        ui.add(egui::TextEdit::singleline(&mut app.state.gui.username).desired_width(160.0));

        ui.label("Password");
        ui.add(
            egui::TextEdit::singleline(&mut app.password)
                .password(true)
                .desired_width(160.0),
        );

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Months back");
            let scrape = &mut app.state.options.scrape;
            if ui.add(egui::DragValue::new(&mut scrape.months_back).range(0..=120)).changed() {
                tracing::debug!(months_back = scrape.months_back, "months back changed");
            }
        });

        ui.checkbox(&mut app.state.options.scrape.webdriver.headless, "Hide browser");
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.add_enabled(!running, egui::Button::new("Fetch")).clicked() {
            actions::fetch(app);
        }
        if ui.add_enabled(running, egui::Button::new("Cancel")).clicked() {
            actions::cancel(app);
        }
        if running {
            ui.spinner();
        }
    });

    ui.separator();
    if ui.checkbox(&mut app.state.gui.hide_gaps, "Hide skipped/repeated pages").changed() {
        app.rebuild_view();
    }
}
