// src/gui/components/data_table.rs
//
// Live Month / Day / Shift table. Purely a view over `App::table`.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::gui::{app::App, table_model::{RowKind, TableData}};

const ROW_H: f32 = 20.0;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if app.table.is_empty() {
        ui.weak(if app.running() { "Fetching…" } else { "No roster loaded" });
        return;
    }

    let rows = &app.table.rows;
    let headers = TableData::headers();

    TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .column(Column::initial(140.0).resizable(true).clip(true).at_least(40.0))
        .column(Column::initial(40.0).resizable(true).at_least(20.0))
        .column(Column::remainder().clip(true))
        .header(24.0, |mut header| {
            for h in headers {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_H, rows.len(), |mut row| {
                let Some(r) = rows.get(row.index()) else { return };
                for cell in &r.cells {
                    row.col(|ui| {
                        match r.kind {
                            RowKind::Shift => ui.label(cell.as_str()),
                            RowKind::Marker => ui.label(RichText::new(cell.as_str()).italics().weak()),
                        };
                    });
                }
            });
        });
}
