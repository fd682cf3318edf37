// src/gui/components/fields_table.rs
//
// Read-only view of the fields the last run submitted for its output.

use eframe::egui::{self, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.strong("Submitted fields");
        ui.checkbox(&mut app.state.gui.wrap_values, "Wrap values");
    });

    let Some(fields) = app.last_fields.as_ref() else {
        ui.weak("Nothing yet: RUN fills this with the final request.");
        return;
    };

    let wrap = if app.state.gui.wrap_values { TextWrapMode::Wrap } else { TextWrapMode::Truncate };
    let avail_h = ui.available_height();

    TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(avail_h)
        .column(Column::initial(180.0).resizable(true).clip(true).at_least(40.0))
        .column(Column::remainder().clip(true))
        .header(24.0, |mut header| {
            header.col(|ui| { ui.label(RichText::new("Name").strong()); });
            header.col(|ui| { ui.label(RichText::new("Value").strong()); });
        })
        .body(|body| {
            let pairs = fields.as_pairs();
            body.rows(20.0, pairs.len(), |mut row| {
                let (name, value) = &pairs[row.index()];
                row.col(|ui| {
                    ui.add(egui::Label::new(RichText::new(name).monospace()).wrap_mode(TextWrapMode::Truncate));
                });
                row.col(|ui| {
                    ui.add(egui::Label::new(RichText::new(value).monospace()).wrap_mode(wrap))
                        .on_hover_text(value);
                });
            });
        });
}
