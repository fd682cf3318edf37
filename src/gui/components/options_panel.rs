// src/gui/components/options_panel.rs
//
// Left panel: parent file, method, distortion, format and the method-3
// override editor. Writes straight into `app`; paths are synced into
// options right before a request.

use eframe::egui;

use crate::{
    config::{
        options::{Method, OutputFormat},
        state::OverrideRow,
    },
    gui::app::App,
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Parent");

    ui.horizontal(|ui| {
        ui.label("CIF:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.parent_text)
                .font(egui::TextStyle::Monospace)
                .hint_text("path/to/parent.cif"))
            .changed()
        {
            // a new parent invalidates the list the server gave for the old one
            app.state.gui.distortions.clear();
            app.refresh_out_path();
        }
    });

    ui.separator();

    // --- Method ---
    let prev_method = app.state.options.method;
    ui.horizontal(|ui| {
        ui.label("Method:");
        for m in Method::ALL {
            ui.selectable_value(&mut app.state.options.method, m, m.number().to_string())
                .on_hover_text(m.title());
        }
    });
    if app.state.options.method != prev_method {
        logf!("UI: Method → {}", app.state.options.method.number());
    }

    // --- Distortion ---
    match app.state.options.method {
        Method::Subgroup => draw_selection(ui, app),
        Method::Decomposition => {
            ui.horizontal(|ui| {
                ui.label("Distorted:");
                ui.add(egui::TextEdit::singleline(&mut app.structure_text)
                    .font(egui::TextStyle::Monospace)
                    .hint_text("path/to/distorted.cif"));
            });
        }
    }

    // --- Format ---
    let prev_fmt = app.state.options.format;
    ui.horizontal(|ui| {
        ui.label("Format:");
        egui::ComboBox::from_id_salt("format")
            .selected_text(prev_fmt.as_str())
            .show_ui(ui, |ui| {
                for f in OutputFormat::ALL {
                    ui.selectable_value(&mut app.state.options.format, f, f.as_str());
                }
            });
    });
    if app.state.options.format != prev_fmt {
        logf!("UI: Format → {}", app.state.options.format);
        app.refresh_out_path();
    }

    ui.horizontal(|ui| {
        ui.label("Timeout (s):");
        ui.add(egui::DragValue::new(&mut app.state.options.timeout_secs).range(1..=3600));
    });

    ui.separator();

    if app.state.options.method == Method::Subgroup {
        draw_overrides(ui, app);
    }
}

fn draw_selection(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Distortion #:");
        ui.add(egui::DragValue::new(&mut app.selection_n).range(1..=999));
    });

    let list = &app.state.gui.distortions;
    if list.is_empty() {
        ui.weak("Press List to see what the server offers");
        return;
    }

    let current = list
        .get(app.selection_n.saturating_sub(1))
        .map(String::as_str)
        .unwrap_or("(out of range)");
    egui::ComboBox::from_id_salt("distortions")
        .width(ui.available_width())
        .selected_text(current)
        .show_ui(ui, |ui| {
            for (i, caption) in list.iter().enumerate() {
                ui.selectable_value(&mut app.selection_n, i + 1, format!("{}: {caption}", i + 1));
            }
        });
}

fn draw_overrides(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.strong("Subgroup fields");
        if ui.small_button("+").on_hover_text("Add field").clicked() {
            app.state.gui.override_rows.push(OverrideRow::default());
        }
        if ui.small_button("Reset").clicked() {
            app.state.gui.override_rows = crate::config::state::GuiState::default().override_rows;
            logd!("UI: Override rows reset to defaults");
        }
    });

    let mut remove: Option<usize> = None;
    egui::ScrollArea::vertical()
        .id_salt("overrides_scroll")
        .show(ui, |ui| {
            egui::Grid::new("overrides")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui| {
                    for (i, row) in app.state.gui.override_rows.iter_mut().enumerate() {
                        ui.add(egui::TextEdit::singleline(&mut row.key)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(110.0));
                        ui.add(egui::TextEdit::singleline(&mut row.value)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(120.0));
                        if ui.small_button("x").on_hover_text("Remove").clicked() {
                            remove = Some(i);
                        }
                        ui.end_row();
                    }
                });
        });

    if let Some(i) = remove {
        let row = app.state.gui.override_rows.remove(i);
        logd!("UI: Override row removed → {}", row.key);
    }
}
