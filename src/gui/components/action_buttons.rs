// src/gui/components/action_buttons.rs

use std::path::{Path, PathBuf};

use eframe::egui::{self, widgets::Spinner};

use crate::{config::options::Method, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    // --- Output field ---
    let mut open_folder_clicked = false;
    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace)
                .desired_width(420.0))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }

        if ui.button("↺").on_hover_text("Back to the default name").clicked() {
            app.out_path_dirty = false;
            app.refresh_out_path();
        }

        if ui.button("📁").on_hover_text("Open output folder").clicked() {
            open_folder_clicked = true;
        }
    });

    if open_folder_clicked {
        open_output_folder(app);
    }

    let before = app.state.options.fetch_archives;
    ui.checkbox(&mut app.state.options.fetch_archives, "Also download .zip archives from the output");
    if app.state.options.fetch_archives != before {
        logf!("UI: fetch_archives → {}", app.state.options.fetch_archives);
    }

    // Actions: List / RUN
    use crate::gui::actions;
    ui.horizontal(|ui| {
        let can_list = !app.running && app.state.options.method == Method::Subgroup;
        if ui
            .add_enabled(can_list, egui::Button::new("List"))
            .on_hover_text("Show the distortions the server offers")
            .clicked()
        {
            actions::list(app, ui.ctx());
        }

        let red = egui::Color32::from_rgb(220, 30, 30);
        let black = egui::Color32::BLACK;

        let button_run = ui.add_enabled(
            !app.running,
            egui::Button::new(
                egui::RichText::new("RUN")
                .color(black)
                .strong())
            .fill(red));

        if button_run.clicked() {
            actions::run(app, ui.ctx());
        }

        if app.running {
            ui.add(Spinner::new().size(16.0));
        }

        let status = app.status.lock().unwrap().clone();

        ui.label(status);
    });
}

/// Reveal the folder the output will land in, or its closest existing ancestor.
fn open_output_folder(app: &App) {
    let target = PathBuf::from(app.out_path_text.trim());
    let start = target.parent().unwrap_or(Path::new("."));
    let folder = start
        .ancestors()
        .find(|p| !p.as_os_str().is_empty() && p.is_dir())
        .unwrap_or(Path::new("."));

    let folder = match std::fs::canonicalize(folder) {
        Ok(abs) => abs,
        Err(e) => {
            loge!("Cannot resolve {}: {}", folder.display(), e);
            app.status(format!("Cannot resolve folder path: {e}"));
            return;
        }
    };

    match spawn_file_browser(&folder) {
        Ok(()) => logf!("Opened folder: {}", folder.display()),
        Err(e) => {
            loge!("Failed to open folder: {}", e);
            app.status(format!("Failed to open folder: {e}"));
        }
    }
}

fn file_browser() -> Option<&'static str> {
    if cfg!(target_os = "windows") {
        Some("explorer")
    } else if cfg!(target_os = "macos") {
        Some("open")
    } else if cfg!(target_os = "linux") {
        Some("xdg-open")
    } else {
        None
    }
}

fn spawn_file_browser(folder: &Path) -> Result<(), String> {
    let program = file_browser().ok_or_else(|| s!("no file browser known for this platform"))?;
    std::process::Command::new(program)
        .arg(folder)
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("{program}: {e}"))
}
