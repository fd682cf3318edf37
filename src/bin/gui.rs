// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::ViewportBuilder;
use isoget::{config::state::GuiState, gui, log::{self, Sink}};

fn main() {
    log::init(false, Sink::File);

    let size = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([size.window_w as f32, size.window_h as f32])
            .with_title("isoget"),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        isoget::loge!("GUI failed: {e}");
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
