// src/gui/app.rs
use std::{
    error::Error,
    path::PathBuf,
    sync::{mpsc::{Receiver, TryRecvError}, Arc, Mutex},
    time::Duration,
};

use eframe::egui;

use crate::{
    config::{
        options::{IsoOptions, Method, Selection},
        state::AppState,
    },
    core::form::FormData,
    error::Result,
    file,
    runner::RunSummary,
};

pub fn run(options: eframe::NativeOptions) -> std::result::Result<(), Box<dyn Error>> {
    eframe::run_native(
        "isoget",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

/// What a worker thread hands back to the UI thread.
pub enum WorkerResult {
    Run(Result<RunSummary>),
    List(Result<Vec<String>>),
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // path fields as typed (mapped into options before a request)
    pub parent_text: String,
    pub structure_text: String,
    pub selection_n: usize,

    // output text field UX (we map this <-> IsoOptions::output)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // fields of the last final request (table view)
    pub last_fields: Option<FormData>,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub worker: Option<Receiver<WorkerResult>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let parent_text = state.options.parent.to_string_lossy().into_owned();
        let selection_n = match state.options.selection {
            Selection::Ordinal(n) => n.max(1),
            Selection::Structure(_) => 1,
        };
        let out_path_text = state.options.out_path().to_string_lossy().into_owned();

        logf!("Init: method={}, format={}", state.options.method.number(), state.options.format);

        Self {
            state,
            parent_text,
            structure_text: s!(),
            selection_n,
            out_path_text,
            out_path_dirty: false,
            last_fields: None,
            status: Arc::new(Mutex::new(s!("Idle"))),
            running: false,
            worker: None,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap() = msg.into();
    }

    /// Default output path for the current parent and format.
    pub fn default_out_path(&self) -> PathBuf {
        IsoOptions::default_out_path(&PathBuf::from(self.parent_text.trim()), self.state.options.format)
    }

    /// Parent or format changed: follow with the output field unless the user typed there.
    pub fn refresh_out_path(&mut self) {
        if !self.out_path_dirty {
            self.out_path_text = self.default_out_path().to_string_lossy().into_owned();
            logd!("UI: out_path_text refreshed to default → {}", self.out_path_text);
        }
    }

    /// Mirror the text fields and editor rows into `state.options`.
    pub fn sync_options(&mut self) -> Result<()> {
        let opts = &mut self.state.options;
        opts.parent = PathBuf::from(self.parent_text.trim());
        opts.selection = match opts.method {
            Method::Subgroup => Selection::Ordinal(self.selection_n),
            Method::Decomposition => Selection::Structure(PathBuf::from(self.structure_text.trim())),
        };
        opts.output = if self.out_path_dirty {
            let default = IsoOptions::default_out_path(&opts.parent, opts.format);
            Some(file::resolve_out_path(&self.out_path_text, &default)?)
        } else {
            None
        };
        self.state.sync_overrides();
        Ok(())
    }

    /// Pick up a finished worker, if any.
    fn poll_worker(&mut self) {
        let Some(rx) = &self.worker else { return };
        let msg = match rx.try_recv() {
            Ok(msg) => msg,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                loge!("Worker: Gone without a result");
                self.status("Error: worker stopped unexpectedly");
                self.worker = None;
                self.running = false;
                return;
            }
        };
        self.worker = None;
        self.running = false;

        match msg {
            WorkerResult::Run(Ok(summary)) => {
                logf!(
                    "Run: OK output={} archives={} server_file={}",
                    summary.output.display(),
                    summary.archives.len(),
                    summary.server_filename
                );
                let mut extra = match summary.archives.len() {
                    0 => s!(),
                    n => format!(" (+{n} archive(s))"),
                };
                if !summary.failed_archives.is_empty() {
                    extra.push_str(&format!(", {} archive(s) failed, see log", summary.failed_archives.len()));
                }
                self.status(format!("Saved {}{extra}", summary.output.display()));
                self.last_fields = Some(summary.fields);
            }
            WorkerResult::List(Ok(list)) => {
                logf!("List: OK count={}", list.len());
                self.status(format!("{} distortion(s) offered", list.len()));
                if self.selection_n > list.len() {
                    self.selection_n = 1;
                }
                self.state.gui.distortions = list;
            }
            WorkerResult::Run(Err(e)) | WorkerResult::List(Err(e)) => {
                loge!("Worker: Error: {e}");
                self.status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        if self.running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::SidePanel::left("options")
            .resizable(false)
            .min_width(320.0)
            .show(ctx, |ui| {
                crate::gui::components::options_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::action_buttons::draw(ui, self);

            ui.separator();

            crate::gui::components::fields_table::draw(ui, self);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::method;

    const PARENT_PAGE: &str = include_str!("../../tests/fixtures/method.html");

    #[test]
    fn method4_upload_carries_only_page_fields() {
        let mut app = App::new(AppState::default());
        app.parent_text = s!("hexMnTe.cif");
        app.state.options.method = Method::Decomposition;
        app.structure_text = s!("distorted.cif");
        app.sync_options().unwrap();

        let fields = method::collect(PARENT_PAGE, Method::Decomposition, &app.state.options.overrides).unwrap();
        let names: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["input", "filename", "spacegroup"]);
        assert_eq!(app.state.options.selection, Selection::Structure(PathBuf::from("distorted.cif")));
    }
}
