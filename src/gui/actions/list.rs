// src/gui/actions/list.rs
use std::{sync::mpsc, thread, time::Duration};

use eframe::egui;

use crate::{
    config::options::Method,
    core::net::HttpTransport,
    gui::app::{App, WorkerResult},
    runner,
};

/// Ask the server which distortions method 3 offers for the parent.
pub fn list(app: &mut App, ctx: &egui::Context) {
    if app.state.options.method != Method::Subgroup {
        app.status("The distortion list is only available for method 3");
        return;
    }
    if !super::prepare(app) {
        return;
    }

    let opts = app.state.options.clone();
    logf!("List: Begin parent={}", opts.parent.display());
    app.status("Listing distortions...");

    let ctx = ctx.clone();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let res = HttpTransport::new(Duration::from_secs(opts.timeout_secs))
            .and_then(|t| runner::list_distortions(&opts, &t));
        let _ = tx.send(WorkerResult::List(res));
        ctx.request_repaint();
    });

    app.worker = Some(rx);
    app.running = true;
}
