// src/gui/actions/run.rs
use std::{sync::mpsc, thread};

use eframe::egui;

use crate::{
    gui::{app::{App, WorkerResult}, progress::GuiProgress},
    runner,
};

pub fn run(app: &mut App, ctx: &egui::Context) {
    if !super::prepare(app) {
        return;
    }

    let opts = app.state.options.clone();
    logf!(
        "Run: Begin parent={} method={} format={} out={}",
        opts.parent.display(),
        opts.method.number(),
        opts.format,
        opts.out_path().display()
    );

    let status = app.status.clone();
    let ctx = ctx.clone();
    let (tx, rx) = mpsc::channel();

    // → The five requests happen off the UI thread ←
    thread::spawn(move || {
        let mut prog = GuiProgress::new(status);
        let res = runner::run_default(&opts, Some(&mut prog));
        let _ = tx.send(WorkerResult::Run(res));
        ctx.request_repaint();
    });

    app.worker = Some(rx);
    app.running = true;
}
