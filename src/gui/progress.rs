// src/gui/progress.rs
use std::sync::{ Arc, Mutex };
use crate::progress::{Progress, Step};

pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        *self.status.lock().unwrap() = msg.into();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.set_status(format!("Uploading (0/{total})"));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn step_done(&mut self, step: Step) {
        self.done += 1;
        self.set_status(format!("Done: {} ({}/{})", step.title(), self.done, self.total));
    }
    fn finish(&mut self) {
        // The worker reports the outcome; only note how far the run got.
        logd!("Progress: finished {}/{} step(s)", self.done, self.total);
    }
}
