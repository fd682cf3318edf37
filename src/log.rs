// src/log.rs
//
// env_logger behind the crate's logf!/logd!/loge! call sites.
// Line format: [HH:MM:SS.mmm][LEVEL] msg, elapsed since init.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use env_logger::{Builder, Env, Target};

use crate::config::consts::LOG_FILE;

#[doc(hidden)]
pub use ::log::{debug, error, info, warn};

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

pub(crate) fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Where log lines go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sink {
    /// CLI: straight to the terminal.
    Stderr,
    /// GUI: appended to `.store/debug.log`.
    File,
}

/// Install the global logger. `RUST_LOG` wins over `verbose`.
/// Calling it twice is harmless; the second call is ignored.
pub fn init(verbose: bool, sink: Sink) {
    start();

    let default_filter = if verbose {
        "debug,hyper=info,hyper_util=info,reqwest=info,rustls=info,html5ever=info,selectors=info"
    } else {
        "info"
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    builder.format(|buf, record| {
        let elapsed = fmt_elapsed(start().elapsed().as_millis());
        writeln!(buf, "[{elapsed}][{}] {}", record.level(), record.args())
    });

    if sink == Sink::File {
        match open_log_file(Path::new(LOG_FILE)) {
            Some(file) => { builder.target(Target::Pipe(Box::new(file))); }
            None => { builder.target(Target::Stderr); }
        }
    }

    let _ = builder.try_init();
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::error!($($arg)*)
    };
}
