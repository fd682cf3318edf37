// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod error;
pub mod progress;

pub mod config;
pub mod core;
pub mod specs;

pub mod file;
pub mod runner;

#[cfg(feature = "cli")]
pub mod cli;
pub mod gui;

pub use error::{IsoError, Result};
pub use runner::{run, run_default, ArchiveFailure, RunSummary};
