// src/error.rs
use std::{io, path::{Path, PathBuf}};

use thiserror::Error;

use crate::config::options::{Method, OutputFormat};
use crate::progress::Step;

pub type Result<T> = std::result::Result<T, IsoError>;

#[derive(Debug, Error)]
pub enum IsoError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("HTTP error: {status} {url}")]
    Http { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A page no longer looks the way the scraper expects.
    #[error("{step}: {marker:?} not found in the server response (ISODISTORT page layout may have changed)")]
    MarkerNotFound { step: Step, marker: &'static str },

    #[error("{step}: ISODISTORT reported an error: {message}")]
    Server { step: Step, message: String },

    #[error("selection {selection} is out of range: the server offered {available} distortion(s)")]
    SelectionOutOfRange { selection: usize, available: usize },

    #[error("'{0}' is not a valid format. Acceptable options are: {list}", list = OutputFormat::list())]
    InvalidFormat(String),

    #[error("{0} is not a valid method number. Acceptable options are: {list}", list = Method::list())]
    InvalidMethod(u32),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("{}: {msg}", .path.display())]
    Config { path: PathBuf, msg: String },
}

impl IsoError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        IsoError::Io { path: path.to_path_buf(), source }
    }

    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        IsoError::Transport { url: s!(url), source }
    }

    pub fn option<S: Into<String>>(msg: S) -> Self {
        IsoError::InvalidOption(msg.into())
    }
}
