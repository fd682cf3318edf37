// src/config/job.rs
//! TOML job files: one ISODISTORT request per file, so runs can be repeated
//! and kept next to the structures they came from.
//!
//! ```toml
//! parent = "hexMnTe.cif"
//! output = "out/MnTe_iso.txt"
//! method = 3
//! format = "topas"
//! selection = 1
//!
//! [fields]
//! basis11 = 0
//! basis12 = -1
//! ```
//!
//! Relative paths are taken relative to the job file, not the working directory.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::options::{Endpoints, IsoOptions, Method, OutputFormat, Selection};
use crate::error::{IsoError, Result};

#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawJob {
    /// The parent structure (CIF) to upload.
    parent: PathBuf,

    /// Where the final response is written. Defaults to
    /// `out/<parent stem>_<format>.<ext>`.
    output: Option<PathBuf>,

    /// ISODISTORT method number, 3 or 4. Defaults to 3, or 4 when `structure`
    /// is given.
    method: Option<Method>,

    /// Output format requested in the last step.
    format: Option<OutputFormat>,

    /// 1-based position of the wanted distortion in the server's list.
    selection: Option<usize>,

    /// Distorted structure for method 4.
    structure: Option<PathBuf>,

    /// Download *.zip archives referenced by the output.
    fetch_archives: Option<bool>,

    timeout_secs: Option<u64>,

    /// Alternative server root, e.g. a mirror.
    base_url: Option<String>,

    /// Form values merged over the method-3 defaults, sent in file order.
    /// Numbers and booleans are sent as written.
    #[serde(default)]
    fields: toml::Table,
}

/// Load a job file into run options.
pub fn load(path: &Path) -> Result<IsoOptions> {
    let text = read_to_string(path).map_err(|e| IsoError::io(path, e))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    parse(&text, base).map_err(|e| match e {
        IsoError::Config { msg, .. } => IsoError::Config { path: path.to_path_buf(), msg },
        other => other,
    })
}

/// Parse job text; relative paths resolve against `base_dir`.
pub fn parse(text: &str, base_dir: &Path) -> Result<IsoOptions> {
    let raw: RawJob = toml::from_str(text).map_err(|e| config_err(e.to_string()))?;

    let selection = match (raw.structure, raw.selection) {
        (Some(_), Some(_)) => return Err(config_err("set either `selection` or `structure`, not both")),
        (Some(p), None) => Selection::Structure(base_dir.join(p)),
        (None, Some(n)) => Selection::Ordinal(n),
        (None, None) => Selection::default(),
    };

    let method = raw.method.unwrap_or(match selection {
        Selection::Structure(_) => Method::Decomposition,
        Selection::Ordinal(_) => Method::Subgroup,
    });

    let mut opts = IsoOptions::new(base_dir.join(raw.parent));
    opts.output = raw.output.map(|p| base_dir.join(p));
    opts.method = method;
    opts.selection = selection;
    if let Some(f) = raw.format { opts.format = f; }
    if let Some(b) = raw.fetch_archives { opts.fetch_archives = b; }
    if let Some(t) = raw.timeout_secs { opts.timeout_secs = t; }
    if let Some(url) = raw.base_url { opts.endpoints = Endpoints::with_base(&url); }

    for (key, value) in raw.fields {
        let value = match value {
            toml::Value::String(s) => s,
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => format!("{f:?}"),
            toml::Value::Boolean(b) => b.to_string(),
            other => return Err(config_err(format!("field `{key}` must be a string or number, got {}", other.type_str()))),
        };
        opts.set_override(key, value);
    }

    Ok(opts)
}

fn config_err<S: Into<String>>(msg: S) -> IsoError {
    IsoError::Config { path: PathBuf::new(), msg: msg.into() }
}
