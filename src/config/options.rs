// src/config/options.rs
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use super::consts::*;
use crate::core::form::FormData;
use crate::error::{IsoError, Result};

/* ---------------- Output format ---------------- */

/// What the final ISODISTORT request asks for (`origintype`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
    IsovizDistortion,
    IsovizDiffraction,
    StructureFile,
    DistortionFile,
    Domains,
    Primary,
    ModesDetails,
    CompleteModesDetails,
    #[default]
    Topas,
    Fullprof,
    Irreps,
    Tree,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 12] = [
        OutputFormat::IsovizDistortion,
        OutputFormat::IsovizDiffraction,
        OutputFormat::StructureFile,
        OutputFormat::DistortionFile,
        OutputFormat::Domains,
        OutputFormat::Primary,
        OutputFormat::ModesDetails,
        OutputFormat::CompleteModesDetails,
        OutputFormat::Topas,
        OutputFormat::Fullprof,
        OutputFormat::Irreps,
        OutputFormat::Tree,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::IsovizDistortion => "isovizdistortion",
            OutputFormat::IsovizDiffraction => "isovizdiffraction",
            OutputFormat::StructureFile => "structurefile",
            OutputFormat::DistortionFile => "distortionfile",
            OutputFormat::Domains => "domains",
            OutputFormat::Primary => "primary",
            OutputFormat::ModesDetails => "modesdetails",
            OutputFormat::CompleteModesDetails => "completemodesdetails",
            OutputFormat::Topas => "topas",
            OutputFormat::Fullprof => "fullprof",
            OutputFormat::Irreps => "irreps",
            OutputFormat::Tree => "tree",
        }
    }

    /// Extension for the default output file name.
    pub fn ext(&self) -> &'static str {
        use OutputFormat::*;
        match self {
            IsovizDistortion | IsovizDiffraction => "iso",
            StructureFile | Primary => "cif",
            DistortionFile | Topas | Fullprof => "txt",
            Domains | ModesDetails | CompleteModesDetails | Irreps | Tree => "html",
        }
    }

    pub fn list() -> String {
        Self::ALL.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = IsoError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| IsoError::InvalidFormat(s!(s)))
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = IsoError;
    fn try_from(s: String) -> Result<Self> { s.parse() }
}

/* ---------------- Method ---------------- */

/// ISODISTORT analysis method, by its number on the parent page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub enum Method {
    /// Method 3: give the subgroup symmetry, lattice and basis.
    #[default]
    Subgroup,
    /// Method 4: mode decomposition of an uploaded distorted structure.
    Decomposition,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Subgroup, Method::Decomposition];

    pub fn number(&self) -> u32 {
        match self { Method::Subgroup => 3, Method::Decomposition => 4 }
    }

    pub fn from_number(n: u32) -> Result<Self> {
        Self::ALL.into_iter().find(|m| m.number() == n).ok_or(IsoError::InvalidMethod(n))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Method::Subgroup => "Method 3: specific subgroup",
            Method::Decomposition => "Method 4: mode decomposition",
        }
    }

    pub fn list() -> String {
        Self::ALL.iter().map(|m| m.number().to_string()).collect::<Vec<_>>().join(", ")
    }
}

impl TryFrom<u32> for Method {
    type Error = IsoError;
    fn try_from(n: u32) -> Result<Self> { Method::from_number(n) }
}

impl FromStr for Method {
    type Err = IsoError;

    fn from_str(s: &str) -> Result<Self> {
        let n: u32 = s.trim().parse().map_err(|_| IsoError::option(format!("method must be a number ({})", Method::list())))?;
        Method::from_number(n)
    }
}

/* ---------------- Selection ---------------- */

/// Which distortion step 3 picks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// 1-based position in the server's distortion list (top = 1).
    Ordinal(usize),
    /// Distorted structure file to decompose (Method 4).
    Structure(PathBuf),
}

impl Default for Selection {
    fn default() -> Self { Selection::Ordinal(1) }
}

/* ---------------- Endpoints ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub upload_url: String,
    pub form_url: String,
}

impl Endpoints {
    /// Endpoints under `base` (a directory URL, trailing slash optional).
    pub fn with_base(base: &str) -> Self {
        let mut base_url = s!(base.trim());
        if !base_url.ends_with('/') { base_url.push('/'); }
        Self {
            upload_url: format!("{base_url}{UPLOAD_PAGE}"),
            form_url: format!("{base_url}{FORM_PAGE}"),
            base_url,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self { Endpoints::with_base(ISO_BASE_URL) }
}

/* ---------------- Run options ---------------- */

/// Method-3 form values sent unless the user overrides them.
pub fn method3_defaults() -> FormData {
    METHOD3_DEFAULTS.iter().copied().collect()
}

/// Parse `KEY=VALUE` (whitespace around the key is trimmed; the value is kept verbatim).
pub fn parse_override(s: &str) -> Result<(String, String)> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| IsoError::option(format!("expected KEY=VALUE, got '{s}'")))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(IsoError::option(format!("empty field name in '{s}'")));
    }
    Ok((s!(k), s!(v)))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsoOptions {
    /// Parent structure file (CIF).
    pub parent: PathBuf,
    /// Output file; `None` derives one from the parent and format.
    pub output: Option<PathBuf>,
    pub method: Method,
    pub format: OutputFormat,
    pub selection: Selection,
    /// Merged over the method-3 defaults; user keys win.
    pub overrides: FormData,
    /// Also download *.zip archives referenced by the output.
    pub fetch_archives: bool,
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for IsoOptions {
    fn default() -> Self {
        Self {
            parent: PathBuf::new(),
            output: None,
            method: Method::default(),
            format: OutputFormat::default(),
            selection: Selection::default(),
            overrides: FormData::new(),
            fetch_archives: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
        }
    }
}

impl IsoOptions {
    pub fn new(parent: impl Into<PathBuf>) -> Self {
        Self { parent: parent.into(), ..Self::default() }
    }

    /// The file the final response is written to.
    pub fn out_path(&self) -> PathBuf {
        match &self.output {
            Some(p) => p.clone(),
            None => Self::default_out_path(&self.parent, self.format),
        }
    }

    /// `out/<parent stem>_<format>.<ext>`
    pub fn default_out_path(parent: &Path, format: OutputFormat) -> PathBuf {
        let stem = parent
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| s!(DEFAULT_FILE));
        PathBuf::from(DEFAULT_OUT_DIR).join(format!("{stem}_{}.{}", format.as_str(), format.ext()))
    }

    pub fn set_override(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.overrides.insert(key, value);
    }

    /// Reject combinations the server would choke on before any request is made.
    pub fn validate(&self) -> Result<()> {
        if self.parent.as_os_str().is_empty() {
            return Err(IsoError::option("no parent structure file given"));
        }
        if !self.parent.is_file() {
            return Err(IsoError::option(format!("parent structure file not found: {}", self.parent.display())));
        }
        if self.timeout_secs == 0 {
            return Err(IsoError::option("timeout must be at least one second"));
        }
        match (&self.method, &self.selection) {
            (Method::Subgroup, Selection::Ordinal(0)) => {
                Err(IsoError::option("selection counts from 1 (the top of the distortion list)"))
            }
            (Method::Subgroup, Selection::Ordinal(_)) => Ok(()),
            (Method::Subgroup, Selection::Structure(_)) => {
                Err(IsoError::option("a distorted structure file needs method 4"))
            }
            (Method::Decomposition, Selection::Ordinal(_)) => {
                Err(IsoError::option("method 4 needs a distorted structure file"))
            }
            (Method::Decomposition, Selection::Structure(p)) => {
                if p.is_file() {
                    Ok(())
                } else {
                    Err(IsoError::option(format!("distorted structure file not found: {}", p.display())))
                }
            }
        }
    }
}
