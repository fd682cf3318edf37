// src/config/consts.rs

// Net config
pub const ISO_BASE_URL: &str = "https://iso.byu.edu/iso/";
pub const UPLOAD_PAGE: &str = "isodistortuploadfile.php";
pub const FORM_PAGE: &str = "isodistortform.php";
pub const USER_AGENT: &str = concat!("isoget/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 120; // the server can be slow on big supercells

// Form field names the pipeline writes itself
pub const UPLOAD_FILE_FIELD: &str = "toProcess";
pub const FILENAME_FIELD: &str = "filename";
pub const INPUT_FIELD: &str = "input";
pub const PARENT_INPUT: &str = "uploadparentcif";
pub const FORMAT_FIELD: &str = "origintype";

// Page markers (matched case-insensitively)
pub const UPLOAD_VALUE_MARKER: &str = "VALUE=";
pub const METHOD3_MARKER: &str = "Method 3";
pub const METHOD4_MARKER: &str = "Method 4";
pub const FORM_OPEN_MARKER: &str = "<FORM ACTION";
pub const FORM_CLOSE_MARKER: &str = "</FORM>";
pub const LIST_BREAK_MARKER: &str = "<br>";

/// Substrings (lowercase) that mark a server-side error page.
pub const ERROR_MARKERS: &[&str] = &[
    "<title>error",
    "<h1>error",
    "<h2>error",
    "<h3>error",
    "fatal error",
    "an error occurred",
];
pub const ERROR_MESSAGE_MAX: usize = 300;

// Method 3 defaults: P1 subgroup, direct lattice, identity basis
pub const METHOD3_DEFAULTS: &[(&str, &str)] = &[
    ("subgroupsym", "1 P1 C1-1"),
    ("pointgroupsym", "0"),
    ("latticetype", "direct"),
    ("centering", "d"),
    ("basis11", "1"),
    ("basis12", "0"),
    ("basis13", "0"),
    ("basis21", "0"),
    ("basis22", "1"),
    ("basis23", "0"),
    ("basis31", "0"),
    ("basis32", "0"),
    ("basis33", "1"),
];

// Local files
pub const LOG_FILE: &str = ".store/debug.log";

// Output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "isodistort";
