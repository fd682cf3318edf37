// src/specs/upload.rs
//
// Upload response: the server renames the uploaded structure and echoes the
// new name in the first VALUE="..." of the page.

use crate::config::consts::UPLOAD_VALUE_MARKER;
use crate::core::sanitize::quoted_value_after;
use crate::error::{IsoError, Result};
use crate::progress::Step;

pub fn server_filename(doc: &str) -> Result<String> {
    quoted_value_after(doc, UPLOAD_VALUE_MARKER)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| s!(v))
        .ok_or(IsoError::MarkerNotFound { step: Step::Upload, marker: UPLOAD_VALUE_MARKER })
}
