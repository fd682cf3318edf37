// src/specs/method.rs
//
// Parent page (response to the upload form): one block per ISODISTORT method.
// Method 3 keeps the hidden fields between the "Method 3" and "Method 4"
// lines; Method 4 keeps those from "Method 4" to the end of its form.

use crate::config::consts::{FORM_CLOSE_MARKER, METHOD3_MARKER, METHOD4_MARKER};
use crate::config::options::{method3_defaults, Method};
use crate::core::{form::FormData, html};
use crate::error::{IsoError, Result};
use crate::progress::Step;

pub fn collect(doc: &str, method: Method, overrides: &FormData) -> Result<FormData> {
    let (start_marker, end_marker) = match method {
        Method::Subgroup => (METHOD3_MARKER, METHOD4_MARKER),
        Method::Decomposition => (METHOD4_MARKER, FORM_CLOSE_MARKER),
    };
    let section = html::section_after_line(doc, start_marker, end_marker)
        .ok_or(IsoError::MarkerNotFound { step: Step::Method, marker: start_marker })?;

    let mut data: FormData = html::hidden_fields(section).collect();
    if data.is_empty() {
        logw!("{}: no hidden fields under {start_marker:?}", Step::Method);
    }

    if method == Method::Subgroup {
        data.merge(&method3_defaults());
    }
    data.merge(overrides);
    Ok(data)
}
