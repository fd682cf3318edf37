// src/specs/distort.rs
//
// Output options page (response to the distortion choice). Everything the
// form submits untouched is kept; only the format radio is overridden.

use crate::config::consts::{FORMAT_FIELD, FORM_CLOSE_MARKER, FORM_OPEN_MARKER};
use crate::config::options::OutputFormat;
use crate::core::{form::FormData, html};
use crate::error::{IsoError, Result};
use crate::progress::Step;

pub fn collect(doc: &str, format: OutputFormat) -> Result<FormData> {
    let section = html::section_after_line(doc, FORM_OPEN_MARKER, FORM_CLOSE_MARKER)
        .ok_or(IsoError::MarkerNotFound { step: Step::Distort, marker: FORM_OPEN_MARKER })?;

    let mut data = FormData::defaults_of(&html::inputs(section));
    if data.is_empty() {
        logw!("{}: output form has no fields", Step::Distort);
    }
    data.insert(FORMAT_FIELD, format.as_str());
    Ok(data)
}
