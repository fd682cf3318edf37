// src/specs/subgroup.rs
//
// Distortion list page (response to the method form). Layout:
//
//   <FORM ACTION="isodistortform.php" ...>
//   hidden fields ...                 <- kept as is
//   ... <br>
//   <INPUT TYPE="RADIO" NAME="orderparam" VALUE="..."> caption<br>   (one per distortion)
//   ...
//   </FORM>
//
// Method 4 answers with a single form instead; `structure_form` reads that.

use crate::config::consts::{FORM_CLOSE_MARKER, FORM_OPEN_MARKER, LIST_BREAK_MARKER};
use crate::core::{
    form::FormData,
    html::{self, Input},
};
use crate::error::{IsoError, Result};
use crate::progress::Step;

struct ListPage<'a> {
    header: &'a str,
    list: &'a str,
}

fn split_page(doc: &str) -> Result<ListPage<'_>> {
    let (start, end) = html::section_bounds(doc, FORM_OPEN_MARKER, LIST_BREAK_MARKER, 0)
        .ok_or(IsoError::MarkerNotFound { step: Step::Subgroup, marker: FORM_OPEN_MARKER })?;
    let list_end = html::through_line(doc, end, FORM_CLOSE_MARKER);
    Ok(ListPage { header: &doc[start..end], list: &doc[end..list_end] })
}

fn distortions(list: &str) -> Vec<Input> {
    html::radios(list)
}

/// Fields for the next POST: the form's hidden fields plus the
/// `ordinal`-th distortion (1-based, top to bottom).
pub fn select(doc: &str, ordinal: usize) -> Result<FormData> {
    let page = split_page(doc)?;
    let mut data: FormData = html::hidden_fields(page.header).collect();

    let choices = distortions(page.list);
    let chosen = ordinal
        .checked_sub(1)
        .and_then(|ix| choices.get(ix))
        .ok_or(IsoError::SelectionOutOfRange { selection: ordinal, available: choices.len() })?;

    logd!("{}: picked {:?} = {:?} ({})", Step::Subgroup, chosen.name, chosen.value, chosen.label);
    data.insert(chosen.name.as_str(), chosen.value.as_str());
    Ok(data)
}

/// Captions of the offered distortions, in selection order.
pub fn options(doc: &str) -> Result<Vec<String>> {
    let page = split_page(doc)?;
    Ok(distortions(page.list)
        .into_iter()
        .map(|i| if i.label.is_empty() { i.value } else { i.label })
        .collect())
}

/// Method 4: the page after the structure upload is one form; submit its
/// defaults as a browser would.
pub fn structure_form(doc: &str) -> Result<FormData> {
    let section = html::section_after_line(doc, FORM_OPEN_MARKER, FORM_CLOSE_MARKER)
        .ok_or(IsoError::MarkerNotFound { step: Step::Subgroup, marker: FORM_OPEN_MARKER })?;
    let data = FormData::defaults_of(&html::inputs(section));
    if data.is_empty() {
        logw!("{}: structure upload answered with an empty form", Step::Subgroup);
    }
    Ok(data)
}
