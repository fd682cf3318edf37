// src/specs/display.rs
//
// Any response can be an ISODISTORT error page; the final one is also the
// output itself, which may point at *.zip archives (diffraction and
// visualization formats).

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};

use crate::config::consts::{ERROR_MARKERS, ERROR_MESSAGE_MAX};
use crate::core::{
    html,
    sanitize::{normalize_entities, truncate_chars},
};
use crate::error::{IsoError, Result};

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)[^\s"'<>=]+\.zip\b"#).expect("static regex"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

/// Visible text from the earliest error marker on, or `None` for a normal page.
pub fn server_error(doc: &str) -> Option<String> {
    let lc = html::to_lower(doc);
    let at = ERROR_MARKERS.iter().filter_map(|m| lc.find(m)).min()?;

    let text = html::strip_tags(normalize_entities(&doc[at..]));
    let text = if text.is_empty() { s!("(no message)") } else { text };
    Some(truncate_chars(&text, ERROR_MESSAGE_MAX))
}

/// `*.zip` link targets, first-seen order, no repeats. A page without any
/// such link falls back to bare `*.zip` names in its text.
pub fn archive_names(doc: &str) -> Vec<String> {
    let page = Html::parse_document(doc);
    let links = page
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| is_zip(href));
    let names = dedup(links);
    if !names.is_empty() {
        return names;
    }
    dedup(ZIP_RE.find_iter(doc).map(|m| m.as_str()))
}

fn is_zip(reference: &str) -> bool {
    let path = reference.split(['?', '#']).next().unwrap_or(reference);
    path.len() > 4
        && path
            .get(path.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".zip"))
}

fn dedup<'a>(refs: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in refs {
        if !out.iter().any(|seen| seen == name) {
            out.push(s!(name));
        }
    }
    out
}

/// Absolute URL of an archive reference, relative ones resolved against `base_url`.
pub fn archive_url(base_url: &str, name: &str) -> Result<String> {
    let base = Url::parse(base_url).map_err(|e| bad_reference(base_url, name, e))?;
    let url = base.join(name).map_err(|e| bad_reference(base_url, name, e))?;
    Ok(url.into())
}

fn bad_reference(base_url: &str, name: &str, e: impl std::fmt::Display) -> IsoError {
    IsoError::option(format!("bad archive reference '{name}' under {base_url}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_output_has_no_error() {
        let doc = "mode definitions\n prm  !a5  0.00000 min -1 max 1\n";
        assert_eq!(server_error(doc), None);
    }

    #[test]
    fn error_page_message_is_the_text_after_the_marker() {
        let doc = "<html><head><TITLE>Error</TITLE></head>\n<body><p>The space group &quot;P7&quot; is not valid.</p></body></html>";
        assert_eq!(server_error(doc).unwrap(), r#"Error The space group "P7" is not valid."#);

        let doc = "<p>Processing...</p>\n<b>Fatal error</b>: out of memory in <i>isodistort</i>";
        assert_eq!(server_error(doc).unwrap(), "Fatal error: out of memory in isodistort");
    }

    #[test]
    fn long_error_text_is_truncated() {
        let doc = format!("<h2>Error</h2> {}", "x".repeat(1000));
        let msg = server_error(&doc).unwrap();
        assert_eq!(msg.chars().count(), ERROR_MESSAGE_MAX + 1);
        assert!(msg.ends_with('…'));
    }

    #[test]
    fn zip_links_win_over_names_in_the_text() {
        let doc = r#"<a href="isodistortdownload/diffraction_41532.zip">diffraction_41532.zip</a>
Also saved as diffraction_41532.zip and <A HREF='/iso/tmp/frames.ZIP?v=2'>frames</A>.
<a href="isodistortdownload/diffraction_41532.zip">again</a> <a href="help.html">help</a>"#;
        assert_eq!(
            archive_names(doc),
            ["isodistortdownload/diffraction_41532.zip", "/iso/tmp/frames.ZIP?v=2"]
        );
    }

    #[test]
    fn bare_zip_names_when_nothing_is_linked() {
        let doc = "Saved to tmp/modes_1.zip and tmp/modes_1.zip\n<a href=\"index.html\">back</a>";
        assert_eq!(archive_names(doc), ["tmp/modes_1.zip"]);
        assert!(archive_names("no archives, just a zipper.").is_empty());
    }

    #[test]
    fn archive_urls_resolve_against_the_base() {
        let base = "https://iso.byu.edu/iso/";
        assert_eq!(archive_url(base, "tmp/a.zip").unwrap(), "https://iso.byu.edu/iso/tmp/a.zip");
        assert_eq!(archive_url(base, "/other/b.zip").unwrap(), "https://iso.byu.edu/other/b.zip");
        assert_eq!(archive_url(base, "http://mirror.example/c.zip").unwrap(), "http://mirror.example/c.zip");
        assert!(archive_url("not a url", "a.zip").is_err());
    }
}
