// src/core/html.rs
//
// Markup helpers for ISODISTORT pages. Scanning is case-insensitive on ASCII
// and works on byte offsets that line up between `s` and `to_lower(s)`.
// Attribute parsing of a single <input> tag is left to `scraper`.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::sanitize::{normalize_entities, normalize_ws};

static INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("static selector"));

/// ASCII-only lowercase; keeps byte offsets valid against the original.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Remove all tags, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/* ---------------- Line sections ---------------- */

/// Offset just past the newline that ends the line containing `at`.
fn line_end(s: &str, at: usize) -> usize {
    match s[at..].find('\n') {
        Some(i) => at + i + 1,
        None => s.len(),
    }
}

/// From `from`, the end of the first line containing `end_marker`
/// (or the end of the text when there is none).
pub fn through_line(s: &str, from: usize, end_marker: &str) -> usize {
    let lc = to_lower(s);
    match lc.get(from..).and_then(|rest| rest.find(&to_lower(end_marker))) {
        Some(i) => line_end(s, from + i),
        None => s.len(),
    }
}

/// Byte range of the lines after the first line containing `start_marker`
/// (searched from `from`), through the first later line containing
/// `end_marker`. Runs to the end of the text when `end_marker` never shows up.
pub fn section_bounds(s: &str, start_marker: &str, end_marker: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let hit = lc.get(from..)?.find(&to_lower(start_marker))? + from;
    let start = line_end(s, hit);
    let end = through_line(s, start, end_marker);
    Some((start, end))
}

/// `section_bounds` from the top, as a slice.
pub fn section_after_line<'a>(s: &'a str, start_marker: &str, end_marker: &str) -> Option<&'a str> {
    let (a, b) = section_bounds(s, start_marker, end_marker, 0)?;
    Some(&s[a..b])
}

/* ---------------- Inputs ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Hidden,
    Text,
    Radio,
    Other,
}

impl InputKind {
    fn from_attr(t: Option<&str>) -> Self {
        // Browsers treat a missing type as text.
        let t = t.unwrap_or("text");
        if t.eq_ignore_ascii_case("hidden") { InputKind::Hidden }
        else if t.eq_ignore_ascii_case("text") { InputKind::Text }
        else if t.eq_ignore_ascii_case("radio") { InputKind::Radio }
        else { InputKind::Other }
    }
}

/// One named `<input>` as the page wrote it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Input {
    pub kind: InputKind,
    pub name: String,
    pub value: String,
    pub checked: bool,
    /// Visible text right after the tag (radio captions).
    pub label: String,
}

impl Input {
    pub fn new(kind: InputKind, name: &str, value: &str, checked: bool) -> Self {
        Self { kind, name: s!(name), value: s!(value), checked, label: s!() }
    }
}

/// End of the tag starting at `start` (just past its `>`), quote-aware.
fn tag_end(b: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut in_s = false; // '
    let mut in_d = false; // "
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return i + 1,
            _ => {}
        }
        i += 1;
    }
    b.len()
}

/// Text after a tag up to the next `<br`, `<input` or newline.
fn caption_after(s: &str, lc: &str, from: usize) -> String {
    let rest = &lc[from..];
    let stop = ["<br", "<input", "\n"]
        .iter()
        .filter_map(|p| rest.find(p))
        .min()
        .unwrap_or(rest.len());
    strip_tags(normalize_entities(&s[from..from + stop]))
}

fn parse_input_tag(tag: &str) -> Option<(InputKind, String, String, bool)> {
    let frag = Html::parse_fragment(tag);
    let el = frag.select(&INPUT_SELECTOR).next()?;
    let v = el.value();
    let name = v.attr("name")?;
    Some((
        InputKind::from_attr(v.attr("type")),
        s!(name),
        s!(v.attr("value").unwrap_or("")),
        v.attr("checked").is_some(),
    ))
}

/// Every named `<input>` in `fragment`, in document order.
pub fn inputs(fragment: &str) -> Vec<Input> {
    let lc = to_lower(fragment);
    let bytes = fragment.as_bytes();
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some(rel) = lc[pos..].find("<input") {
        let start = pos + rel;
        let after_name = start + "<input".len();
        // `<inputs>` or similar is not an input tag
        let boundary = lc.as_bytes().get(after_name).copied();
        if !matches!(boundary, Some(b' ' | b'\t' | b'\r' | b'\n' | b'/' | b'>')) {
            pos = after_name;
            continue;
        }

        let end = tag_end(bytes, start);
        if let Some((kind, name, value, checked)) = parse_input_tag(&fragment[start..end]) {
            out.push(Input { kind, name, value, checked, label: caption_after(fragment, &lc, end) });
        }
        pos = end;
    }
    out
}

pub fn hidden_fields(fragment: &str) -> impl Iterator<Item = (String, String)> {
    inputs(fragment)
        .into_iter()
        .filter(|i| i.kind == InputKind::Hidden)
        .map(|i| (i.name, i.value))
}

pub fn radios(fragment: &str) -> Vec<Input> {
    inputs(fragment).into_iter().filter(|i| i.kind == InputKind::Radio).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<h3>Method 2</h3>\n\
        <INPUT TYPE=\"hidden\" NAME=\"input\" VALUE=\"method2\">\n\
        <h3>Method 3: specific subgroup</h3>\n\
        <INPUT TYPE=\"hidden\" NAME=\"input\" VALUE=\"dosubgroup\">\n\
        <INPUT TYPE=\"hidden\" NAME=\"spacegroup\" VALUE=\"194 P6_3/mmc D6h-4\">\n\
        <h3>Method 4</h3> <INPUT TYPE=\"hidden\" NAME=\"last\" VALUE=\"x\">\n\
        <INPUT TYPE=\"hidden\" NAME=\"after\" VALUE=\"y\">\n";

    #[test]
    fn section_is_lines_after_start_through_end_line() {
        let sec = section_after_line(PAGE, "method 3", "METHOD 4").unwrap();
        assert!(sec.starts_with("<INPUT TYPE=\"hidden\" NAME=\"input\" VALUE=\"dosubgroup\">"));
        assert!(sec.contains("NAME=\"last\""));
        assert!(!sec.contains("method2"));
        assert!(!sec.contains("NAME=\"after\""));
    }

    #[test]
    fn section_without_end_marker_runs_to_the_end() {
        let sec = section_after_line(PAGE, "Method 3", "Method 9").unwrap();
        assert!(sec.ends_with("VALUE=\"y\">\n"));
        assert!(section_after_line(PAGE, "Method 7", "Method 4").is_none());
    }

    #[test]
    fn section_bounds_respects_from() {
        let (a, _) = section_bounds(PAGE, "<INPUT", "Method 4", 0).unwrap();
        let (b, _) = section_bounds(PAGE, "<INPUT", "Method 4", a).unwrap();
        assert!(b > a);
        assert!(section_bounds(PAGE, "<INPUT", "x", PAGE.len() + 1).is_none());
    }

    #[test]
    fn hidden_fields_keep_spaces_and_order() {
        let sec = section_after_line(PAGE, "Method 3", "Method 4").unwrap();
        let fields: Vec<(String, String)> = hidden_fields(sec).collect();
        assert_eq!(
            fields,
            vec![
                (s!("input"), s!("dosubgroup")),
                (s!("spacegroup"), s!("194 P6_3/mmc D6h-4")),
                (s!("last"), s!("x")),
            ]
        );
    }

    #[test]
    fn inputs_handle_case_quotes_and_entities() {
        let html = r#"<input type=text name=ampmaxdisp value='0.5'>
<INPUT TYPE="RADIO" NAME="orderparam" VALUE="P1 (a,b) &amp; more > less" CHECKED> GM1+ <i>(a)</i><br>
<input name="untyped" value="v">
<input type="submit" value="OK">
<inputs name="nope">"#;
        let got = inputs(html);
        assert_eq!(got.len(), 3);

        assert_eq!(got[0].kind, InputKind::Text);
        assert_eq!(got[0].value, "0.5");

        assert_eq!(got[1].kind, InputKind::Radio);
        assert_eq!(got[1].value, "P1 (a,b) & more > less");
        assert!(got[1].checked);
        assert_eq!(got[1].label, "GM1+ (a)");

        assert_eq!(got[2].kind, InputKind::Text);
        assert_eq!(got[2].name, "untyped");
    }

    #[test]
    fn radios_in_document_order() {
        let html = "<INPUT TYPE=\"RADIO\" NAME=\"d\" VALUE=\"1\"> first<br>\n\
                    <INPUT TYPE=\"hidden\" NAME=\"h\" VALUE=\"x\">\n\
                    <INPUT TYPE=\"RADIO\" NAME=\"d\" VALUE=\"2\"> second<br>\n";
        let r = radios(html);
        let values: Vec<&str> = r.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["1", "2"]);
        assert_eq!(r[1].label, "second");
    }

    #[test]
    fn strip_collapses_whitespace() {
        let doc = "<BODY><h1>Oops</h1> bad   input\n</BODY>";
        assert_eq!(strip_tags(doc), "Oops bad input");
    }
}
