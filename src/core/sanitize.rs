// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// The double-quoted value that follows the first (case-insensitive) `key`.
///
/// `VALUE="abc"` → `abc`. The opening quote is the first `"` after the key,
/// so `VALUE= "abc"` works too.
pub fn quoted_value_after<'a>(doc: &'a str, key: &str) -> Option<&'a str> {
    let lc = super::html::to_lower(doc);
    let at = lc.find(&super::html::to_lower(key))? + key.len();
    let open = doc[at..].find('"')? + at + 1;
    let close = doc[open..].find('"')? + open;
    Some(&doc[open..close])
}

/// Last path segment of a URL or path, without query or fragment.
pub fn file_name_of(url_or_path: &str) -> &str {
    let no_query = url_or_path.split(['?', '#']).next().unwrap_or(url_or_path);
    no_query.rsplit(['/', '\\']).next().unwrap_or(no_query)
}

/// Cut to at most `max` chars on a char boundary, marking the cut with "…".
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((ix, _)) => join_ellipsis(&s[..ix]),
        None => s!(s),
    }
}

fn join_ellipsis(s: &str) -> String {
    let mut out = s!(s.trim_end());
    out.push('…');
    out
}
