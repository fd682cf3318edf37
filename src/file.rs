// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::core::sanitize::file_name_of;
use crate::error::{IsoError, Result};

/// Write the final ISODISTORT response. Parent directories are created;
/// an existing file is overwritten.
pub fn write_output(path: &Path, text: &str) -> Result<PathBuf> {
    ensure_parent(path)?;
    fs::write(path, text).map_err(|e| IsoError::io(path, e))?;
    Ok(path.to_path_buf())
}

/// Write downloaded archive bytes.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    ensure_parent(path)?;
    fs::write(path, bytes).map_err(|e| IsoError::io(path, e))?;
    Ok(path.to_path_buf())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// `-o` handling: empty → `default_path`; a directory (existing, or hinted
/// by a trailing separator) → `dir/<default file name>`; anything else as is.
pub fn resolve_out_path(user_o: &str, default_path: &Path) -> Result<PathBuf> {
    if user_o.trim().is_empty() {
        return Ok(default_path.to_path_buf());
    }
    let p = PathBuf::from(normalize_separators(user_o.trim()));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?;
        let name = default_path.file_name().map(PathBuf::from).unwrap_or_default();
        Ok(p.join(name))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(IsoError::option(format!("path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir).map_err(|e| IsoError::io(dir, e))?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// Local path for an archive reference: its last path segment inside `dir`.
/// Duplicate handling **only within this run**: the second `a.zip` becomes
/// `a (2).zip`, the third `a (3).zip`, ...
pub fn archive_path(dir: &Path, reference: &str, seen_names: &mut HashMap<String, usize>) -> PathBuf {
    let name = match file_name_of(reference) {
        "" => "archive.zip",
        n => n,
    };
    let (stem, ext) = match name.rsplit_once('.') {
        Some((s, e)) if !s.is_empty() => (s, e),
        _ => (name, "zip"),
    };

    let count = seen_names.entry(s!(name)).or_insert(0);
    let filename = if *count == 0 {
        s!(name)
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };
    *count += 1;
    dir.join(filename)
}
