// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File helpers for the JSON-backed store.

use std::path::Path;

/// Parse content as JSON5, falling back to strict JSON on parse failure.
///
/// JSON5 lets hand-edited option files carry comments and trailing commas.
pub fn parse_json5_or_json<T: serde::de::DeserializeOwned>(
    content: &str,
) -> Result<T, serde_json::Error> {
    json5::from_str(content).or_else(|_| serde_json::from_str(content))
}

/// Ensure a file's parent directory exists, creating it and ancestors if needed.
pub fn ensure_parent_exists(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write `content` next to `path` and rename it into place.
pub fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    ensure_parent_exists(path)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
#[path = "io_tests.rs"]
mod tests;
