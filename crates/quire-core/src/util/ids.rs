//! Document id helpers.
//!
//! A document's id is the slug form of its file stem. Ids are a convenience
//! for lookups; the file path stays the document's identity.

use std::path::Path;

/// Normalize a string into a lowercase, dash-separated slug.
///
/// Runs of non-alphanumeric characters collapse into a single `-`, and
/// leading/trailing dashes are removed.
///
/// ```
/// use quire_core::normalize_id;
///
/// assert_eq!(normalize_id("Embedded Firmware: Tips!"), "embedded-firmware-tips");
/// assert_eq!(normalize_id("already-a-slug"), "already-a-slug");
/// ```
pub fn normalize_id(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Derive a document id from its path's file stem.
///
/// Returns `None` when the path has no usable stem. An `index`/`_index`
/// stem takes the name of its parent directory, so `posts/_index.md`
/// becomes `posts`.
pub fn id_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let stem = if stem == "index" || stem == "_index" {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(stem)
    } else {
        stem
    };

    let id = normalize_id(stem);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
