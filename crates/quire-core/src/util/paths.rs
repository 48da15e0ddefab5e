//! Path resolution utilities.

use std::path::{Path, PathBuf};

/// Maximum number of parent directories to walk when searching for a marker.
pub const MAX_WALK_LEVELS: usize = 10;

/// Walks up the directory tree from `start` looking for a directory containing `marker`.
///
/// Returns the directory containing the marker file/directory, or None if not found
/// within [`MAX_WALK_LEVELS`] iterations.
///
/// # Example
///
/// ```no_run
/// use quire_core::util::paths::find_dir_with_marker;
///
/// // Find the site root by looking for its content directory
/// if let Some(root) = find_dir_with_marker(".", "content") {
///     println!("Site root: {:?}", root);
/// }
/// ```
pub fn find_dir_with_marker<P: AsRef<Path>>(start: P, marker: &str) -> Option<PathBuf> {
    let mut current = start.as_ref().to_path_buf();

    for _ in 0..MAX_WALK_LEVELS {
        if current.join(marker).exists() {
            return Some(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    None
}

/// Expands `~` and `$VAR` / `${VAR}` references in a configured path.
///
/// Unknown variables leave the input untouched rather than failing, so a
/// literal `$` in a directory name still resolves to something usable.
///
/// # Example
///
/// ```
/// use quire_core::util::paths::expand_path;
///
/// let expanded = expand_path("~/site/content");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(path).as_ref()),
    }
}
