//! Core traits for Quire.
//!
//! [`ConfigProvider`] abstracts where a project's content lives, so the
//! loaders and CLI handlers can be driven by any configuration source.

use std::path::PathBuf;

use crate::Result;

/// Trait for project configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use quire_core::traits::ConfigProvider;
/// use quire_core::Result;
///
/// #[derive(Clone)]
/// struct BlogConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for BlogConfig {
///     fn project_name(&self) -> &str {
///         "blog"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_dir(&self) -> Result<PathBuf> {
///         Ok(self.root.join("content"))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used in log lines and CLI output.
    fn project_name(&self) -> &str;

    /// Base path for the project.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined (e.g., the current
    /// directory is unavailable).
    fn base_path(&self) -> Result<PathBuf>;

    /// Directory holding the Markdown content files.
    fn content_dir(&self) -> Result<PathBuf>;

    /// File extension (without dot) of content files.
    fn content_extension(&self) -> &str {
        "md"
    }

    /// Whether drafts are included when listing content.
    fn include_drafts(&self) -> bool {
        false
    }
}
