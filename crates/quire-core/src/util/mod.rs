//! Utility modules for file operations, path handling, and ids.
//!
//! # Modules
//!
//! - [`files`]: Async content file discovery and reading
//! - [`ids`]: Slug helpers for document ids
//! - [`paths`]: Path expansion and marker search

pub mod files;
pub mod ids;
pub mod paths;
