//! Front-matter splitting, metadata records, and Markdown helpers.
//!
//! This crate turns content files into `(metadata, body)` pairs for an
//! external renderer.
//!
//! # Modules
//!
//! - [`markdown`]: Front-matter extraction and Markdown structure helpers
//! - [`metadata`]: The metadata record and its typed view
//! - [`document`]: A single parsed content file
//! - [`collection`]: Every document under a content directory

#![doc = include_str!("../README.md")]

pub mod collection;
pub mod document;
pub mod markdown;
pub mod metadata;

pub use collection::{ContentSet, IssueKind, LoadIssue, LoadOptions};
pub use document::Document;
pub use markdown::{extract_frontmatter, split_document, FrontmatterFormat, FrontmatterResult};
pub use metadata::{Metadata, PageMeta};
