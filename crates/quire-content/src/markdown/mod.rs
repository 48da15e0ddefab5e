//! Markdown parsing and front-matter extraction utilities.
//!
//! - [`frontmatter`]: TOML/YAML front-matter splitting and parsing
//! - [`parser`]: Markdown structure parsing (headings, paragraphs, code blocks)
//! - [`helpers`]: Content extraction helpers (lists, sections)
//!
//! # Example
//!
//! ```rust
//! use quire_content::markdown::extract_frontmatter;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct PostFrontmatter {
//!     title: String,
//!     draft: Option<bool>,
//! }
//!
//! let content = "+++\ntitle = \"Hello\"\ndraft = true\n+++\n\nBody text";
//! let result = extract_frontmatter(content).unwrap();
//!
//! let fm: Option<PostFrontmatter> = result.deserialize().unwrap();
//! let fm = fm.unwrap();
//! assert_eq!(fm.title, "Hello");
//! assert_eq!(fm.draft, Some(true));
//! assert_eq!(result.body(), "\nBody text");
//! ```

pub mod frontmatter;
pub mod helpers;
pub mod parser;

// Re-export key types and functions
pub use frontmatter::{
    extract_frontmatter, split_document, strip_frontmatter, FrontmatterError, FrontmatterFormat,
    FrontmatterResult,
};
pub use helpers::{extract_section_content, normalize_id, parse_comma_list};
pub use parser::{
    extract_code_blocks, extract_first_heading, extract_first_paragraph, extract_text_content,
    CodeBlock,
};
