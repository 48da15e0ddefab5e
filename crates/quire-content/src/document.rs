//! A parsed content file.
//!
//! A [`Document`] is identified by its file path and pairs the metadata
//! record with the untouched Markdown body. Nothing here mutates a document
//! once parsed; [`Document::to_source`] writes a fresh copy instead.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use quire_core::util::files::read_file;
use quire_core::{id_from_path, Error, Result};

use crate::markdown::{
    extract_code_blocks, extract_first_heading, extract_first_paragraph,
    extract_section_content, split_document, CodeBlock, FrontmatterFormat,
};
use crate::metadata::{Metadata, PageMeta};

/// One content file: path, metadata, and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: PathBuf,
    id: String,
    format: Option<FrontmatterFormat>,
    metadata: Metadata,
    meta: PageMeta,
    body: String,
}

impl Document {
    /// Parse `raw` as the contents of the file at `path`.
    ///
    /// Fails with [`Error::MalformedDocument`] when the front matter is
    /// unterminated, does not parse, or a recognized key has the wrong type.
    ///
    /// ```
    /// use quire_content::Document;
    ///
    /// let doc = Document::parse("about.md", "+++\ntitle = \"X\"\n+++\nBody text").unwrap();
    /// assert_eq!(doc.metadata().title().unwrap(), Some("X"));
    /// assert_eq!(doc.body(), "Body text");
    /// ```
    pub fn parse(path: impl AsRef<Path>, raw: &str) -> Result<Self> {
        let path = path.as_ref();
        let (metadata, split) = split_document(path, raw)?;
        let meta = metadata
            .page_meta()
            .map_err(|e| Error::malformed(path, invalid_reason(e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            id: document_id(path),
            format: split.format(),
            metadata,
            meta,
            body: split.body().to_string(),
        })
    }

    /// Read and parse the file at `path`.
    ///
    /// A file that is not valid UTF-8 is a [`Error::MalformedDocument`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = read_file(path).await.map_err(|e| match e {
            Error::IoWithPath { source, path } if source.kind() == ErrorKind::InvalidData => {
                Error::malformed(path, "not valid UTF-8")
            }
            other => other,
        })?;
        let doc = Self::parse(path, &raw)?;
        log::debug!(
            "Parsed {} ({} metadata key(s), {} body bytes)",
            path.display(),
            doc.metadata.len(),
            doc.body.len()
        );
        Ok(doc)
    }

    /// File path; the document's identity.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Slug derived from the file name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Front-matter format the file used, if it had a block.
    pub fn format(&self) -> Option<FrontmatterFormat> {
        self.format
    }

    /// Raw metadata record, unknown keys included.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Validated recognized keys.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Markdown body, exactly as written after the front matter.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.meta.date
    }

    pub fn is_draft(&self) -> bool {
        self.meta.draft
    }

    /// Display title: `title` metadata, else the first heading, else the id.
    pub fn title(&self) -> String {
        self.meta
            .title
            .clone()
            .or_else(|| extract_first_heading(&self.body))
            .unwrap_or_else(|| self.id.clone())
    }

    /// Plain text of the body's first paragraph.
    pub fn summary(&self) -> Option<String> {
        extract_first_paragraph(&self.body)
    }

    /// Code blocks quoted in the body, verbatim.
    pub fn code_blocks(&self) -> Vec<CodeBlock> {
        extract_code_blocks(&self.body)
    }

    /// Body text of the section under `heading`.
    pub fn section(&self, heading: &str) -> Option<String> {
        extract_section_content(&self.body, heading)
    }

    /// Re-join metadata and body into file contents.
    ///
    /// Metadata is written as TOML between `+++` lines. A document that had
    /// no front matter and still has none is returned as its bare body.
    pub fn to_source(&self) -> Result<String> {
        if self.format.is_none() && self.metadata.is_empty() {
            return Ok(self.body.clone());
        }
        let block = self.metadata.to_toml_string()?;
        let delimiter = FrontmatterFormat::Toml.delimiter();
        let mut out = String::with_capacity(block.len() + self.body.len() + 8);
        out.push_str(delimiter);
        out.push('\n');
        out.push_str(&block);
        if !block.is_empty() && !block.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(delimiter);
        out.push('\n');
        out.push_str(&self.body);
        Ok(out)
    }

    /// Hand the `(metadata, body)` pair to a renderer.
    pub fn into_parts(self) -> (Metadata, String) {
        (self.metadata, self.body)
    }
}

/// Slug from the path, else the raw file stem, else the whole path.
fn document_id(path: &Path) -> String {
    id_from_path(path)
        .or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .filter(|stem| !stem.is_empty())
        })
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn invalid_reason(err: Error) -> String {
    match err {
        Error::InvalidData(msg) => msg,
        other => other.to_string(),
    }
}
