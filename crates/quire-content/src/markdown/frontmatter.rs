//! Front-matter extraction.
//!
//! A content file may open with a metadata block fenced by a delimiter line:
//! `+++` for TOML, `---` for YAML. Everything after the closing delimiter's
//! line break is the body and is returned untouched.
//!
//! Splitting ([`extract_frontmatter`]) and parsing
//! ([`FrontmatterResult::metadata`]) are separate steps so callers that only
//! need the body never pay for parsing.

use std::path::Path;

use thiserror::Error;

use crate::metadata::Metadata;

const BOM: char = '\u{feff}';

/// Serialization format of a front-matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontmatterFormat {
    /// `+++` fenced TOML.
    Toml,
    /// `---` fenced YAML.
    Yaml,
}

impl FrontmatterFormat {
    /// The delimiter line for this format.
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Toml => "+++",
            Self::Yaml => "---",
        }
    }

    fn from_line(line: &str) -> Option<Self> {
        match line.trim_end() {
            "+++" => Some(Self::Toml),
            "---" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl std::fmt::Display for FrontmatterFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}

/// Why a front-matter block could not be split or parsed.
///
/// These carry no path; [`split_document`] attaches one when turning them
/// into [`quire_core::Error::MalformedDocument`].
#[derive(Debug, Error, PartialEq)]
pub enum FrontmatterError {
    /// Opening delimiter without a matching closing line.
    #[error("unterminated {format} front matter: no closing `{}` line", format.delimiter())]
    Unterminated {
        /// Format announced by the opening delimiter.
        format: FrontmatterFormat,
    },

    /// The block's contents are not valid for its format.
    #[error("invalid {format} front matter: {message}")]
    Parse {
        /// Format of the block.
        format: FrontmatterFormat,
        /// Parser message.
        message: String,
    },

    /// The block parsed but is not a key/value mapping.
    #[error("{format} front matter must be a table of keys, found {found}")]
    NotATable {
        /// Format of the block.
        format: FrontmatterFormat,
        /// What was found instead.
        found: &'static str,
    },
}

/// Result of splitting a document into front matter and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterResult<'a> {
    format: Option<FrontmatterFormat>,
    raw: Option<&'a str>,
    body: &'a str,
}

impl<'a> FrontmatterResult<'a> {
    /// Format of the block, or `None` if the document has no front matter.
    pub fn format(&self) -> Option<FrontmatterFormat> {
        self.format
    }

    /// Raw block text between the delimiters.
    pub fn raw(&self) -> Option<&'a str> {
        self.raw
    }

    /// Body text after the block.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Whether a front-matter block was present.
    pub fn has_frontmatter(&self) -> bool {
        self.format.is_some()
    }

    /// Parse the block into a metadata record.
    ///
    /// A document without front matter yields an empty record.
    pub fn metadata(&self) -> Result<Metadata, FrontmatterError> {
        match (self.format, self.raw) {
            (Some(FrontmatterFormat::Toml), Some(raw)) => parse_toml(raw),
            (Some(FrontmatterFormat::Yaml), Some(raw)) => parse_yaml(raw),
            _ => Ok(Metadata::new()),
        }
    }

    /// Parse and deserialize the block into a domain type.
    ///
    /// Returns `Ok(None)` when the document has no front matter.
    pub fn deserialize<T>(&self) -> quire_core::Result<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        if !self.has_frontmatter() {
            return Ok(None);
        }
        let metadata = self
            .metadata()
            .map_err(|e| quire_core::Error::invalid_data(e.to_string()))?;
        metadata.deserialize().map(Some)
    }
}

/// Split `content` into its front-matter block and body.
///
/// - No opening delimiter on the first line: no front matter, the body is the
///   entire input.
/// - Opening delimiter with no closing line: [`FrontmatterError::Unterminated`].
///
/// Exactly one line break after the closing delimiter is consumed.
///
/// ```
/// use quire_content::markdown::extract_frontmatter;
///
/// let split = extract_frontmatter("+++\ntitle = \"X\"\n+++\nBody text").unwrap();
/// assert_eq!(split.raw(), Some("title = \"X\"\n"));
/// assert_eq!(split.body(), "Body text");
///
/// let plain = extract_frontmatter("Just a body.").unwrap();
/// assert!(!plain.has_frontmatter());
/// assert_eq!(plain.body(), "Just a body.");
/// ```
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterResult<'_>, FrontmatterError> {
    let text = content.strip_prefix(BOM).unwrap_or(content);

    let (first_line, rest) = match text.split_once('\n') {
        Some((line, rest)) => (line, Some(rest)),
        None => (text, None),
    };

    let Some(format) = FrontmatterFormat::from_line(first_line) else {
        return Ok(FrontmatterResult {
            format: None,
            raw: None,
            body: content,
        });
    };

    let rest = rest.ok_or(FrontmatterError::Unterminated { format })?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let bare = line.strip_suffix('\n').unwrap_or(line);
        let bare = bare.strip_suffix('\r').unwrap_or(bare);
        if bare.trim_end() == format.delimiter() {
            return Ok(FrontmatterResult {
                format: Some(format),
                raw: Some(&rest[..offset]),
                body: &rest[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated { format })
}

/// Return only the body of `content`.
///
/// Falls back to the whole input when the front matter is unterminated,
/// which suits previews and search snippets; use [`split_document`] when
/// malformed documents must be rejected.
pub fn strip_frontmatter(content: &str) -> &str {
    extract_frontmatter(content)
        .map(|split| split.body())
        .unwrap_or(content)
}

/// Split and parse a document, naming `path` in any error.
///
/// This is the splitter contract: a missing block yields empty metadata and
/// the original text; an unterminated or unparsable block yields
/// [`quire_core::Error::MalformedDocument`].
pub fn split_document<'a>(
    path: &Path,
    content: &'a str,
) -> quire_core::Result<(Metadata, FrontmatterResult<'a>)> {
    let split =
        extract_frontmatter(content).map_err(|e| quire_core::Error::malformed(path, e.to_string()))?;
    let metadata = split
        .metadata()
        .map_err(|e| quire_core::Error::malformed(path, e.to_string()))?;
    Ok((metadata, split))
}

fn parse_toml(raw: &str) -> Result<Metadata, FrontmatterError> {
    toml::from_str::<toml::Table>(raw)
        .map(Metadata::from_table)
        .map_err(|e| FrontmatterError::Parse {
            format: FrontmatterFormat::Toml,
            message: e.message().to_string(),
        })
}

fn parse_yaml(raw: &str) -> Result<Metadata, FrontmatterError> {
    let value: yaml_serde::Value =
        yaml_serde::from_str(raw).map_err(|e| FrontmatterError::Parse {
            format: FrontmatterFormat::Yaml,
            message: e.to_string(),
        })?;

    match yaml_to_toml(value)? {
        None => Ok(Metadata::new()),
        Some(toml::Value::Table(table)) => Ok(Metadata::from_table(table)),
        Some(other) => Err(FrontmatterError::NotATable {
            format: FrontmatterFormat::Yaml,
            found: other.type_str(),
        }),
    }
}

/// Convert a YAML value into the TOML value model. Nulls are dropped.
fn yaml_to_toml(value: yaml_serde::Value) -> Result<Option<toml::Value>, FrontmatterError> {
    use yaml_serde::Value as Y;

    let converted = match value {
        Y::Null => return Ok(None),
        Y::Bool(b) => toml::Value::Boolean(b),
        Y::Number(n) => {
            if let Some(i) = n.as_i64() {
                toml::Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                toml::Value::Float(f)
            } else {
                return Err(yaml_error(format!("unrepresentable number {n}")));
            }
        }
        Y::String(s) => toml::Value::String(s),
        Y::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for item in seq {
                if let Some(v) = yaml_to_toml(item)? {
                    items.push(v);
                }
            }
            toml::Value::Array(items)
        }
        Y::Mapping(map) => {
            let mut table = toml::Table::new();
            for (key, val) in map {
                let key = match key {
                    Y::String(s) => s,
                    Y::Bool(b) => b.to_string(),
                    Y::Number(n) => n.to_string(),
                    _ => return Err(yaml_error("mapping keys must be scalars")),
                };
                if let Some(v) = yaml_to_toml(val)? {
                    table.insert(key, v);
                }
            }
            toml::Value::Table(table)
        }
        Y::Tagged(tagged) => return yaml_to_toml(tagged.value),
    };

    Ok(Some(converted))
}

fn yaml_error(message: impl Into<String>) -> FrontmatterError {
    FrontmatterError::Parse {
        format: FrontmatterFormat::Yaml,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Splitting
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_toml_block() {
        let split = extract_frontmatter("+++\ntitle = \"X\"\n+++\nBody text").unwrap();
        assert_eq!(split.format(), Some(FrontmatterFormat::Toml));
        assert_eq!(split.raw(), Some("title = \"X\"\n"));
        assert_eq!(split.body(), "Body text");
    }

    #[test]
    fn test_extract_yaml_block() {
        let split = extract_frontmatter("---\ntitle: X\n---\n\nBody").unwrap();
        assert_eq!(split.format(), Some(FrontmatterFormat::Yaml));
        assert_eq!(split.raw(), Some("title: X\n"));
        assert_eq!(split.body(), "\nBody");
    }

    #[test]
    fn test_extract_no_frontmatter() {
        let split = extract_frontmatter("Just a body.").unwrap();
        assert!(!split.has_frontmatter());
        assert_eq!(split.raw(), None);
        assert_eq!(split.body(), "Just a body.");
    }

    #[test]
    fn test_extract_no_frontmatter_keeps_everything() {
        let text = "# Heading\n\n+++\nnot front matter\n+++\n";
        let split = extract_frontmatter(text).unwrap();
        assert!(!split.has_frontmatter());
        assert_eq!(split.body(), text);
    }

    #[test]
    fn test_extract_empty_input() {
        let split = extract_frontmatter("").unwrap();
        assert!(!split.has_frontmatter());
        assert_eq!(split.body(), "");
    }

    #[test]
    fn test_extract_unterminated() {
        let err = extract_frontmatter("+++\ntitle = \"X\"\nBody text").unwrap_err();
        assert_eq!(
            err,
            FrontmatterError::Unterminated {
                format: FrontmatterFormat::Toml
            }
        );
    }

    #[test]
    fn test_extract_delimiter_only() {
        assert!(extract_frontmatter("+++").is_err());
        assert!(extract_frontmatter("---\n").is_err());
    }

    #[test]
    fn test_extract_mismatched_delimiters() {
        let err = extract_frontmatter("+++\ntitle = \"X\"\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated { .. }));
    }

    #[test]
    fn test_extract_empty_block() {
        let split = extract_frontmatter("+++\n+++\nBody").unwrap();
        assert_eq!(split.raw(), Some(""));
        assert_eq!(split.body(), "Body");
        assert!(split.metadata().unwrap().is_empty());
    }

    #[test]
    fn test_extract_crlf_and_trailing_whitespace() {
        let split = extract_frontmatter("+++  \r\ntitle = \"X\"\r\n+++ \r\nBody\r\n").unwrap();
        assert_eq!(split.raw(), Some("title = \"X\"\r\n"));
        assert_eq!(split.body(), "Body\r\n");
        assert_eq!(split.metadata().unwrap().title().unwrap(), Some("X"));
    }

    #[test]
    fn test_extract_skips_bom() {
        let split = extract_frontmatter("\u{feff}+++\ntitle = \"X\"\n+++\nBody").unwrap();
        assert!(split.has_frontmatter());
        assert_eq!(split.body(), "Body");
    }

    #[test]
    fn test_extract_closing_at_eof() {
        let split = extract_frontmatter("+++\ntitle = \"X\"\n+++").unwrap();
        assert_eq!(split.body(), "");
    }

    #[test]
    fn test_body_with_delimiter_lines_untouched() {
        let text = "+++\ntitle = \"X\"\n+++\nintro\n\n+++\nstill body\n";
        let split = extract_frontmatter(text).unwrap();
        assert_eq!(split.body(), "intro\n\n+++\nstill body\n");
    }

    #[test]
    fn test_strip_frontmatter() {
        assert_eq!(strip_frontmatter("+++\na = 1\n+++\nBody"), "Body");
        assert_eq!(strip_frontmatter("No block"), "No block");
        assert_eq!(strip_frontmatter("+++\nunterminated"), "+++\nunterminated");
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_toml_nested() {
        let text = "+++\ntitle = \"Tips\"\ndate = 2024-03-01\ndraft = true\n\n[extra]\ntags = [\"rust\", \"embedded\"]\ntoc = true\n+++\nBody";
        let metadata = extract_frontmatter(text).unwrap().metadata().unwrap();
        assert_eq!(metadata.title().unwrap(), Some("Tips"));
        assert!(metadata.draft().unwrap());
        assert!(metadata.toc().unwrap());
        assert_eq!(metadata.tags().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_toml_invalid() {
        let err = extract_frontmatter("+++\ntitle = \n+++\nBody")
            .unwrap()
            .metadata()
            .unwrap_err();
        assert!(matches!(
            err,
            FrontmatterError::Parse {
                format: FrontmatterFormat::Toml,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_yaml() {
        let text = "---\ntitle: Hello\ndate: 2024-03-01\ntags:\n  - a\n  - b\nsubtitle: ~\n---\nBody";
        let metadata = extract_frontmatter(text).unwrap().metadata().unwrap();
        assert_eq!(metadata.title().unwrap(), Some("Hello"));
        assert_eq!(
            metadata.date().unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(metadata.tags().unwrap().len(), 2);
        assert!(metadata.get("subtitle").is_none());
    }

    #[test]
    fn test_parse_yaml_empty_block() {
        let metadata = extract_frontmatter("---\n---\nBody")
            .unwrap()
            .metadata()
            .unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_parse_yaml_not_a_table() {
        let err = extract_frontmatter("---\n- a\n- b\n---\nBody")
            .unwrap()
            .metadata()
            .unwrap_err();
        assert_eq!(
            err,
            FrontmatterError::NotATable {
                format: FrontmatterFormat::Yaml,
                found: "array"
            }
        );
    }

    #[test]
    fn test_parse_yaml_invalid() {
        let err = extract_frontmatter("---\ntitle: [unclosed\n---\nBody")
            .unwrap()
            .metadata()
            .unwrap_err();
        assert!(matches!(
            err,
            FrontmatterError::Parse {
                format: FrontmatterFormat::Yaml,
                ..
            }
        ));
    }

    #[test]
    fn test_deserialize_domain_type() {
        #[derive(serde::Deserialize)]
        struct Fm {
            title: String,
            weight: Option<i64>,
        }

        let split = extract_frontmatter("+++\ntitle = \"Hello\"\nweight = 3\n+++\n").unwrap();
        let fm: Fm = split.deserialize().unwrap().unwrap();
        assert_eq!(fm.title, "Hello");
        assert_eq!(fm.weight, Some(3));

        let none: Option<Fm> = extract_frontmatter("body").unwrap().deserialize().unwrap();
        assert!(none.is_none());
    }

    // ------------------------------------------------------------------------
    // split_document
    // ------------------------------------------------------------------------

    #[test]
    fn test_split_document_example() {
        let (metadata, split) =
            split_document(Path::new("x.md"), "+++\ntitle = \"X\"\n+++\nBody text").unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.title().unwrap(), Some("X"));
        assert_eq!(split.body(), "Body text");
    }

    #[test]
    fn test_split_document_no_block() {
        let (metadata, split) = split_document(Path::new("x.md"), "Just a body.").unwrap();
        assert!(metadata.is_empty());
        assert_eq!(split.body(), "Just a body.");
    }

    #[test]
    fn test_split_document_unterminated_names_path() {
        let err = split_document(Path::new("posts/broken.md"), "+++\ntitle = \"X\"\n").unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.path(), Some(Path::new("posts/broken.md")));
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_split_document_bad_toml_names_path() {
        let err = split_document(Path::new("about.md"), "+++\n= nope\n+++\n").unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("about.md"));
    }
}
