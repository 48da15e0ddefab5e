//! Metadata records parsed from front matter.
//!
//! [`Metadata`] keeps every key the author wrote, in the TOML value model.
//! [`PageMeta`] is the validated view over the keys Quire recognizes:
//!
//! | Key | Type | Default |
//! |-----|------|---------|
//! | `title` | string | none |
//! | `date` | TOML date or `YYYY-MM-DD` string | none |
//! | `draft` | bool | `false` |
//! | `extra.tags`, `taxonomies.tags`, `tags` | array of strings or comma list | empty |
//! | `extra.toc` | bool | `false` |
//! | `extra.comments` / `extra.disable_comments` | bool | comments on |

use std::collections::BTreeSet;

use chrono::NaiveDate;
use quire_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::markdown::helpers::parse_comma_list;

/// Keys that may hold a document's tags, merged in this order.
const TAG_PATHS: [&str; 3] = ["extra.tags", "taxonomies.tags", "tags"];

/// Key/value metadata from a document's front matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    table: toml::Table,
}

impl Metadata {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already parsed TOML table.
    pub fn from_table(table: toml::Table) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn as_table(&self) -> &toml::Table {
        &self.table
    }

    /// Consume the record, returning the table.
    pub fn into_table(self) -> toml::Table {
        self.table
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Top-level keys, in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.table.get(key)
    }

    /// Look up a dotted key path such as `extra.toc`.
    pub fn get_path(&self, path: &str) -> Option<&toml::Value> {
        let mut parts = path.split('.');
        let mut current = self.table.get(parts.next()?)?;
        for part in parts {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }

    /// Set a top-level key, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<toml::Value>,
    ) -> Option<toml::Value> {
        self.table.insert(key.into(), value.into())
    }

    /// Deserialize the whole record into a domain type.
    pub fn deserialize<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        toml::Value::Table(self.table.clone())
            .try_into()
            .map_err(|e: toml::de::Error| Error::invalid_data(e.message().to_string()))
    }

    /// Render the record as a TOML document (no delimiters).
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&self.table).map_err(|e| Error::serialization(e.to_string()))
    }

    // ------------------------------------------------------------------------
    // Recognized keys
    // ------------------------------------------------------------------------

    /// `title`, if present.
    pub fn title(&self) -> Result<Option<&str>> {
        match self.get("title") {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(type_mismatch("title", "a string", other)),
        }
    }

    /// `date`, as a calendar date.
    ///
    /// Accepts TOML dates and date-times (the time part is dropped) and
    /// strings in `YYYY-MM-DD` or RFC 3339 form.
    pub fn date(&self) -> Result<Option<NaiveDate>> {
        match self.get("date") {
            None => Ok(None),
            Some(toml::Value::Datetime(dt)) => {
                let date = dt.date.ok_or_else(|| {
                    Error::invalid_data(format!("`date` has no calendar date: {dt}"))
                })?;
                NaiveDate::from_ymd_opt(
                    i32::from(date.year),
                    u32::from(date.month),
                    u32::from(date.day),
                )
                .map(Some)
                .ok_or_else(|| Error::invalid_data(format!("`date` is out of range: {dt}")))
            }
            Some(toml::Value::String(s)) => parse_date_str(s).map(Some),
            Some(other) => Err(type_mismatch("date", "a date", other)),
        }
    }

    /// `draft`, defaulting to false.
    pub fn draft(&self) -> Result<bool> {
        self.bool_at("draft").map(|v| v.unwrap_or(false))
    }

    /// Union of every tag list the document declares.
    pub fn tags(&self) -> Result<BTreeSet<String>> {
        let mut tags = BTreeSet::new();
        for path in TAG_PATHS {
            match self.get_path(path) {
                None => {}
                Some(toml::Value::Array(items)) => {
                    for item in items {
                        let tag = item
                            .as_str()
                            .ok_or_else(|| type_mismatch(path, "an array of strings", item))?;
                        let tag = tag.trim();
                        if !tag.is_empty() {
                            tags.insert(tag.to_string());
                        }
                    }
                }
                Some(toml::Value::String(list)) => tags.extend(parse_comma_list(list)),
                Some(other) => return Err(type_mismatch(path, "an array of strings", other)),
            }
        }
        Ok(tags)
    }

    /// Whether a table of contents is requested (`extra.toc`, then `toc`).
    pub fn toc(&self) -> Result<bool> {
        match self.bool_at("extra.toc")? {
            Some(v) => Ok(v),
            None => self.bool_at("toc").map(|v| v.unwrap_or(false)),
        }
    }

    /// Whether comments are enabled.
    ///
    /// `extra.comments` wins when present; otherwise `extra.disable_comments`
    /// is negated; otherwise comments are on.
    pub fn comments_enabled(&self) -> Result<bool> {
        if let Some(v) = self.bool_at("extra.comments")? {
            return Ok(v);
        }
        Ok(!self.bool_at("extra.disable_comments")?.unwrap_or(false))
    }

    /// Validate the recognized keys into a [`PageMeta`].
    pub fn page_meta(&self) -> Result<PageMeta> {
        Ok(PageMeta {
            title: self.title()?.map(String::from),
            date: self.date()?,
            draft: self.draft()?,
            tags: self.tags()?,
            toc: self.toc()?,
            comments: self.comments_enabled()?,
        })
    }

    fn bool_at(&self, path: &str) -> Result<Option<bool>> {
        match self.get_path(path) {
            None => Ok(None),
            Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(type_mismatch(path, "a boolean", other)),
        }
    }
}

impl From<toml::Table> for Metadata {
    fn from(table: toml::Table) -> Self {
        Self::from_table(table)
    }
}

/// Typed view of the recognized metadata keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub draft: bool,
    pub tags: BTreeSet<String>,
    pub toc: bool,
    pub comments: bool,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            draft: false,
            tags: BTreeSet::new(),
            toc: false,
            comments: true,
        }
    }
}

fn parse_date_str(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| Error::invalid_data(format!("`date` is not a date: {s:?}")))
}

fn type_mismatch(key: &str, expected: &str, found: &toml::Value) -> Error {
    Error::invalid_data(format!(
        "`{key}` must be {expected}, found {}",
        found.type_str()
    ))
}
