//! Handler functions for content CLI commands.
//!
//! `check`, `list`, `show` and `tags` load the configured content directory
//! and print to stdout. Rendering is split from printing so the output can
//! be tested.

use std::fmt::Write as _;
use std::path::Path;

use quire_content::{ContentSet, Document, IssueKind, LoadOptions};
use quire_core::traits::ConfigProvider;
use quire_core::{Error, Result};

// ============================================================================
// Option types
// ============================================================================

/// Options for `quire list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Include drafts even if the config says otherwise.
    pub drafts: bool,
    /// Newest first instead of path order.
    pub by_date: bool,
    /// Only documents with this tag.
    pub tag: Option<String>,
}

/// Options for `quire show`.
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// Document id or path relative to the content directory.
    pub key: String,
    /// Emit JSON.
    pub json: bool,
    /// Only the section under this heading.
    pub section: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Parse every document and report problems.
///
/// Fails if any document is malformed; duplicate ids are only reported.
pub async fn handle_check<C: ConfigProvider>(config: &C) -> Result<()> {
    let set = load_content(config, LoadOptions::default().lenient()).await?;
    print!("{}", render_check(&set));

    let malformed = malformed_count(&set);
    if malformed > 0 {
        return Err(Error::invalid_data(format!(
            "{malformed} malformed document(s) under {}",
            set.root().display()
        )));
    }
    Ok(())
}

/// List documents, one per line.
pub async fn handle_list<C: ConfigProvider>(config: &C, options: ListOptions) -> Result<()> {
    let mut load = LoadOptions::default();
    if !(options.drafts || config.include_drafts()) {
        load = load.without_drafts();
    }
    let set = load_content(config, load).await?;
    print!("{}", render_list(&set, &options));
    Ok(())
}

/// Print one document.
pub async fn handle_show<C: ConfigProvider>(config: &C, options: ShowOptions) -> Result<()> {
    let set = load_content(config, LoadOptions::default()).await?;
    let doc = set.find(&options.key)?;
    let out = render_show(doc, &options)?;
    print!("{out}");
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Print each tag with its document count and ids.
pub async fn handle_tags<C: ConfigProvider>(config: &C) -> Result<()> {
    let mut load = LoadOptions::default();
    if !config.include_drafts() {
        load = load.without_drafts();
    }
    let set = load_content(config, load).await?;
    print!("{}", render_tags(&set));
    Ok(())
}

async fn load_content<C: ConfigProvider>(config: &C, options: LoadOptions) -> Result<ContentSet> {
    let dir = config.content_dir()?;
    log::debug!("Loading content from {}", dir.display());
    ContentSet::load(&dir, &options.with_extension(config.content_extension())).await
}

// ============================================================================
// Rendering
// ============================================================================

fn relative<'a>(set: &ContentSet, path: &'a Path) -> &'a Path {
    path.strip_prefix(set.root()).unwrap_or(path)
}

fn render_check(set: &ContentSet) -> String {
    let mut out = String::new();
    for issue in set.issues() {
        let kind = match issue.kind {
            IssueKind::Malformed => "malformed",
            IssueKind::DuplicateId => "duplicate id",
        };
        let _ = writeln!(
            out,
            "{kind}: {}: {}",
            relative(set, &issue.path).display(),
            issue.message
        );
    }
    let _ = writeln!(
        out,
        "Checked {} document(s): {} issue(s)",
        set.len() + malformed_count(set),
        set.issues().len()
    );
    out
}

fn malformed_count(set: &ContentSet) -> usize {
    set.issues()
        .iter()
        .filter(|issue| issue.kind == IssueKind::Malformed)
        .count()
}

fn render_list(set: &ContentSet, options: &ListOptions) -> String {
    let docs: Vec<&Document> = if options.by_date {
        set.by_date()
    } else {
        set.iter().collect()
    };

    let mut out = String::new();
    for doc in docs {
        if let Some(tag) = &options.tag {
            if !doc.meta().tags.contains(tag) {
                continue;
            }
        }
        let date = doc
            .date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let draft = if doc.is_draft() { " [draft]" } else { "" };
        let _ = writeln!(
            out,
            "{date}  {}  {}{draft}",
            doc.title(),
            relative(set, doc.path()).display()
        );
    }
    out
}

fn render_show(doc: &Document, options: &ShowOptions) -> Result<String> {
    let body = match &options.section {
        Some(heading) => doc.section(heading).ok_or_else(|| {
            Error::not_found_msg(format!(
                "No section '{heading}' in {}",
                doc.path().display()
            ))
        })?,
        None => doc.body().to_string(),
    };

    if options.json {
        let value = serde_json::json!({
            "path": doc.path(),
            "id": doc.id(),
            "format": doc.format().map(|f| f.to_string()),
            "metadata": table_to_json(doc.metadata().as_table()),
            "meta": doc.meta(),
            "body": body,
        });
        return serde_json::to_string_pretty(&value)
            .map_err(|e| Error::serialization(e.to_string()));
    }

    if options.section.is_some() {
        return Ok(body);
    }
    doc.to_source()
}

fn render_tags(set: &ContentSet) -> String {
    let mut out = String::new();
    for (tag, docs) in set.tag_index() {
        let ids: Vec<&str> = docs.iter().map(|doc| doc.id()).collect();
        let _ = writeln!(out, "{tag} ({}): {}", docs.len(), ids.join(", "));
    }
    out
}

// ============================================================================
// Helper: TOML to JSON
// ============================================================================

fn table_to_json(table: &toml::Table) -> serde_json::Value {
    serde_json::Value::Object(
        table
            .iter()
            .map(|(key, value)| (key.clone(), toml_to_json(value)))
            .collect(),
    )
}

/// Convert metadata values to JSON; datetimes become their TOML text.
fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s.clone()),
        toml::Value::Integer(i) => serde_json::Value::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(*b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => serde_json::Value::Array(arr.iter().map(toml_to_json).collect()),
        toml::Value::Table(t) => table_to_json(t),
    }
}

// ============================================================================
// Tests
// ============================================================================
