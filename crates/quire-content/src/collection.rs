//! Loading every document under a content directory.
//!
//! [`ContentSet`] is ordered by file path. Sorting by date, hiding drafts,
//! and grouping by tag are offered as views; none of them change the set.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use quire_core::util::files::{find_all_files, FindOptions};
use quire_core::{Error, Result};
use serde::Serialize;

use crate::document::Document;

/// Options for [`ContentSet::load`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Extension of content files, without the dot.
    pub extension: String,
    /// Keep documents marked `draft = true`.
    pub include_drafts: bool,
    /// Record malformed documents as issues instead of failing.
    pub lenient: bool,
    /// Maximum directory depth (None = unlimited).
    pub max_depth: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            include_drafts: true,
            lenient: false,
            max_depth: None,
        }
    }
}

impl LoadOptions {
    /// Collect malformed documents as [`LoadIssue`]s.
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Drop drafts while loading.
    pub fn without_drafts(mut self) -> Self {
        self.include_drafts = false;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Kind of problem found while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Front matter could not be split or parsed.
    Malformed,
    /// Two paths produce the same id; both documents are kept.
    DuplicateId,
}

/// A problem attached to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadIssue {
    pub kind: IssueKind,
    pub path: PathBuf,
    pub message: String,
}

/// Documents loaded from one content directory, ordered by path.
#[derive(Debug, Clone, Default)]
pub struct ContentSet {
    root: PathBuf,
    documents: Vec<Document>,
    issues: Vec<LoadIssue>,
    drafts_skipped: usize,
}

impl ContentSet {
    /// Load every content file under `root`.
    ///
    /// In strict mode the first malformed document aborts the load with
    /// [`Error::MalformedDocument`]. I/O errors always abort.
    pub async fn load(root: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let root = root.as_ref();
        let mut find = FindOptions::with_extension(options.extension.as_str());
        if let Some(depth) = options.max_depth {
            find = find.with_max_depth(depth);
        }

        let files = find_all_files(root, find).await?;
        let mut set = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        for file in files {
            let doc = match Document::load(&file.path).await {
                Ok(doc) => doc,
                Err(e) if e.is_malformed() && options.lenient => {
                    log::warn!("{e}");
                    set.issues.push(LoadIssue {
                        kind: IssueKind::Malformed,
                        path: file.path,
                        message: malformed_reason(e),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            if doc.is_draft() && !options.include_drafts {
                log::debug!("Skipping draft {}", file.relative_path.display());
                set.drafts_skipped += 1;
                continue;
            }
            set.documents.push(doc);
        }

        set.check_duplicate_ids();
        log::info!(
            "Loaded {} document(s) from {} ({} issue(s), {} draft(s) skipped)",
            set.documents.len(),
            root.display(),
            set.issues.len(),
            set.drafts_skipped
        );
        Ok(set)
    }

    /// Build a set from already parsed documents.
    ///
    /// Fails with [`Error::InvalidData`] if two documents share a path.
    pub fn from_documents(root: impl Into<PathBuf>, documents: Vec<Document>) -> Result<Self> {
        let mut documents = documents;
        documents.sort_by(|a, b| a.path().cmp(b.path()));
        if let Some(pair) = documents.windows(2).find(|w| w[0].path() == w[1].path()) {
            return Err(Error::invalid_data(format!(
                "duplicate document path {}",
                pair[0].path().display()
            )));
        }

        let mut set = Self {
            root: root.into(),
            documents,
            ..Self::default()
        };
        set.check_duplicate_ids();
        Ok(set)
    }

    fn check_duplicate_ids(&mut self) {
        let mut seen: HashMap<&str, &Path> = HashMap::new();
        let mut issues = Vec::new();
        for doc in &self.documents {
            if let Some(first) = seen.insert(doc.id(), doc.path()) {
                log::warn!(
                    "Documents {} and {} share id '{}'",
                    first.display(),
                    doc.path().display(),
                    doc.id()
                );
                issues.push(LoadIssue {
                    kind: IssueKind::DuplicateId,
                    path: doc.path().to_path_buf(),
                    message: format!("id '{}' already used by {}", doc.id(), first.display()),
                });
            }
        }
        self.issues.extend(issues);
    }

    /// Directory the set was loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in path order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Problems recorded while loading.
    pub fn issues(&self) -> &[LoadIssue] {
        &self.issues
    }

    /// True when no issues were recorded.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of drafts left out by [`LoadOptions::without_drafts`].
    pub fn drafts_skipped(&self) -> usize {
        self.drafts_skipped
    }

    /// Look up a document by path, absolute or relative to [`root`](Self::root).
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Document> {
        let path = path.as_ref();
        self.documents.iter().find(|doc| {
            doc.path() == path || doc.path().strip_prefix(&self.root).is_ok_and(|rel| rel == path)
        })
    }

    /// First document (in path order) with the given id.
    pub fn get_by_id(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id() == id)
    }

    /// Look up by path first, then by id.
    pub fn find(&self, key: &str) -> Result<&Document> {
        self.get(key).or_else(|| self.get_by_id(key)).ok_or_else(|| {
            Error::not_found_msg(format!(
                "No document '{key}' under {}",
                self.root.display()
            ))
        })
    }

    /// Documents not marked as drafts.
    pub fn published(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|doc| !doc.is_draft())
    }

    /// Newest first; undated documents last; ties keep path order.
    pub fn by_date(&self) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self.documents.iter().collect();
        docs.sort_by(|a, b| match (a.date(), b.date()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        docs
    }

    /// Documents grouped by tag, each group in path order.
    pub fn tag_index(&self) -> BTreeMap<&str, Vec<&Document>> {
        let mut index: BTreeMap<&str, Vec<&Document>> = BTreeMap::new();
        for doc in &self.documents {
            for tag in &doc.meta().tags {
                index.entry(tag.as_str()).or_default().push(doc);
            }
        }
        index
    }
}

impl<'a> IntoIterator for &'a ContentSet {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn malformed_reason(err: Error) -> String {
    match err {
        Error::MalformedDocument { reason, .. } => reason,
        other => other.to_string(),
    }
}
