//! Content corpus loader.
//!
//! Walks the content root in sorted order, reads every document and splits
//! off its front-matter. A missing or unreadable root aborts the load;
//! individual files that cannot be read are skipped with a warning, and
//! invalid UTF-8 is decoded lossily.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use galaxy_shared::{GalaxyError, GraphConfig, Result};

use crate::document::{Document, Identity};
use crate::frontmatter;

/// Options controlling corpus discovery.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Root directory of the corpus.
    pub root: PathBuf,
    /// Document extension without the dot.
    pub extension: String,
    /// Category for documents that declare none.
    pub default_category: String,
}

impl From<&GraphConfig> for LoadOptions {
    fn from(config: &GraphConfig) -> Self {
        Self {
            root: config.content_root.clone(),
            extension: config.extension.clone(),
            default_category: config.default_category.clone(),
        }
    }
}

/// Outcome counters of a corpus load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Documents loaded successfully.
    pub loaded: usize,
    /// Files or directories that could not be read.
    pub skipped: Vec<PathBuf>,
    /// Documents whose front-matter was unusable and fell back to defaults.
    pub front_matter_fallbacks: usize,
}

/// Documents in discovery order plus the load report.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub report: LoadReport,
}

/// Load every document under `options.root`.
#[instrument(skip_all, fields(root = %options.root.display()))]
pub fn load_corpus(options: &LoadOptions) -> Result<Corpus> {
    check_root(&options.root)?;

    let mut documents = Vec::new();
    let mut report = LoadReport::default();

    let walker = WalkDir::new(&options.root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(GalaxyError::content_root(&options.root, e.to_string()));
            }
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                warn!(path = %path.display(), error = %e, "cannot read entry, skipping");
                report.skipped.push(path);
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_extension(entry.path(), &options.extension) {
            continue;
        }

        match load_document(&options.root, entry.path(), options, &mut report) {
            Some(doc) => {
                debug!(id = %doc.id, "loaded document");
                documents.push(doc);
            }
            None => report.skipped.push(entry.path().to_path_buf()),
        }
    }

    report.loaded = documents.len();
    info!(
        documents = report.loaded,
        skipped = report.skipped.len(),
        front_matter_fallbacks = report.front_matter_fallbacks,
        "corpus loaded"
    );

    Ok(Corpus { documents, report })
}

/// Read and parse one file. Returns `None` (after logging) when it is unreadable.
fn load_document(
    root: &Path,
    path: &Path,
    options: &LoadOptions,
    report: &mut LoadReport,
) -> Option<Document> {
    let relative = match path.strip_prefix(root) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "path outside content root, skipping");
            return None;
        }
    };

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read document, skipping");
            return None;
        }
    };
    let content = String::from_utf8_lossy(&bytes);
    if let std::borrow::Cow::Owned(_) = content {
        warn!(path = %relative, "invalid UTF-8 replaced with U+FFFD");
    }

    let split = frontmatter::split(&content);
    if let Some(e) = &split.error {
        warn!(path = %relative, error = %e, "unusable front-matter, using defaults");
        report.front_matter_fallbacks += 1;
    }

    let identity = Identity::from_relative_path(&relative, &options.extension);
    Some(Document::new(
        identity,
        split.front_matter,
        split.body.to_string(),
        &options.default_category,
    ))
}

fn check_root(root: &Path) -> Result<()> {
    let meta = std::fs::metadata(root)
        .map_err(|e| GalaxyError::content_root(root, e.to_string()))?;
    if !meta.is_dir() {
        return Err(GalaxyError::content_root(root, "not a directory"));
    }
    std::fs::read_dir(root).map_err(|e| GalaxyError::content_root(root, e.to_string()))?;
    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
