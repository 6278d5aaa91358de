//! The in-memory document model.

use galaxy_shared::{BASE_WEIGHT, GraphNode};

use crate::frontmatter::FrontMatter;

/// One markdown source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Content-root-relative path, `/`-separated, extension stripped.
    pub id: String,
    /// First path segment.
    pub kind: String,
    /// Last path segment.
    pub slug: String,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Content-root-relative path with the original extension.
    pub file_path: String,
    /// Text after the front-matter block.
    pub body: String,
    /// Base weight plus one per resolved inbound link.
    pub weight: u32,
}

/// Path-derived identity of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub kind: String,
    pub slug: String,
    pub file_path: String,
}

impl Identity {
    /// Derive the identity from a content-root-relative path.
    ///
    /// Backslashes are normalized to `/` and a trailing `.{extension}` is removed.
    pub fn from_relative_path(relative: &str, extension: &str) -> Self {
        let file_path = relative.replace('\\', "/");
        let id = strip_extension(&file_path, extension).to_string();
        let kind = id.split('/').next().unwrap_or_default().to_string();
        let slug = id.rsplit('/').next().unwrap_or_default().to_string();

        Self {
            id,
            kind,
            slug,
            file_path,
        }
    }
}

/// Remove a trailing `.{extension}` from `path`, if present.
pub fn strip_extension<'a>(path: &'a str, extension: &str) -> &'a str {
    path.strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(path)
}

impl Document {
    /// Build a document from its identity, parsed metadata and body.
    ///
    /// Missing title falls back to the id; missing category to `default_category`.
    pub fn new(
        identity: Identity,
        front_matter: FrontMatter,
        body: String,
        default_category: &str,
    ) -> Self {
        let Identity {
            id,
            kind,
            slug,
            file_path,
        } = identity;

        Self {
            title: front_matter.title.unwrap_or_else(|| id.clone()),
            category: front_matter
                .category
                .unwrap_or_else(|| default_category.to_string()),
            description: front_matter.description.unwrap_or_default(),
            id,
            kind,
            slug,
            file_path,
            body,
            weight: BASE_WEIGHT,
        }
    }

    /// Project the document onto the artifact node shape.
    pub fn to_node(&self) -> GraphNode {
        GraphNode {
            id: self.id.clone(),
            slug: self.slug.clone(),
            kind: self.kind.clone(),
            name: self.title.clone(),
            category: self.category.clone(),
            val: self.weight,
            desc: self.description.clone(),
            file_path: self.file_path.clone(),
        }
    }
}
