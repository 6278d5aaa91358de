//! Lookup tables over the loaded documents.
//!
//! Every map stores positions into the document slice it was built from.
//! On key collisions the first document in discovery order wins.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::document::Document;

/// Read-only lookups by id, title, slug and `(type, slug)`.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    by_id: HashMap<String, usize>,
    by_title: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
    by_kind_slug: HashMap<String, HashMap<String, usize>>,
}

impl DocumentIndex {
    /// Build the index once from the full document list.
    pub fn build(documents: &[Document]) -> Self {
        let mut index = Self {
            by_id: HashMap::with_capacity(documents.len()),
            by_title: HashMap::with_capacity(documents.len()),
            by_slug: HashMap::with_capacity(documents.len()),
            by_kind_slug: HashMap::new(),
        };

        for (pos, doc) in documents.iter().enumerate() {
            first_wins(&mut index.by_id, doc.id.clone(), pos, "id");
            first_wins(&mut index.by_title, doc.title.clone(), pos, "title");
            first_wins(&mut index.by_slug, doc.slug.clone(), pos, "slug");
            let in_kind = index.by_kind_slug.entry(doc.kind.clone()).or_default();
            first_wins(in_kind, doc.slug.clone(), pos, "type/slug");
        }

        index
    }

    pub fn by_id(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn by_title(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    pub fn by_slug(&self, slug: &str) -> Option<usize> {
        self.by_slug.get(slug).copied()
    }

    pub fn by_kind_and_slug(&self, kind: &str, slug: &str) -> Option<usize> {
        self.by_kind_slug.get(kind)?.get(slug).copied()
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn first_wins<K>(map: &mut HashMap<K, usize>, key: K, pos: usize, what: &str)
where
    K: std::hash::Hash + Eq + std::fmt::Debug,
{
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(pos);
        }
        Entry::Occupied(existing) => {
            debug!(
                key = ?existing.key(),
                kept = *existing.get(),
                ignored = pos,
                "{what} collision, keeping first document"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Identity;
    use crate::frontmatter::FrontMatter;

    fn doc(path: &str, title: Option<&str>) -> Document {
        Document::new(
            Identity::from_relative_path(path, "md"),
            FrontMatter {
                title: title.map(String::from),
                ..FrontMatter::default()
            },
            String::new(),
            "Uncategorized",
        )
    }

    #[test]
    fn lookups_by_every_key() {
        let docs = vec![
            doc("blog/hello.md", Some("Hello")),
            doc("portfolio/galaxy.md", Some("Galaxy")),
        ];
        let index = DocumentIndex::build(&docs);

        assert_eq!(index.len(), 2);
        assert_eq!(index.by_id("portfolio/galaxy"), Some(1));
        assert_eq!(index.by_title("Hello"), Some(0));
        assert_eq!(index.by_slug("galaxy"), Some(1));
        assert_eq!(index.by_kind_and_slug("blog", "hello"), Some(0));
        assert_eq!(index.by_kind_and_slug("portfolio", "hello"), None);
        assert_eq!(index.by_title("hello"), None);
    }

    #[test]
    fn collisions_keep_first_document() {
        let docs = vec![
            doc("blog/en/intro.md", Some("Intro")),
            doc("blog/fr/intro.md", Some("Intro")),
        ];
        let index = DocumentIndex::build(&docs);

        assert_eq!(index.by_title("Intro"), Some(0));
        assert_eq!(index.by_slug("intro"), Some(0));
        assert_eq!(index.by_kind_and_slug("blog", "intro"), Some(0));
        assert_eq!(index.by_id("blog/fr/intro"), Some(1));
    }

    #[test]
    fn untitled_document_is_indexed_by_id_as_title() {
        let docs = vec![doc("notes/raw.md", None)];
        let index = DocumentIndex::build(&docs);
        assert_eq!(index.by_title("notes/raw"), Some(0));
    }

    #[test]
    fn empty_index() {
        let index = DocumentIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.by_id("anything"), None);
    }
}
