//! Cross-reference resolution.
//!
//! Maps one [`Reference`] found in a document to at most one target document,
//! using the [`DocumentIndex`] lookups:
//! - bracketed titles try title, then id, then slug
//! - `./` and `../` paths are joined with the referring document's directory
//!   and looked up by id
//! - `/type/.../slug` paths are looked up by `(type, slug)`
//! - anything else (URLs, bare paths, anchors) never resolves
//!
//! A miss is an expected outcome, never an error.

use galaxy_content::{Document, DocumentIndex, strip_extension};
use galaxy_markdown::{PathRef, Reference, classify_path};

/// Outcome of resolving one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Position of the target document.
    Resolved(usize),
    /// Well-formed reference with no matching document.
    Unresolved,
    /// The reference points back at the referring document.
    SelfReference,
    /// External URL or an addressing form that is never resolved.
    Unsupported,
}

/// Resolves references against a fixed document set.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    documents: &'a [Document],
    index: &'a DocumentIndex,
    extension: &'a str,
}

impl<'a> Resolver<'a> {
    /// `index` must have been built from `documents`.
    pub fn new(documents: &'a [Document], index: &'a DocumentIndex, extension: &'a str) -> Self {
        Self {
            documents,
            index,
            extension,
        }
    }

    /// Resolve `reference` found in the document at position `source`.
    pub fn resolve(&self, source: usize, reference: Reference<'_>) -> Resolution {
        let target = match reference {
            Reference::Title(title) => self.by_title(title),
            Reference::Path(dest) => match classify_path(dest) {
                PathRef::Relative(path) => self.by_relative_path(&self.documents[source], path),
                PathRef::RootAbsolute(path) => self.by_root_path(path),
                PathRef::External(_) | PathRef::Unsupported(_) => {
                    return Resolution::Unsupported;
                }
            },
        };

        match target {
            None => Resolution::Unresolved,
            Some(pos) if self.documents[pos].id == self.documents[source].id => {
                Resolution::SelfReference
            }
            Some(pos) => Resolution::Resolved(pos),
        }
    }

    fn by_title(&self, title: &str) -> Option<usize> {
        self.index
            .by_title(title)
            .or_else(|| self.index.by_id(title))
            .or_else(|| self.index.by_slug(title))
    }

    fn by_relative_path(&self, from: &Document, path: &str) -> Option<usize> {
        let joined = join_relative(&from.file_path, path)?;
        self.index.by_id(strip_extension(&joined, self.extension))
    }

    fn by_root_path(&self, path: &str) -> Option<usize> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (kind, last) = match parts.as_slice() {
            [kind, .., last] => (*kind, *last),
            _ => return None,
        };
        self.index
            .by_kind_and_slug(kind, strip_extension(last, self.extension))
    }
}

/// Join `path` onto the directory of `from_file` and normalize `.` and `..`.
///
/// Returns `None` when the result would climb above the content root.
fn join_relative(from_file: &str, path: &str) -> Option<String> {
    let mut segments: Vec<&str> = from_file.split('/').collect();
    segments.pop();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_content::{FrontMatter, Identity};

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

    fn corpus() -> Vec<Document> {
        vec![
            doc("blog/en/foo.md", Some("Foo")),
            doc("blog/bar/baz.md", Some("Baz Post")),
            doc("bar/baz.md", Some("Top Baz")),
            doc("portfolio/my-project.md", Some("My Project")),
            doc("portfolio/archive/my-project.md", Some("Old Project")),
            doc("notes/slugged.md", Some("Different Title")),
        ]
    }

    fn resolve(docs: &[Document], source: usize, reference: Reference<'_>) -> Resolution {
        let index = DocumentIndex::build(docs);
        Resolver::new(docs, &index, "md").resolve(source, reference)
    }

    #[test]
    fn title_lookup_order_is_title_then_id_then_slug() {
        let docs = corpus();
        assert_eq!(resolve(&docs, 0, Reference::Title("Baz Post")), Resolution::Resolved(1));
        assert_eq!(resolve(&docs, 0, Reference::Title("bar/baz")), Resolution::Resolved(2));
        assert_eq!(resolve(&docs, 0, Reference::Title("slugged")), Resolution::Resolved(5));
        assert_eq!(resolve(&docs, 0, Reference::Title("Nowhere")), Resolution::Unresolved);
    }

    #[test]
    fn title_match_beats_slug_of_earlier_document() {
        let docs = vec![
            doc("blog/alpha.md", Some("First")),
            doc("blog/second.md", Some("alpha")),
            doc("blog/source.md", None),
        ];
        assert_eq!(resolve(&docs, 2, Reference::Title("alpha")), Resolution::Resolved(1));
    }

    #[test]
    fn relative_path_from_nested_document() {
        let docs = corpus();
        assert_eq!(
            resolve(&docs, 0, Reference::Path("../bar/baz.md")),
            Resolution::Resolved(1)
        );
        assert_eq!(
            resolve(&docs, 0, Reference::Path("../../bar/baz.md")),
            Resolution::Resolved(2)
        );
        assert_eq!(
            resolve(&docs, 0, Reference::Path("../../bar/baz")),
            Resolution::Resolved(2)
        );
        assert_eq!(
            resolve(&docs, 0, Reference::Path("./../bar/./baz.md#top")),
            Resolution::Resolved(1)
        );
    }

    #[test]
    fn relative_path_with_spaces_resolves() {
        let docs = vec![doc("blog/a.md", Some("A")), doc("blog/my post.md", Some("Post"))];
        assert_eq!(
            resolve(&docs, 0, Reference::Path("./my post.md")),
            Resolution::Resolved(1)
        );
    }

    #[test]
    fn relative_path_escaping_root_is_unresolved() {
        let docs = corpus();
        assert_eq!(
            resolve(&docs, 2, Reference::Path("../../outside.md")),
            Resolution::Unresolved
        );
        assert_eq!(
            resolve(&docs, 0, Reference::Path("./missing.md")),
            Resolution::Unresolved
        );
    }

    #[test]
    fn root_absolute_uses_type_and_slug() {
        let docs = corpus();
        assert_eq!(
            resolve(&docs, 0, Reference::Path("/portfolio/my-project")),
            Resolution::Resolved(3)
        );
        assert_eq!(
            resolve(&docs, 0, Reference::Path("/portfolio/archive/my-project/")),
            Resolution::Resolved(3)
        );
        assert_eq!(
            resolve(&docs, 0, Reference::Path("/blog/my-project")),
            Resolution::Unresolved
        );
        assert_eq!(resolve(&docs, 0, Reference::Path("/portfolio")), Resolution::Unresolved);
    }

    #[test]
    fn unsupported_forms_never_resolve() {
        let docs = corpus();
        for dest in ["bar/baz.md", "https://example.com", "#section", "baz.md", ""] {
            assert_eq!(
                resolve(&docs, 0, Reference::Path(dest)),
                Resolution::Unsupported,
                "{dest}"
            );
        }
    }

    #[test]
    fn self_references_are_flagged() {
        let docs = corpus();
        assert_eq!(resolve(&docs, 0, Reference::Title("Foo")), Resolution::SelfReference);
        assert_eq!(
            resolve(&docs, 0, Reference::Path("./foo.md")),
            Resolution::SelfReference
        );
        assert_eq!(
            resolve(&docs, 0, Reference::Path("/blog/foo")),
            Resolution::SelfReference
        );
    }

    #[test]
    fn join_relative_normalizes_segments() {
        assert_eq!(join_relative("a/b/c.md", "../d.md").as_deref(), Some("a/d.md"));
        assert_eq!(join_relative("a/b/c.md", "./e/./f.md").as_deref(), Some("a/b/e/f.md"));
        assert_eq!(join_relative("top.md", "../x.md"), None);
    }
}
