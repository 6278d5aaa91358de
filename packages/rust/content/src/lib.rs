//! Markdown corpus loading and indexing.
//!
//! Turns a content directory into [`Document`]s (path-derived identity plus
//! front-matter metadata) and builds the [`DocumentIndex`] used to resolve
//! cross-references.

pub mod document;
pub mod frontmatter;
pub mod index;
pub mod loader;

pub use document::{Document, Identity, strip_extension};
pub use frontmatter::FrontMatter;
pub use index::DocumentIndex;
pub use loader::{Corpus, LoadOptions, LoadReport, load_corpus};
