//! Graph assembler.
//!
//! Owns the loaded documents and their index, resolves every reference in
//! every body, and accumulates links and inbound-link weights. Duplicate
//! references produce duplicate links.

use tracing::{debug, instrument};

use galaxy_content::{Document, DocumentIndex};
use galaxy_markdown::{Reference, extract_references};
use galaxy_shared::{GraphData, GraphLink};

use crate::resolver::{Resolution, Resolver};

/// Counters over every reference seen during assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// `[[...]]` references scanned.
    pub title_refs: usize,
    /// `[label](path)` references scanned.
    pub path_refs: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub self_references: usize,
    pub unsupported: usize,
}

impl ResolveStats {
    fn record(&mut self, reference: Reference<'_>, resolution: Resolution) {
        match reference {
            Reference::Title(_) => self.title_refs += 1,
            Reference::Path(_) => self.path_refs += 1,
        }
        match resolution {
            Resolution::Resolved(_) => self.resolved += 1,
            Resolution::Unresolved => self.unresolved += 1,
            Resolution::SelfReference => self.self_references += 1,
            Resolution::Unsupported => self.unsupported += 1,
        }
    }

    /// Total references scanned.
    pub fn total(&self) -> usize {
        self.title_refs + self.path_refs
    }
}

/// Final output of assembly.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub graph: GraphData,
    pub stats: ResolveStats,
}

/// Accumulates links over a fixed document set.
#[derive(Debug)]
pub struct GraphAssembler {
    documents: Vec<Document>,
    index: DocumentIndex,
    extension: String,
    links: Vec<GraphLink>,
    stats: ResolveStats,
}

impl GraphAssembler {
    /// Index `documents` (in discovery order) and start with no links.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn new(documents: Vec<Document>, extension: impl Into<String>) -> Self {
        let index = DocumentIndex::build(&documents);
        debug!(indexed = index.len(), "document index built");

        Self {
            documents,
            index,
            extension: extension.into(),
            links: Vec::new(),
            stats: ResolveStats::default(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Resolve every reference in the document at `source`.
    ///
    /// Returns the number of links added. `source` must be a position in
    /// [`Self::documents`].
    pub(crate) fn link_document(&mut self, source: usize) -> usize {
        let targets: Vec<usize> = {
            let resolver = Resolver::new(&self.documents, &self.index, &self.extension);
            let doc = &self.documents[source];
            let stats = &mut self.stats;

            extract_references(&doc.body)
                .filter_map(|reference| {
                    let resolution = resolver.resolve(source, reference);
                    stats.record(reference, resolution);
                    match resolution {
                        Resolution::Resolved(target) => Some(target),
                        dropped => {
                            debug!(source = %doc.id, ?reference, outcome = ?dropped, "reference dropped");
                            None
                        }
                    }
                })
                .collect()
        };

        for &target in &targets {
            self.documents[target].weight += 1;
            self.links.push(GraphLink {
                source: self.documents[source].id.clone(),
                target: self.documents[target].id.clone(),
            });
        }

        targets.len()
    }

    /// Resolve every document in discovery order.
    pub fn link_all(&mut self) {
        for pos in 0..self.documents.len() {
            self.link_document(pos);
        }
    }

    /// Project documents into nodes and hand back the graph.
    pub fn finish(self) -> Assembled {
        Assembled {
            graph: GraphData {
                nodes: self.documents.iter().map(Document::to_node).collect(),
                links: self.links,
            },
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_content::{FrontMatter, Identity};

    fn doc(path: &str, title: &str, body: &str) -> Document {
        Document::new(
            Identity::from_relative_path(path, "md"),
            FrontMatter {
                title: Some(title.into()),
                ..FrontMatter::default()
            },
            body.into(),
            "Uncategorized",
        )
    }

    fn assemble(docs: Vec<Document>) -> Assembled {
        let mut assembler = GraphAssembler::new(docs, "md");
        assembler.link_all();
        assembler.finish()
    }

    fn node_val(graph: &GraphData, id: &str) -> u32 {
        graph.nodes.iter().find(|n| n.id == id).unwrap().val
    }

    #[test]
    fn title_reference_links_and_weights_target() {
        let out = assemble(vec![
            doc("blog/a.md", "A", "see [[B's Title]]"),
            doc("blog/b.md", "B's Title", "no links"),
        ]);
        assert_eq!(
            out.graph.links,
            [GraphLink {
                source: "blog/a".into(),
                target: "blog/b".into()
            }]
        );
        assert_eq!(node_val(&out.graph, "blog/a"), 1);
        assert_eq!(node_val(&out.graph, "blog/b"), 2);
    }

    #[test]
    fn two_sources_give_weight_three() {
        let out = assemble(vec![
            doc("blog/a.md", "A", "[[C]]"),
            doc("blog/b.md", "B", "[c](./c.md)"),
            doc("blog/c.md", "C", ""),
        ]);
        assert_eq!(out.graph.links.len(), 2);
        assert_eq!(node_val(&out.graph, "blog/c"), 3);
    }

    #[test]
    fn duplicate_references_are_not_deduplicated() {
        let out = assemble(vec![
            doc("blog/a.md", "A", "[[B]] and again [[B]] and [b](/blog/b)"),
            doc("blog/b.md", "B", ""),
        ]);
        assert_eq!(out.graph.links.len(), 3);
        assert_eq!(node_val(&out.graph, "blog/b"), 4);
    }

    #[test]
    fn misses_and_self_links_are_counted_not_linked() {
        let out = assemble(vec![doc(
            "blog/a.md",
            "A",
            "[[A]] [[Ghost]] [me](./a.md) [ext](https://example.com) [bare](b.md)",
        )]);
        assert!(out.graph.links.is_empty());
        assert_eq!(node_val(&out.graph, "blog/a"), 1);
        assert_eq!(
            out.stats,
            ResolveStats {
                title_refs: 2,
                path_refs: 3,
                resolved: 0,
                unresolved: 1,
                self_references: 2,
                unsupported: 2,
            }
        );
        assert_eq!(out.stats.total(), 5);
    }

    #[test]
    fn nodes_keep_discovery_order_and_graph_validates() {
        let out = assemble(vec![
            doc("portfolio/z.md", "Z", "[[A]]"),
            doc("blog/a.md", "A", "[z](/portfolio/z)"),
        ]);
        let ids: Vec<&str> = out.graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["portfolio/z", "blog/a"]);
        out.graph.validate().expect("graph invariants hold");
    }

    #[test]
    fn link_document_reports_added_links() {
        let mut assembler = GraphAssembler::new(
            vec![doc("blog/a.md", "A", "[[B]] [[B]]"), doc("blog/b.md", "B", "")],
            "md",
        );
        assert_eq!(assembler.link_document(0), 2);
        assert_eq!(assembler.link_document(1), 0);
        assert_eq!(assembler.documents()[1].weight, 3);
    }
}
