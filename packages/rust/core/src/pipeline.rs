//! End-to-end `generate` pipeline: content root → documents → index → links → artifact.

use std::time::{Duration, Instant};

use tracing::{info, instrument};

use galaxy_artifacts::ArtifactMeta;
use galaxy_content::{LoadOptions, LoadReport};
use galaxy_shared::{GraphConfig, GraphData, Result};

use crate::assembler::{GraphAssembler, ResolveStats};

/// Result of the `generate` pipeline.
#[derive(Debug)]
pub struct GenerateResult {
    /// The assembled graph (also what was written to disk).
    pub graph: GraphData,
    /// Reference resolution counters.
    pub stats: ResolveStats,
    /// Corpus load counters.
    pub load: LoadReport,
    /// Written artifact, or `None` on a dry run.
    pub artifact: Option<ArtifactMeta>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl GenerateResult {
    pub fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.graph.links.len()
    }
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after a document's references have been resolved.
    fn document_linked(&self, id: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &GenerateResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_linked(&self, _id: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &GenerateResult) {}
}

/// Run the full `generate` pipeline.
///
/// 1. Load: walk the content root, split front-matter
/// 2. Index: build id/title/slug lookups
/// 3. Link: extract and resolve references, accumulate weights
/// 4. Write: atomically replace the artifact (skipped on dry runs)
///
/// Fails only on structural problems (unusable content root, unwritable
/// output). Content problems are logged and absorbed.
#[instrument(skip_all, fields(root = %config.content_root.display()))]
pub fn generate(config: &GraphConfig, progress: &dyn ProgressReporter) -> Result<GenerateResult> {
    let start = Instant::now();
    info!("Generating knowledge graph...");

    // --- Phase 1: Load ---
    progress.phase("Loading documents");
    let corpus = galaxy_content::load_corpus(&LoadOptions::from(config))?;

    // --- Phase 2: Index ---
    progress.phase("Indexing documents");
    let mut assembler = GraphAssembler::new(corpus.documents, config.extension.as_str());

    // --- Phase 3: Link ---
    progress.phase("Resolving links");
    let total = assembler.documents().len();
    for pos in 0..total {
        assembler.link_document(pos);
        progress.document_linked(&assembler.documents()[pos].id, pos + 1, total);
    }
    let assembled = assembler.finish();
    assembled.graph.validate()?;

    info!(
        references = assembled.stats.total(),
        resolved = assembled.stats.resolved,
        unresolved = assembled.stats.unresolved,
        self_references = assembled.stats.self_references,
        unsupported = assembled.stats.unsupported,
        "links resolved"
    );

    // --- Phase 4: Write ---
    let artifact = if config.dry_run {
        info!("dry run, artifact not written");
        None
    } else {
        progress.phase("Writing artifact");
        Some(galaxy_artifacts::write_graph(&config.output_file, &assembled.graph)?)
    };

    let result = GenerateResult {
        graph: assembled.graph,
        stats: assembled.stats,
        load: corpus.report,
        artifact,
        elapsed: start.elapsed(),
    };

    info!(
        "Graph data generated with {} nodes and {} links.",
        result.node_count(),
        result.link_count()
    );
    progress.done(&result);

    Ok(result)
}
