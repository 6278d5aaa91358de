//! Graph artifact writer.
//!
//! Renders [`GraphData`] as pretty JSON and replaces the artifact file
//! atomically: the content goes to a temp file next to the target, which is
//! then renamed into place. An interrupted run leaves the previous artifact
//! untouched.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use galaxy_shared::{GalaxyError, GraphData, Result};

/// Metadata for a written (or already up-to-date) artifact.
#[derive(Debug, Clone)]
pub struct ArtifactMeta {
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: usize,
    /// The file already held identical content and was not rewritten.
    pub unchanged: bool,
}

/// Serialize the graph the way it is stored on disk.
pub fn render_graph(graph: &GraphData) -> Result<String> {
    let mut json = serde_json::to_string_pretty(graph)
        .map_err(|e| GalaxyError::Serialize(format!("JSON serialization failed: {e}")))?;
    json.push('\n');
    Ok(json)
}

/// Hex-encoded SHA-256 of `content`.
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Write the graph artifact to `target`.
///
/// Creates missing parent directories. Skips the write when the existing
/// file already has the same content.
#[instrument(skip_all, fields(path = %target.display(), nodes = graph.nodes.len(), links = graph.links.len()))]
pub fn write_graph(target: &Path, graph: &GraphData) -> Result<ArtifactMeta> {
    let temp = temp_path(target)?;
    let content = render_graph(graph)?;
    let hash = sha256_hex(content.as_bytes());

    if let Ok(existing) = std::fs::read(target) {
        if sha256_hex(&existing) == hash {
            info!(sha256 = %hash, "artifact unchanged, skipping write");
            return Ok(ArtifactMeta {
                path: target.to_path_buf(),
                sha256: hash,
                size_bytes: content.len(),
                unchanged: true,
            });
        }
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GalaxyError::io(parent, e))?;
    }

    std::fs::write(&temp, &content).map_err(|e| GalaxyError::io(&temp, e))?;

    if let Err(e) = std::fs::rename(&temp, target) {
        // Best effort cleanup.
        let _ = std::fs::remove_file(&temp);
        return Err(GalaxyError::io(target, e));
    }

    debug!(size = content.len(), sha256 = %hash, "wrote artifact");

    Ok(ArtifactMeta {
        path: target.to_path_buf(),
        sha256: hash,
        size_bytes: content.len(),
        unchanged: false,
    })
}

/// `.<file>.tmp` in the same directory as `target`, so the rename stays on one filesystem.
fn temp_path(target: &Path) -> Result<PathBuf> {
    let file_name = target.file_name().ok_or_else(|| {
        GalaxyError::io(
            target,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "output path has no file name"),
        )
    })?;
    Ok(target.with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
}
