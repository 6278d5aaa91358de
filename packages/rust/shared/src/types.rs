//! Core domain types for the knowledge-graph artifact.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GalaxyError, Result};

/// Category used when a document declares none.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Intrinsic weight every node starts with.
pub const BASE_WEIGHT: u32 = 1;

// ---------------------------------------------------------------------------
// GraphNode
// ---------------------------------------------------------------------------

/// A single node in `galaxy-data.json`.
///
/// Field names are bound directly by the visualization, so the serialized
/// names and order must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Content-root-relative path without extension.
    pub id: String,
    /// Final path segment.
    pub slug: String,
    /// First path segment (content section).
    #[serde(rename = "type")]
    pub kind: String,
    /// Display title.
    pub name: String,
    pub category: String,
    /// Accumulated weight: base weight plus one per inbound link.
    pub val: u32,
    /// Short description for the detail sheet.
    pub desc: String,
    /// Content-root-relative path with the original extension.
    #[serde(rename = "filePath")]
    pub file_path: String,
}

// ---------------------------------------------------------------------------
// GraphLink
// ---------------------------------------------------------------------------

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

// ---------------------------------------------------------------------------
// GraphData
// ---------------------------------------------------------------------------

/// Root structure for `galaxy-data.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    /// Check the structural invariants of the graph.
    ///
    /// Node ids are unique, every weight is at least [`BASE_WEIGHT`], no link
    /// is a self-loop and every link endpoint names an existing node.
    pub fn validate(&self) -> Result<()> {
        let mut ids: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(GalaxyError::validation(format!(
                    "duplicate node id `{}`",
                    node.id
                )));
            }
            if node.val < BASE_WEIGHT {
                return Err(GalaxyError::validation(format!(
                    "node `{}` has weight {} below base weight",
                    node.id, node.val
                )));
            }
        }

        for link in &self.links {
            if link.source == link.target {
                return Err(GalaxyError::validation(format!(
                    "self-loop on `{}`",
                    link.source
                )));
            }
            for endpoint in [&link.source, &link.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(GalaxyError::validation(format!(
                        "link endpoint `{endpoint}` has no node"
                    )));
                }
            }
        }

        Ok(())
    }
}
