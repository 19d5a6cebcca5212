//! Pipeline data model
//!
//! Mirrors the node/edge state produced by the visual pipeline editor.
//! Only node identifiers and edge endpoints feed into validation; the
//! remaining fields are carried as inert payload.

pub mod dag;

pub use dag::is_dag;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a pipeline document from disk
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse pipeline JSON: {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Canvas coordinates of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A component placed in the pipeline editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, expected to be unique within a pipeline
    pub id: String,
    /// Component kind (e.g. `customInput`, `llm`, `customOutput`)
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Position,
    /// Free-form component settings
    pub data: Map<String, Value>,
}

impl Node {
    /// Create a node with an empty payload at the origin
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position: Position::default(),
            data: Map::new(),
        }
    }

    /// Place the node at the given canvas coordinates
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    /// Attach a payload attribute
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

impl Edge {
    /// Create an edge with an id derived from its endpoints
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("reactflow__edge-{}-{}", source, target),
            source,
            target,
            source_handle: None,
            target_handle: None,
        }
    }

    /// Set the sub-connection handles on both ends
    pub fn with_handles(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_handle = Some(source.into());
        self.target_handle = Some(target.into());
        self
    }
}

/// Submitted pipeline state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Size statistics and acyclicity verdict for a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub num_nodes: usize,
    /// Counted before dangling edges are filtered out
    pub num_edges: usize,
    pub is_dag: bool,
}

impl Pipeline {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Count nodes and edges and check the graph for cycles
    pub fn summarize(&self) -> PipelineSummary {
        let summary = PipelineSummary {
            num_nodes: self.nodes.len(),
            num_edges: self.edges.len(),
            is_dag: is_dag(&self.nodes, &self.edges),
        };

        debug!(
            num_nodes = summary.num_nodes,
            num_edges = summary.num_edges,
            is_dag = summary.is_dag,
            "Pipeline summarized"
        );

        summary
    }

    /// Load a pipeline document saved as JSON
    pub async fn from_json_file(path: &Path) -> Result<Self, PipelineError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PipelineError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| PipelineError::JsonParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
