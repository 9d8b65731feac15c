//! Graph and layout documents
//!
//! Graphs arrive with string node ids; the simulation works on index-based
//! [`Node`]s and [`Edge`]s. This module converts between the two and defines
//! the serialized layout result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Direction, Edge, LayoutHints, Node};
use crate::simulation::RunSummary;
use crate::viewport;

/// Errors found while resolving a graph document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes share an id
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    /// An edge names a node id that is not in the document
    #[error("edge {edge} references unknown node id: {id}")]
    UnknownNode { edge: usize, id: String },
}

/// A node in the graph representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier for the node
    pub id: String,

    /// Optional human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Initial position; both coordinates must be present to be used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    /// Keep the node at its initial position
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fixed: bool,
}

/// An edge connecting two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node ID
    pub source: String,

    /// Target node ID
    pub target: String,

    /// Optional label for the edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Complete graph data for serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl GraphDocument {
    /// Resolve ids into simulation nodes and edges (indices follow document order)
    pub fn to_simulation_input(&self) -> Result<(Vec<Node>, Vec<Edge>), GraphError> {
        let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if index_of.insert(node.id.as_str(), i).is_some() {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        let nodes = self
            .nodes
            .iter()
            .map(|n| {
                let node = match (n.x, n.y) {
                    (Some(x), Some(y)) => Node::at(x, y),
                    _ => Node::new(),
                };
                if n.fixed { node.pinned() } else { node }
            })
            .collect();

        let resolve = |edge: usize, id: &str| {
            index_of
                .get(id)
                .copied()
                .ok_or_else(|| GraphError::UnknownNode {
                    edge,
                    id: id.to_string(),
                })
        };
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| -> Result<Edge, GraphError> {
                Ok(Edge::new(resolve(i, &e.source)?, resolve(i, &e.target)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((nodes, edges))
    }
}

/// A laid-out node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
}

/// Serialized result of a layout run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub margin: f64,
    pub direction: Direction,
    pub steps: usize,
    pub converged: bool,
    pub nodes: Vec<PositionedNode>,
}

impl LayoutDocument {
    /// Pair simulated positions back up with the document's ids
    pub fn from_run(
        graph: &GraphDocument,
        nodes: &[Node],
        hints: LayoutHints,
        summary: RunSummary,
    ) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .zip(nodes)
            .map(|(g, n)| PositionedNode {
                id: g.id.clone(),
                label: g.label.clone(),
                x: n.x,
                y: n.y,
            })
            .collect();

        Self {
            margin: hints.margin,
            direction: hints.direction,
            steps: summary.steps,
            converged: summary.converged,
            nodes,
        }
    }

    /// Fit all positions into the unit square, inset by the margin hint
    pub fn normalize(&mut self) {
        let mut points: Vec<(f64, f64)> = self.nodes.iter().map(|n| (n.x, n.y)).collect();
        viewport::fit_to_margin(&mut points, self.margin);
        for (node, (x, y)) in self.nodes.iter_mut().zip(points) {
            node.x = x;
            node.y = y;
        }
    }
}
