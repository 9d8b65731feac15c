//! Simulation data model
//!
//! Nodes and edges are plain records owned by the caller and lent to a
//! [`Simulation`](crate::simulation::Simulation) for the duration of a run.

use serde::{Deserialize, Serialize};

/// A node with position and velocity state for simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Position in 2D space
    pub x: f64,
    pub y: f64,
    /// Position at the end of the previous step
    pub px: f64,
    pub py: f64,
    /// Velocity impulse from repulsion, applied at integration and then cleared
    pub vx: f64,
    pub vy: f64,
    /// Anchor recorded at initialization
    pub fx: f64,
    pub fy: f64,
    /// Number of edge endpoints touching this node
    pub weight: u32,
    /// Pinned by the caller
    pub fixed: bool,
    /// Secondary pin, e.g. held by an interaction layer
    pub fixed2: bool,
    /// Charge magnitude (negative repels)
    pub charge: f64,
    pub(crate) placed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            px: 0.0,
            py: 0.0,
            vx: 0.0,
            vy: 0.0,
            fx: 0.0,
            fy: 0.0,
            weight: 0,
            fixed: false,
            fixed2: false,
            charge: 0.0,
            placed: false,
        }
    }
}

impl Node {
    /// Create a node without coordinates; it is placed on the initial grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node at a caller-chosen position, preserved at initialization.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            placed: true,
            ..Default::default()
        }
    }

    /// Pin this node at its position.
    pub fn pinned(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Whether either pin flag is set
    pub fn is_pinned(&self) -> bool {
        self.fixed || self.fixed2
    }

    /// Whether the node had coordinates before the run started
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub(crate) fn place(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.placed = true;
    }
}

/// An edge for simulation (indices into node array)
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    /// Rest length, cached from the options at initialization
    pub rest_length: f64,
    /// Spring strength, cached from the options at initialization
    pub strength: f64,
}

impl Edge {
    pub fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            rest_length: 0.0,
            strength: 0.0,
        }
    }
}

/// Layout direction hint for whoever maps the result onto a surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
}

/// Presentation hints returned by a layout run.
///
/// These are not simulation output; the positions live on the nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutHints {
    pub margin: f64,
    pub direction: Direction,
}
