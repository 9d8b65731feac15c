//! forcegraph - force-directed 2D graph layout.
//!
//! Edges act as springs, nodes repel each other through an inverse-square
//! charge approximated with Barnes-Hut over a quadtree, a weak gravity pulls
//! everything toward the center, and friction damps the motion until the
//! temperature runs out.
//!
//! ```
//! use forcegraph::{Edge, LayoutOptions, Node, apply};
//!
//! let mut nodes = vec![Node::new(), Node::new(), Node::new()];
//! let mut edges = vec![Edge::new(0, 1), Edge::new(1, 2)];
//! let options = LayoutOptions {
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let hints = apply(&mut nodes, &mut edges, &options).unwrap();
//! assert_eq!(hints.margin, 0.05);
//! assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
//! ```

pub mod barnes_hut;
pub mod error;
pub mod graph;
pub mod io;
pub mod model;
pub mod options;
pub mod quadtree;
pub mod readers;
pub mod simulation;
pub mod viewport;
pub mod writers;

pub use error::{LayoutError, Result};
pub use model::{Direction, Edge, LayoutHints, Node};
pub use options::{BoundingRect, LayoutOptions};
pub use simulation::{RunSummary, Simulation, StepOutcome, apply};
