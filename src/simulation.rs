//! Force simulation driver
//!
//! Each step applies, in order: edge springs, gravity toward the center of the
//! world, Barnes-Hut repulsion, then friction-damped integration. The global
//! temperature `alpha` scales every force and decays geometrically; the run
//! ends on the step where it would drop below [`ALPHA_MIN`].
//!
//! Velocity is implicit in the previous position (`px`, `py`): integration
//! takes `x - px` plus any repulsion impulse as the velocity, records the
//! current position as the previous one, then moves by the damped velocity.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::barnes_hut;
use crate::error::{LayoutError, Result};
use crate::model::{Edge, LayoutHints, Node};
use crate::options::LayoutOptions;
use crate::quadtree::{QuadtreeAggregator, SpatialAggregator, SpatialPartition};

/// Temperature at the start of a run
pub const INITIAL_ALPHA: f64 = 0.1;
/// Per-step temperature multiplier
pub const ALPHA_DECAY: f64 = 0.99;
/// Temperature below which the run is over
pub const ALPHA_MIN: f64 = 0.05;

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Converged,
}

/// Result of a full run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps taken, including the one that converged
    pub steps: usize,
    /// False when the step budget ran out first
    pub converged: bool,
}

/// CPU force simulation over caller-owned nodes and edges
pub struct Simulation<'a, A: SpatialAggregator = QuadtreeAggregator> {
    nodes: &'a mut [Node],
    edges: &'a [Edge],
    options: LayoutOptions,
    aggregator: A,
    rng: StdRng,
    alpha: f64,
    steps: usize,
}

impl<'a> Simulation<'a> {
    /// Initialize a simulation using the stock quadtree
    pub fn new(
        nodes: &'a mut [Node],
        edges: &'a mut [Edge],
        options: LayoutOptions,
    ) -> Result<Self> {
        Self::with_aggregator(nodes, edges, options, QuadtreeAggregator)
    }
}

impl<'a, A: SpatialAggregator> Simulation<'a, A> {
    /// Initialize a simulation with a custom spatial aggregator.
    ///
    /// Unplaced nodes are laid out on a grid, node state is reset, edge
    /// weights and spring parameters are computed, and `alpha` starts at
    /// [`INITIAL_ALPHA`].
    pub fn with_aggregator(
        nodes: &'a mut [Node],
        edges: &'a mut [Edge],
        options: LayoutOptions,
        aggregator: A,
    ) -> Result<Self> {
        options.validate()?;
        for (i, edge) in edges.iter().enumerate() {
            for node in [edge.source, edge.target] {
                if node >= nodes.len() {
                    return Err(LayoutError::DanglingEdge {
                        edge: i,
                        node,
                        len: nodes.len(),
                    });
                }
            }
        }

        place_on_grid(nodes);
        for node in nodes.iter_mut() {
            node.px = node.x;
            node.py = node.y;
            node.fx = node.x;
            node.fy = node.y;
            node.vx = 0.0;
            node.vy = 0.0;
            node.weight = 0;
            node.charge = options.charge;
        }
        for edge in edges.iter_mut() {
            nodes[edge.source].weight += 1;
            nodes[edge.target].weight += 1;
            edge.rest_length = options.edge_distance;
            edge.strength = options.edge_strength;
        }

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            seed = ?options.seed,
            "initialized force simulation"
        );

        Ok(Self {
            nodes,
            edges,
            options,
            aggregator,
            rng,
            alpha: INITIAL_ALPHA,
            steps: 0,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        self.edges
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Current temperature
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Check if simulation is still running
    pub fn is_running(&self) -> bool {
        self.alpha > 0.0
    }

    /// Presentation hints for the caller
    pub fn hints(&self) -> LayoutHints {
        self.options.hints()
    }

    /// Run one simulation step.
    ///
    /// Returns [`StepOutcome::Converged`] without moving anything once
    /// `alpha` has decayed below [`ALPHA_MIN`]; `alpha` is then exactly 0.
    pub fn step(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Converged;
        }

        self.steps += 1;
        self.alpha *= ALPHA_DECAY;
        if self.alpha < ALPHA_MIN {
            self.alpha = 0.0;
            return StepOutcome::Converged;
        }

        self.apply_springs();
        self.apply_gravity();
        if self.options.charge != 0.0 {
            self.apply_repulsion();
        }
        self.integrate();

        trace!(step = self.steps, alpha = self.alpha, "step");
        StepOutcome::Continue
    }

    /// Step until converged, or until `max_steps` runs out
    pub fn run(&mut self) -> RunSummary {
        loop {
            if let Some(max_steps) = self.options.max_steps {
                if self.steps >= max_steps && self.is_running() {
                    warn!(
                        steps = self.steps,
                        alpha = self.alpha,
                        "step budget exhausted before convergence"
                    );
                    return RunSummary {
                        steps: self.steps,
                        converged: false,
                    };
                }
            }
            if self.step() == StepOutcome::Converged {
                break;
            }
        }

        debug!(steps = self.steps, "force simulation converged");
        RunSummary {
            steps: self.steps,
            converged: true,
        }
    }

    /// Pull or push each edge's endpoints toward its rest length.
    ///
    /// The correction is split by endpoint weight, so the endpoint with more
    /// edges moves less.
    fn apply_springs(&mut self) {
        let alpha = self.alpha;

        for edge in self.edges {
            let (s, t) = (edge.source, edge.target);

            let mut x = self.nodes[t].x - self.nodes[s].x;
            let mut y = self.nodes[t].y - self.nodes[s].y;
            let l2 = x * x + y * y;
            if l2 == 0.0 {
                continue;
            }

            let l = l2.sqrt();
            let factor = alpha * edge.strength * (l - edge.rest_length) / l;
            x *= factor;
            y *= factor;

            let sw = f64::from(self.nodes[s].weight);
            let tw = f64::from(self.nodes[t].weight);
            let k = sw / (tw + sw);
            self.nodes[t].x -= x * k;
            self.nodes[t].y -= y * k;
            let k = 1.0 - k;
            self.nodes[s].x += x * k;
            self.nodes[s].y += y * k;
        }
    }

    /// Move every node a fraction of the way toward the center of the world
    fn apply_gravity(&mut self) {
        let k = self.alpha * self.options.gravity;
        if k == 0.0 {
            return;
        }

        let (cx, cy) = self.options.center();
        for node in self.nodes.iter_mut() {
            node.x += (cx - node.x) * k;
            node.y += (cy - node.y) * k;
        }
    }

    /// Barnes-Hut repulsion on every free node
    fn apply_repulsion(&mut self) {
        let mut partition = self.aggregator.aggregate(self.nodes);
        barnes_hut::accumulate(partition.root_mut(), self.alpha, self.nodes, &mut self.rng);

        let theta2 = self.options.theta2;
        let cutoff2 = self.options.charge_cutoff2();
        for index in 0..self.nodes.len() {
            if !self.nodes[index].is_pinned() {
                barnes_hut::repulse(&partition, self.nodes, index, theta2, cutoff2);
            }
        }
    }

    /// Damped position update, pin enforcement and escape correction
    fn integrate(&mut self) {
        let friction = self.options.friction;
        let bounds = self.options.bounds;

        for node in self.nodes.iter_mut() {
            if node.is_pinned() {
                node.x = node.px;
                node.y = node.py;
                node.vx = 0.0;
                node.vy = 0.0;
                continue;
            }

            let vx = node.x - node.px + node.vx;
            let vy = node.y - node.py + node.vy;
            node.px = node.x;
            node.py = node.y;
            node.x += vx * friction;
            node.y += vy * friction;
            node.vx = 0.0;
            node.vy = 0.0;

            if let Some(rect) = bounds {
                if !rect.contains_x(node.x) {
                    node.x = self.rng.r#gen::<f64>() * (rect.max_x - rect.min_x) + rect.min_x;
                }
                if !rect.contains_y(node.y) {
                    node.y = self.rng.r#gen::<f64>() * (rect.max_y - rect.min_y) + rect.min_y;
                }
            }
        }
    }
}

/// Lay unplaced nodes out on a square grid in the unit square.
///
/// The grid has `ceil(sqrt(n))` columns and is offset by `0.3 / columns` on
/// both axes. Nodes that already have coordinates keep them.
fn place_on_grid(nodes: &mut [Node]) {
    let n = nodes.len();
    if n == 0 {
        return;
    }

    let d = (n as f64).sqrt().ceil();
    let columns = d as usize;
    let s = 0.3 / d;
    for (i, node) in nodes.iter_mut().enumerate() {
        if !node.is_placed() {
            node.place(s + (i % columns) as f64 / d, s + (i / columns) as f64 / d);
        }
    }
}

/// Lay out `nodes` in place and return the presentation hints.
///
/// Runs a [`Simulation`] with the stock quadtree until it converges (or
/// until `options.max_steps` runs out).
pub fn apply(
    nodes: &mut [Node],
    edges: &mut [Edge],
    options: &LayoutOptions,
) -> Result<LayoutHints> {
    let mut simulation = Simulation::new(nodes, edges, options.clone())?;
    simulation.run();
    Ok(simulation.hints())
}
