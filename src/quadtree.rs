//! Spatial partition used by the Barnes-Hut repulsion pass.
//!
//! The simulation only depends on the [`SpatialAggregator`] and
//! [`SpatialPartition`] traits, so callers can plug in their own index.
//! [`QuadtreeAggregator`] is the stock implementation: a point quadtree over
//! the node positions, rebuilt from scratch every step.

use crate::model::Node;
use crate::viewport::BoundingBox;

/// Two points closer than this (Manhattan distance) share a region
const COINCIDENT_EPSILON: f64 = 0.01;

/// Extent of a region, as passed to visitors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Bounds {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Bounds of child `index` (`below << 1 | right`)
    pub fn child(&self, index: usize) -> Bounds {
        let xm = (self.x1 + self.x2) * 0.5;
        let ym = (self.y1 + self.y2) * 0.5;
        let (x1, x2) = if index & 1 == 1 {
            (xm, self.x2)
        } else {
            (self.x1, xm)
        };
        let (y1, y2) = if index & 2 == 2 {
            (ym, self.y2)
        } else {
            (self.y1, ym)
        };
        Bounds { x1, y1, x2, y2 }
    }

    fn quadrant(&self, x: f64, y: f64) -> usize {
        let right = x >= (self.x1 + self.x2) * 0.5;
        let below = y >= (self.y1 + self.y2) * 0.5;
        (usize::from(below) << 1) | usize::from(right)
    }
}

/// Sparse children of an internal region, indexed `below << 1 | right`
pub type Children = [Option<Box<Region>>; 4];

/// Shape of a region
#[derive(Debug, Default)]
pub enum RegionKind {
    #[default]
    Leaf,
    Internal {
        children: Children,
    },
}

/// A node in the spatial partition.
///
/// An internal region may still hold a point of its own when several points
/// coincide. The charge fields are derived data owned by the charge
/// accumulator and rebuilt every step.
#[derive(Debug, Default)]
pub struct Region {
    /// Index of the directly held node, if any
    pub point: Option<usize>,
    pub kind: RegionKind,
    /// Aggregate charge of everything under this region
    pub charge: f64,
    /// Charge of `point` alone
    pub point_charge: f64,
    /// Charge-weighted centroid (NaN when `charge` is zero)
    pub cx: f64,
    pub cy: f64,
}

impl Region {
    /// A leaf holding `point`
    pub fn leaf(point: Option<usize>) -> Self {
        Self {
            point,
            ..Default::default()
        }
    }

    /// An internal region with the given children and optional own point
    pub fn internal(point: Option<usize>, children: Children) -> Self {
        Self {
            point,
            kind: RegionKind::Internal { children },
            ..Default::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, RegionKind::Leaf)
    }

    /// Non-empty children in index order, with their index
    pub fn children(&self) -> impl Iterator<Item = (usize, &Region)> {
        let slots: &[Option<Box<Region>>] = match &self.kind {
            RegionKind::Leaf => &[],
            RegionKind::Internal { children } => children,
        };
        slots
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_deref().map(|c| (i, c)))
    }

    /// Non-empty children, mutably
    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        let slots: &mut [Option<Box<Region>>] = match &mut self.kind {
            RegionKind::Leaf => &mut [],
            RegionKind::Internal { children } => children,
        };
        slots.iter_mut().filter_map(|c| c.as_deref_mut())
    }

    /// Number of regions in this subtree, including this one
    pub fn len(&self) -> usize {
        1 + self.children().map(|(_, c)| c.len()).sum::<usize>()
    }

    /// Turn a leaf into an internal region, keeping its point
    fn split(&mut self) -> &mut Children {
        if self.is_leaf() {
            self.kind = RegionKind::Internal {
                children: Default::default(),
            };
        }
        match &mut self.kind {
            RegionKind::Internal { children } => children,
            RegionKind::Leaf => unreachable!("region was just split"),
        }
    }
}

/// A rooted spatial partition over the current node positions
pub trait SpatialPartition {
    /// Root region, for the bottom-up charge pass
    fn root_mut(&mut self) -> &mut Region;

    /// Depth-first, top-down traversal.
    ///
    /// Calls `f(region, bounds)` for every region reached and skips the
    /// region's children when `f` returns `true`.
    fn visit(&self, f: &mut dyn FnMut(&Region, Bounds) -> bool);
}

/// Builds a [`SpatialPartition`] from node positions, once per step
pub trait SpatialAggregator {
    type Partition: SpatialPartition;

    fn aggregate(&mut self, nodes: &[Node]) -> Self::Partition;
}

/// Point quadtree
#[derive(Debug)]
pub struct Quadtree {
    pub root: Region,
    pub bounds: Bounds,
}

impl Quadtree {
    /// Build a quadtree over the given node positions.
    ///
    /// The extent is squared up on its shorter axis. Nodes with NaN
    /// coordinates are left out.
    pub fn build(nodes: &[Node]) -> Self {
        let mut extent = BoundingBox::empty();
        for node in nodes.iter().filter(|n| !n.x.is_nan() && !n.y.is_nan()) {
            extent.include_point(node.x, node.y);
        }
        if extent.is_empty() {
            return Self {
                root: Region::leaf(None),
                bounds: Bounds::new(0.0, 0.0, 0.0, 0.0),
            };
        }

        let (x1, y1) = (extent.min_x, extent.min_y);
        let (mut x2, mut y2) = (extent.max_x, extent.max_y);
        let (dx, dy) = (x2 - x1, y2 - y1);
        if dx > dy {
            y2 = y1 + dx;
        } else {
            x2 = x1 + dy;
        }

        let mut tree = Self {
            root: Region::leaf(None),
            bounds: Bounds::new(x1, y1, x2, y2),
        };
        for (index, node) in nodes.iter().enumerate() {
            if node.x.is_nan() || node.y.is_nan() {
                continue;
            }
            insert(&mut tree.root, nodes, index, node.x, node.y, tree.bounds);
        }
        tree
    }

    /// Number of regions in the tree
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.point.is_none() && self.root.is_leaf()
    }
}

fn insert(region: &mut Region, nodes: &[Node], index: usize, x: f64, y: f64, bounds: Bounds) {
    if !region.is_leaf() {
        insert_child(region, nodes, index, x, y, bounds);
        return;
    }
    match region.point {
        None => region.point = Some(index),
        Some(existing) => {
            let (ex, ey) = (nodes[existing].x, nodes[existing].y);
            if (ex - x).abs() + (ey - y).abs() < COINCIDENT_EPSILON {
                insert_child(region, nodes, index, x, y, bounds);
            } else {
                region.point = None;
                insert_child(region, nodes, existing, ex, ey, bounds);
                insert_child(region, nodes, index, x, y, bounds);
            }
        }
    }
}

fn insert_child(region: &mut Region, nodes: &[Node], index: usize, x: f64, y: f64, bounds: Bounds) {
    let quadrant = bounds.quadrant(x, y);
    let child = region.split()[quadrant].get_or_insert_with(Box::default);
    insert(child, nodes, index, x, y, bounds.child(quadrant));
}

fn visit_region(region: &Region, bounds: Bounds, f: &mut dyn FnMut(&Region, Bounds) -> bool) {
    if f(region, bounds) {
        return;
    }
    for (index, child) in region.children() {
        visit_region(child, bounds.child(index), f);
    }
}

impl SpatialPartition for Quadtree {
    fn root_mut(&mut self) -> &mut Region {
        &mut self.root
    }

    fn visit(&self, f: &mut dyn FnMut(&Region, Bounds) -> bool) {
        visit_region(&self.root, self.bounds, f);
    }
}

/// The stock aggregator: a fresh [`Quadtree`] per step
#[derive(Debug, Default, Clone, Copy)]
pub struct QuadtreeAggregator;

impl SpatialAggregator for QuadtreeAggregator {
    type Partition = Quadtree;

    fn aggregate(&mut self, nodes: &[Node]) -> Quadtree {
        Quadtree::build(nodes)
    }
}
