//! Barnes-Hut repulsion
//!
//! Instead of computing repulsion between all pairs of nodes O(n²), each
//! region of the spatial partition is summarized as a single pseudo-body
//! (aggregate charge at the charge-weighted centroid). A node treats a region
//! as one body once the region is small relative to its distance.

use rand::Rng;

use crate::model::Node;
use crate::quadtree::{Region, SpatialPartition};

/// Compute aggregate charge and centroid for `region` and everything below it.
///
/// Post-order: children first, then the region's own point. A point held by
/// an internal region coincides with others, so it is nudged by a random
/// offset in `[-0.5, 0.5)` per axis before being folded in; that breaks the
/// zero-distance pairs up over the next steps. A region whose charge sums to
/// zero gets a NaN centroid, which the repulsion pass never reads.
pub fn accumulate<R: Rng>(region: &mut Region, alpha: f64, nodes: &mut [Node], rng: &mut R) {
    let mut charge = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for child in region.children_mut() {
        accumulate(child, alpha, nodes, rng);
        charge += child.charge;
        cx += child.charge * child.cx;
        cy += child.charge * child.cy;
    }

    region.point_charge = 0.0;
    if let Some(index) = region.point {
        let is_leaf = region.is_leaf();
        let node = &mut nodes[index];
        if !is_leaf {
            node.x += rng.r#gen::<f64>() - 0.5;
            node.y += rng.r#gen::<f64>() - 0.5;
        }
        let k = alpha * node.charge;
        region.point_charge = k;
        charge += k;
        cx += k * node.x;
        cy += k * node.y;
    }

    region.charge = charge;
    region.cx = cx / charge;
    region.cy = cy / charge;
}

/// Accumulate repulsion on node `index` from everything in `partition`.
///
/// The displacement goes into the node's velocity impulse (`vx`, `vy`), not
/// its position; the integrator applies it. `theta2` is the squared opening
/// angle and `cutoff2` the squared cutoff distance.
pub fn repulse<P: SpatialPartition + ?Sized>(
    partition: &P,
    nodes: &mut [Node],
    index: usize,
    theta2: f64,
    cutoff2: f64,
) {
    let node = &mut nodes[index];
    partition.visit(&mut |region, bounds| {
        if region.point != Some(index) {
            let dx = region.cx - node.x;
            let dy = region.cy - node.y;
            let dw = bounds.width();
            let dn = dx * dx + dy * dy;

            // Far enough: the whole region acts as one body.
            if dw * dw / theta2 < dn {
                if dn < cutoff2 {
                    let k = region.charge / dn;
                    node.vx += dx * k;
                    node.vy += dy * k;
                }
                return true;
            }

            if region.point.is_some() && dn != 0.0 && dn < cutoff2 {
                let k = region.point_charge / dn;
                node.vx += dx * k;
                node.vy += dy * k;
            }
        }
        // Nothing below a chargeless region can contribute.
        region.charge == 0.0
    });
}
