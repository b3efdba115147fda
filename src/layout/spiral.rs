use crate::foundation::core::{Point, Rect};
use crate::foundation::random::gaussian;
use crate::graph::model::{DriftGraph, NodeId};
use rand::Rng;
use std::f64::consts::TAU;

const ANGLE_JITTER_STD: f64 = 0.05;
const SPIRAL_STEP: f64 = 0.2;

/// Node coordinates in world units, indexed by [`NodeId`]. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Positions {
    points: Vec<Point>,
}

impl Positions {
    pub fn get(&self, id: NodeId) -> Option<Point> {
        self.points.get(id.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (NodeId(i as u32), *p))
    }

    /// Tight bounding box of all points, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let init = Rect::from_points(*first, *first);
        Some(
            self.points
                .iter()
                .fold(init, |r, p| r.union_pt(*p)),
        )
    }
}

/// `2 + (depth - level) * 2`; outer levels get the larger rings.
pub fn ring_radius(depth: u32, level: u32) -> f64 {
    2.0 + (f64::from(depth) - f64::from(level)) * 2.0
}

/// `0.2 * (depth - level)`, added to every angle on the ring.
pub fn spiral_offset(depth: u32, level: u32) -> f64 {
    SPIRAL_STEP * (f64::from(depth) - f64::from(level))
}

/// Place nodes on concentric rings centred at the origin.
///
/// Levels are visited deepest first and each node takes exactly one jitter draw.
#[tracing::instrument(skip_all, fields(nodes = graph.nodes().len()))]
pub fn spiral_layout<R: Rng>(graph: &DriftGraph, rng: &mut R) -> Positions {
    let depth = graph.depth();
    let mut points = vec![Point::ORIGIN; graph.nodes().len()];

    for level in (0..depth).rev() {
        let ids = graph.level(level);
        if ids.is_empty() {
            continue;
        }
        let radius = ring_radius(depth, level);
        let offset = spiral_offset(depth, level);
        let count = ids.len() as f64;
        for (i, id) in ids.iter().enumerate() {
            let angle = TAU * (i as f64) / count + gaussian(rng, 0.0, ANGLE_JITTER_STD) + offset;
            points[id.index()] = Point::new(radius * angle.cos(), radius * angle.sin());
        }
        tracing::debug!(level, radius, nodes = ids.len(), "placed ring");
    }

    Positions { points }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spiral.rs"]
mod tests;
