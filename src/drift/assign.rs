use crate::foundation::random::{clamp01, gaussian};
use crate::graph::model::{DriftGraph, Glyph, NodeMetadata};
use rand::Rng;

const EDGE_NOISE_STD: f64 = 0.1;
const CLASSIFIER_INERTIA_LOCK: f64 = 0.7;

/// `min(1, entropy * (1 + level / depth))`.
pub fn node_drift(entropy: f64, level: u32, depth: u32) -> f64 {
    (entropy * (1.0 + f64::from(level) / f64::from(depth.max(1)))).min(1.0)
}

/// Classifier glyph, or inertia strictly above 0.7.
pub fn is_classifier(meta: &NodeMetadata) -> bool {
    meta.glyph == Glyph::Classifier || meta.classifier_inertia > CLASSIFIER_INERTIA_LOCK
}

/// Mean of the endpoint drifts plus `noise`, clamped to `[0, 1]`.
pub fn edge_drift(source_drift: f64, target_drift: f64, noise: f64) -> f64 {
    clamp01((source_drift + target_drift) / 2.0 + noise)
}

/// Fill node drift/classifier flags, then edge drift (one noise draw per edge, edge order).
#[tracing::instrument(skip_all, fields(nodes = graph.nodes().len(), edges = graph.edges().len()))]
pub fn assign_drift<R: Rng>(graph: &mut DriftGraph, rng: &mut R) {
    let depth = graph.depth;
    for node in &mut graph.nodes {
        node.drift = node_drift(node.metadata.attribution_entropy, node.level, depth);
        node.is_classifier = is_classifier(&node.metadata);
    }

    let nodes = &graph.nodes;
    for edge in &mut graph.edges {
        let source = nodes[edge.source.index()].drift;
        let target = nodes[edge.target.index()].drift;
        edge.drift = edge_drift(source, target, gaussian(rng, 0.0, EDGE_NOISE_STD));
    }

    tracing::debug!(
        classifiers = graph.classifier_count(),
        "assigned drift values"
    );
}

#[cfg(test)]
#[path = "../../tests/unit/drift/assign.rs"]
mod tests;
