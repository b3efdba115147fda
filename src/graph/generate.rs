use crate::foundation::config::MapperConfig;
use crate::foundation::error::{DriftMapError, DriftMapResult};
use crate::foundation::random::{clamp01, gaussian};
use crate::graph::model::{
    AttributionClass, DriftGraph, Edge, Glyph, Node, NodeId, NodeMetadata,
};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

const ENTROPY_NOISE_STD: f64 = 0.1;
const LOOPBACK_MEAN: f64 = 0.5;
const LOOPBACK_STD: f64 = 0.2;
const INERTIA_MEAN: f64 = 0.4;
const INERTIA_STD: f64 = 0.25;
const MAX_FANOUT: usize = 3;

/// Build the leveled DAG described by `cfg`, drawing every random value from `rng`.
///
/// Nodes are created level by level; edges are created afterwards in node id order.
#[tracing::instrument(skip(rng), fields(depth = cfg.depth, nodes_per_level = cfg.nodes_per_level))]
pub fn generate_graph<R: Rng>(
    cfg: &MapperConfig,
    rng: &mut R,
) -> DriftMapResult<DriftGraph> {
    cfg.validate()?;
    let mut generator = Generator::new(cfg, rng)?;
    let graph = generator.run();
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        levels = ?graph.level_sizes(),
        "generated recursive structure"
    );
    Ok(graph)
}

/// `min(1, position / nodes_per_level + level / depth)`.
pub fn base_entropy(cfg: &MapperConfig, level: u32, position: u32) -> f64 {
    let base = f64::from(position) / f64::from(cfg.nodes_per_level)
        + f64::from(level) / f64::from(cfg.depth);
    base.min(1.0)
}

/// Deterministic part of the glyph rule; `None` means the weighted fallback applies.
pub fn rule_glyph(entropy: f64, level: u32, position: u32, depth: u32) -> Option<Glyph> {
    if entropy > 0.7 {
        return Some(Glyph::Decay);
    }
    let interior = level >= 1 && level + 1 < depth;
    if interior && (0.3..=0.7).contains(&entropy) {
        return Some(Glyph::Feedback);
    }
    if position % 3 == 0 && entropy > 0.4 {
        return Some(Glyph::Contradiction);
    }
    if level == 1 && position % 2 == 0 {
        return Some(Glyph::Classifier);
    }
    None
}

struct Generator<'a, R: Rng> {
    cfg: &'a MapperConfig,
    rng: &'a mut R,
    fallback: WeightedIndex<f64>,
}

impl<'a, R: Rng> Generator<'a, R> {
    fn new(cfg: &'a MapperConfig, rng: &'a mut R) -> DriftMapResult<Self> {
        let fallback = WeightedIndex::new(Glyph::FALLBACK_WEIGHTS).map_err(|e| {
            DriftMapError::Other(anyhow::anyhow!("glyph fallback weights: {e}"))
        })?;
        Ok(Self { cfg, rng, fallback })
    }

    fn run(&mut self) -> DriftGraph {
        let depth = self.cfg.depth;
        let mut graph = DriftGraph {
            depth,
            ..DriftGraph::default()
        };

        for level in 0..depth {
            let count = self.cfg.level_size(level);
            let mut ids = Vec::with_capacity(count);
            for position in 0..count as u32 {
                let id = NodeId(graph.nodes.len() as u32);
                let metadata = self.metadata(level, position);
                graph.nodes.push(Node {
                    id,
                    level,
                    position,
                    metadata,
                    drift: 0.0,
                    is_classifier: false,
                });
                ids.push(id);
            }
            graph.levels.push(ids);
        }

        for node_i in 0..graph.nodes.len() {
            let (id, level) = (graph.nodes[node_i].id, graph.nodes[node_i].level);
            if level + 1 >= depth {
                continue;
            }
            let next = &graph.levels[(level + 1) as usize];
            let fanout = self.rng.gen_range(1..=MAX_FANOUT.min(next.len()));
            let picks = rand::seq::index::sample(&mut *self.rng, next.len(), fanout);
            for pick in picks.iter() {
                graph.edges.push(Edge {
                    source: id,
                    target: next[pick],
                    weight: self.rng.r#gen::<f64>(),
                    drift: 0.0,
                });
            }
        }

        graph
    }

    fn metadata(&mut self, level: u32, position: u32) -> NodeMetadata {
        let base = base_entropy(self.cfg, level, position);
        let entropy = clamp01(base + gaussian(&mut *self.rng, 0.0, ENTROPY_NOISE_STD));
        let loopback_density = clamp01(gaussian(&mut *self.rng, LOOPBACK_MEAN, LOOPBACK_STD));
        let classifier_inertia = clamp01(gaussian(&mut *self.rng, INERTIA_MEAN, INERTIA_STD));
        let glyph = self.glyph(entropy, level, position);

        NodeMetadata {
            recursion_depth: level + 1,
            attribution_entropy: entropy,
            loopback_density,
            classifier_inertia,
            attribution_class: AttributionClass::from_entropy(entropy),
            glyph,
        }
    }

    fn glyph(&mut self, entropy: f64, level: u32, position: u32) -> Glyph {
        rule_glyph(entropy, level, position, self.cfg.depth)
            .unwrap_or_else(|| Glyph::ALL[self.fallback.sample(&mut *self.rng)])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/generate.rs"]
mod tests;
