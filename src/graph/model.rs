use std::fmt;

/// Dense node id, assigned in generation order (level-major, then position).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Symbolic marker decorating a node.
///
/// Declaration order matters: it is the order of the weighted fallback choice and of the legend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    /// Decayed attribution.
    Decay,
    /// Feedback loop.
    Feedback,
    /// Recursive contradiction.
    Contradiction,
    /// Classifier inertia.
    Classifier,
}

impl Glyph {
    pub const ALL: [Glyph; 4] = [
        Glyph::Decay,
        Glyph::Feedback,
        Glyph::Contradiction,
        Glyph::Classifier,
    ];

    /// Fallback weights, aligned with [`Glyph::ALL`].
    pub const FALLBACK_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];

    pub fn symbol(self) -> &'static str {
        match self {
            Glyph::Decay => "∴",
            Glyph::Feedback => "⇌",
            Glyph::Contradiction => "☍",
            Glyph::Classifier => "⧖",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Glyph::Decay => "Decayed Attribution",
            Glyph::Feedback => "Feedback Loop",
            Glyph::Contradiction => "Recursive Contradiction",
            Glyph::Classifier => "Classifier Inertia",
        }
    }
}

/// Coarse bucket of attribution entropy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionClass {
    Strong,
    Moderate,
    Weak,
}

impl AttributionClass {
    /// `< 0.3` strong, `< 0.7` moderate, otherwise weak.
    pub fn from_entropy(entropy: f64) -> Self {
        if entropy < 0.3 {
            AttributionClass::Strong
        } else if entropy < 0.7 {
            AttributionClass::Moderate
        } else {
            AttributionClass::Weak
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttributionClass::Strong => "strong",
            AttributionClass::Moderate => "moderate",
            AttributionClass::Weak => "weak",
        }
    }
}

/// Synthetic per-node record produced at generation time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeMetadata {
    /// `level + 1`.
    pub recursion_depth: u32,
    pub attribution_entropy: f64,
    pub loopback_density: f64,
    pub classifier_inertia: f64,
    pub attribution_class: AttributionClass,
    pub glyph: Glyph,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub level: u32,
    /// Index within the level.
    pub position: u32,
    pub metadata: NodeMetadata,
    /// Written once by the drift pass.
    pub drift: f64,
    /// Written once by the drift pass.
    pub is_classifier: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Decorative; nothing reads it.
    pub weight: f64,
    /// Written once by the drift pass.
    pub drift: f64,
}

/// Leveled DAG: edges only run from level `L` to `L + 1`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DriftGraph {
    pub(crate) depth: u32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) levels: Vec<Vec<NodeId>>,
}

impl DriftGraph {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Node ids of `level` in position order; empty for levels past the depth.
    pub fn level(&self, level: u32) -> &[NodeId] {
        self.levels
            .get(level as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn level_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }

    pub fn out_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn classifier_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_classifier).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
