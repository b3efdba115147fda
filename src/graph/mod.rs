//! Leveled attribution graph: model and procedural generation.

/// Random graph generation.
pub mod generate;
/// Graph, node and glyph types.
pub mod model;
