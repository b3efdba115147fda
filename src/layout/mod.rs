//! Spatial placement of graph nodes.

/// Concentric spiral rings keyed by level.
pub mod spiral;
