//! Session façade over the generation and rendering pipeline.

/// Drift map session: one generated graph, many outputs.
pub mod mapper;
