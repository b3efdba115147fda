//! Frame encoding: still images and animation sinks.

/// Animated GIF sink.
pub mod gif;
/// Still-image encoding (PNG in memory, any `image` format on disk).
pub mod image;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
