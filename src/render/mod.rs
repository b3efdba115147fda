//! CPU rendering of drift maps.
//!
//! Scene compilation produces pixel-space draw lists; the CPU backend rasterizes them with
//! `vello_cpu` and shapes text with `parley`.

/// Frame type and compositing helpers.
pub mod backend;
/// CPU backend implementation.
pub mod cpu;
/// Colour maps and fixed colours.
pub mod palette;
/// Draw list types.
pub mod plan;
/// Graph-to-draw-list compilation.
pub mod scene;
/// Full static figure.
pub mod static_map;
/// Font resolution and text shaping.
pub mod text;
/// World-to-pixel mapping.
pub mod viewport;
