//! Self-contained HTML report embedding the rendered artifacts.

/// HTML page with the static map and animation inlined.
pub mod html;
