//! driftmap generates recursive attribution drift maps.
//!
//! A run builds a synthetic leveled graph with random attribution metadata, places it on
//! concentric spiral rings, derives per-node and per-edge drift and renders the result:
//!
//! - a static figure ([`DriftMapper::visualize`]),
//! - a looping animation streamed into a [`FrameSink`] (GIF via [`GifSink`]),
//! - a self-contained HTML page embedding both ([`DriftMapper::generate_html`]).
//!
//! Everything is driven by one seeded random stream, so a fixed seed and call sequence reproduce
//! the same outputs.
#![forbid(unsafe_code)]

pub mod animate;
pub mod drift;
pub mod encode;
pub mod foundation;
pub mod graph;
pub mod layout;
pub mod render;
pub mod report;
pub mod session;

pub use crate::animate::pulse::{AnimationOpts, edge_opacity};
pub use crate::encode::gif::{DEFAULT_ANIMATION_FILE, GifSink, GifSinkOpts};
pub use crate::encode::image::{encode_png, save_frame};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::config::MapperConfig;
pub use crate::foundation::core::{Canvas, FrameIndex, Point, Rgba8};
pub use crate::foundation::error::{DriftMapError, DriftMapResult};
pub use crate::graph::model::{
    AttributionClass, DriftGraph, Edge, Glyph, Node, NodeId, NodeMetadata,
};
pub use crate::layout::spiral::Positions;
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuBackend;
pub use crate::render::scene::COMMAND_ANNOTATION;
pub use crate::render::static_map::RenderOpts;
pub use crate::render::text::{FaceData, FontBook};
pub use crate::report::html::HtmlReport;
pub use crate::session::mapper::DriftMapper;
