use crate::encode::image::save_frame;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::DriftMapResult;
use crate::graph::model::DriftGraph;
use crate::layout::spiral::Positions;
use crate::render::backend::{FrameRGBA, premul_over_in_place};
use crate::render::cpu::CpuBackend;
use crate::render::palette::BACKGROUND;
use crate::render::scene::{
    StaticLayerStyle, compile_arrows, compile_static_edges, compile_static_layer,
};
use crate::render::viewport::Viewport;
use rand::Rng;
use std::path::Path;

/// Options for the static figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    pub canvas: Canvas,
    pub show_legend: bool,
    pub background: Rgba8,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1400,
                height: 1400,
            },
            show_legend: true,
            background: BACKGROUND,
        }
    }
}

impl RenderOpts {
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = Canvas { width, height };
        self
    }

    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }
}

/// Render the full figure: background, edges, arrows, then the shared static layer.
///
/// Arrow thinning consumes one draw per edge from `rng`. When `save_path` is set the frame is
/// also written there, format chosen by extension.
#[tracing::instrument(skip_all, fields(width = opts.canvas.width, height = opts.canvas.height))]
pub fn render_static<R: Rng>(
    graph: &DriftGraph,
    positions: &Positions,
    opts: &RenderOpts,
    backend: &mut CpuBackend,
    rng: &mut R,
    save_path: Option<&Path>,
) -> DriftMapResult<FrameRGBA> {
    opts.canvas.validate()?;
    let vp = Viewport::fit(positions, opts.canvas);

    let mut below = compile_static_edges(graph, positions, &vp)?;
    below.extend(compile_arrows(graph, positions, &vp, rng)?);
    let mut frame = backend.render(&below, opts.canvas, Some(opts.background))?;

    let overlay = compile_static_layer(
        graph,
        positions,
        &vp,
        StaticLayerStyle::figure(opts.show_legend),
    )?;
    let overlay = backend.render(&overlay, opts.canvas, None)?;
    premul_over_in_place(&mut frame.data, &overlay.data)?;

    if let Some(path) = save_path {
        save_frame(&frame, path)?;
        tracing::info!(path = %path.display(), "saved static map");
    }
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/render/static_map.rs"]
mod tests;
