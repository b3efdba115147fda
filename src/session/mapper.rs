use crate::animate::pulse::{AnimationOpts, animate};
use crate::drift::assign::assign_drift;
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::image::encode_png;
use crate::encode::sink::FrameSink;
use crate::foundation::config::MapperConfig;
use crate::foundation::error::DriftMapResult;
use crate::foundation::random::{DriftRng, seeded};
use crate::graph::generate::generate_graph;
use crate::graph::model::DriftGraph;
use crate::layout::spiral::{Positions, spiral_layout};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuBackend;
use crate::render::static_map::{RenderOpts, render_static};
use crate::report::html::HtmlReport;
use std::path::{Path, PathBuf};

/// Generated drift map plus the state needed to render it.
///
/// Construction validates the configuration, seeds the random stream and runs generation,
/// layout and drift assignment once. Rendering operations continue drawing from the same
/// stream, so a fixed seed and a fixed call sequence reproduce the same outputs.
pub struct DriftMapper {
    config: MapperConfig,
    graph: DriftGraph,
    positions: Positions,
    rng: DriftRng,
    backend: Option<CpuBackend>,
}

impl DriftMapper {
    #[tracing::instrument(skip_all, fields(depth = config.depth, nodes_per_level = config.nodes_per_level, seed = config.seed))]
    pub fn new(config: MapperConfig) -> DriftMapResult<Self> {
        config.validate()?;
        let mut rng = seeded(config.seed);
        let mut graph = generate_graph(&config, &mut rng)?;
        let positions = spiral_layout(&graph, &mut rng);
        assign_drift(&mut graph, &mut rng);
        tracing::info!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            classifiers = graph.classifier_count(),
            "drift map ready"
        );
        Ok(Self {
            config,
            graph,
            positions,
            rng,
            backend: None,
        })
    }

    /// Use `backend` instead of one backed by the system fonts.
    pub fn with_backend(mut self, backend: CpuBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn graph(&self) -> &DriftGraph {
        &self.graph
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    /// Render the static map, optionally saving it (format from the extension).
    pub fn visualize(
        &mut self,
        opts: &RenderOpts,
        save_path: Option<&Path>,
    ) -> DriftMapResult<FrameRGBA> {
        let backend = self.backend.get_or_insert_with(CpuBackend::system);
        render_static(
            &self.graph,
            &self.positions,
            opts,
            backend,
            &mut self.rng,
            save_path,
        )
    }

    /// Stream the animation into any sink.
    pub fn animate_into(
        &mut self,
        opts: &AnimationOpts,
        sink: &mut dyn FrameSink,
    ) -> DriftMapResult<()> {
        let backend = self.backend.get_or_insert_with(CpuBackend::system);
        animate(&self.graph, &self.positions, opts, backend, sink)
    }

    /// Write the looping GIF animation to `path` and return that path.
    pub fn create_animation(
        &mut self,
        path: impl AsRef<Path>,
        opts: &AnimationOpts,
    ) -> DriftMapResult<PathBuf> {
        let path = path.as_ref().to_path_buf();
        let mut sink = GifSink::new(&path, GifSinkOpts { speed: opts.gif_speed });
        self.animate_into(opts, &mut sink)?;
        Ok(path)
    }

    /// Build the HTML report: static map as in-memory PNG, animation written to
    /// `animation_path` and read back.
    #[tracing::instrument(skip_all)]
    pub fn generate_html(
        &mut self,
        render: &RenderOpts,
        animation: &AnimationOpts,
        animation_path: impl AsRef<Path>,
    ) -> DriftMapResult<String> {
        let frame = self.visualize(render, None)?;
        let png = encode_png(&frame)?;
        let gif_path = self.create_animation(animation_path, animation)?;
        let gif = std::fs::read(&gif_path)?;
        tracing::debug!(png_bytes = png.len(), gif_bytes = gif.len(), "embedding artifacts");
        Ok(HtmlReport::render(&png, &gif))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/mapper.rs"]
mod tests;
