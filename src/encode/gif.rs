use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DriftMapError, DriftMapResult};
use crate::render::backend::FrameRGBA;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default output name for the drift animation.
pub const DEFAULT_ANIMATION_FILE: &str = "qkov_drift_animation.gif";

/// Options for [`GifSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifSinkOpts {
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

/// Streams frames into an infinitely looping animated GIF.
pub struct GifSink {
    path: PathBuf,
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<File>>,
    cfg: Option<SinkConfig>,
    frames_written: u32,
}

impl GifSink {
    pub fn new(path: impl Into<PathBuf>, opts: GifSinkOpts) -> Self {
        Self {
            path: path.into(),
            opts,
            encoder: None,
            cfg: None,
            frames_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> DriftMapResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(DriftMapError::encode("gif sink width/height must be non-zero"));
        }
        if !(1..=30).contains(&self.opts.speed) {
            return Err(DriftMapError::encode("gif speed must be within 1..=30"));
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)?;
        let mut encoder = GifEncoder::new_with_speed(file, self.opts.speed);
        encoder.set_repeat(Repeat::Infinite)?;

        tracing::debug!(
            path = %self.path.display(),
            width = cfg.width,
            height = cfg.height,
            interval_ms = cfg.interval_ms,
            "gif sink opened"
        );
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> DriftMapResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| DriftMapError::encode("gif sink is not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(DriftMapError::encode(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| DriftMapError::encode("gif sink is not started"))?;

        let delay = Delay::from_numer_denom_ms(cfg.interval_ms, 1);
        encoder.encode_frame(Frame::from_parts(frame.to_rgba_image()?, 0, 0, delay))?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> DriftMapResult<()> {
        // the trailer is written when the encoder is dropped
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| DriftMapError::encode("gif sink is not started"))?;
        drop(encoder);
        tracing::info!(
            path = %self.path.display(),
            frames = self.frames_written,
            "gif written"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
