use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{DriftMapError, DriftMapResult};

/// A rendered frame as RGBA8 pixels.
///
/// Frames leave the CPU backend **premultiplied**; the `premultiplied` flag keeps that explicit at
/// encoder boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Frame filled with one colour.
    pub fn solid(canvas: Canvas, color: Rgba8) -> Self {
        let px = color.to_premul();
        let mut data = vec![0u8; canvas.byte_len()];
        for chunk in data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Raw bytes of the pixel at `(x, y)`, in this frame's alpha convention.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert into a straight-alpha `image` buffer for encoding.
    pub fn to_rgba_image(&self) -> DriftMapResult<image::RgbaImage> {
        let mut bytes = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut bytes);
        }
        image::RgbaImage::from_raw(self.width, self.height, bytes)
            .ok_or_else(|| DriftMapError::encode("frame byte length does not match its size"))
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Source-over composite of premultiplied `src` onto premultiplied `dst` (same size).
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> DriftMapResult<()> {
    if dst.len() != src.len() {
        return Err(DriftMapError::render("premul_over: buffer size mismatch"));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - sa;
        for i in 0..4 {
            let v = u16::from(s[i]) + mul_div255(u16::from(d[i]), inv);
            d[i] = v.min(255) as u8;
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
