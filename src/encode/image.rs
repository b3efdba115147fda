use crate::foundation::error::{DriftMapError, DriftMapResult};
use crate::render::backend::FrameRGBA;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Encode a frame as PNG bytes (straight alpha).
pub fn encode_png(frame: &FrameRGBA) -> DriftMapResult<Vec<u8>> {
    let img = DynamicImage::ImageRgba8(frame.to_rgba_image()?);
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}

/// Write a frame to `path`, picking the format from the extension.
///
/// Formats without an alpha channel get the RGB channels only.
pub fn save_frame(frame: &FrameRGBA, path: &Path) -> DriftMapResult<()> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        DriftMapError::encode(format!(
            "cannot infer image format from '{}'",
            path.display()
        ))
    })?;

    let img = DynamicImage::ImageRgba8(frame.to_rgba_image()?);
    let img = if format_has_alpha(format) {
        img
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    };
    img.save_with_format(path, format)?;
    tracing::debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}

fn format_has_alpha(format: ImageFormat) -> bool {
    !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Pnm | ImageFormat::Hdr | ImageFormat::Avif
    )
}

#[cfg(test)]
#[path = "../../tests/unit/encode/image.rs"]
mod tests;
