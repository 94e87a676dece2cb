//! Still-image output of a rendered frame.

use std::path::Path;

use image::RgbImage;
use tracing::info;

use crate::error::Result;
use crate::framebuffer::FrameBuffer;
use crate::renderer::unpack_rgb;

pub fn to_rgb_image(buf: &FrameBuffer) -> RgbImage {
    let raw: Vec<u8> = buf.pixels().iter().flat_map(|&c| unpack_rgb(c)).collect();
    // length always matches width * height * 3
    RgbImage::from_raw(buf.width() as u32, buf.height() as u32, raw)
        .unwrap_or_else(|| RgbImage::new(buf.width() as u32, buf.height() as u32))
}

/// Encode the frame as PNG at `path`.
pub fn save_png<P: AsRef<Path>>(buf: &FrameBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    to_rgb_image(buf).save_with_format(path, image::ImageFormat::Png)?;
    info!(path = %path.display(), width = buf.width(), height = buf.height(), "snapshot written");
    Ok(())
}
