use std::path::Path;

use anyhow::Context as _;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::foundation::error::{FrameError, FrameResult};

/// Decode a PNG/JPEG into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> FrameResult<RgbaImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img.to_rgba8())
}

/// Compose the avatar: `photo` stretched to the canvas, then `frame` on top.
///
/// Either layer may be absent; an absent layer leaves the canvas transparent.
pub fn compose(size: u32, photo: Option<&RgbaImage>, frame: Option<&RgbaImage>) -> RgbaImage {
    let mut canvas = RgbaImage::new(size, size);
    for layer in [photo, frame].into_iter().flatten() {
        if layer.dimensions() == (size, size) {
            imageops::overlay(&mut canvas, layer, 0, 0);
        } else {
            let scaled = imageops::resize(layer, size, size, FilterType::Triangle);
            imageops::overlay(&mut canvas, &scaled, 0, 0);
        }
    }
    canvas
}

/// Write `image` as a PNG, creating parent directories.
pub fn write_png(image: &RgbaImage, path: &Path) -> FrameResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| FrameError::render(format!("write png '{}': {e}", path.display())))
}
