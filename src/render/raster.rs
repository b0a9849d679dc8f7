use image::RgbaImage;

use crate::foundation::error::{FrameError, FrameResult};

/// Largest raster edge accepted, to avoid pathological allocations.
const MAX_DIM: u32 = 16_384;

/// SVG rasterizer holding parse options (and the font database) across renders.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Rasterizer {
    /// Create a rasterizer. Loading system fonts makes `<text>` render but costs startup time.
    pub fn new(load_system_fonts: bool) -> Self {
        let mut options = usvg::Options::default();
        if load_system_fonts {
            options.fontdb_mut().load_system_fonts();
        }
        Self { options }
    }

    /// Parse and render `markup`, scaled to fill `width` x `height`.
    ///
    /// The result is straight (non-premultiplied) RGBA8.
    pub fn rasterize(&self, markup: &str, width: u32, height: u32) -> FrameResult<RgbaImage> {
        if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
            return Err(FrameError::render(format!(
                "raster size {width}x{height} out of range (1..={MAX_DIM})"
            )));
        }

        let tree = usvg::Tree::from_str(markup, &self.options)
            .map_err(|e| FrameError::render(format!("parse svg tree: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| FrameError::render("failed to allocate svg pixmap"))?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        let mut rgba = pixmap.take();
        unpremultiply_rgba8_in_place(&mut rgba);
        RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| FrameError::render("svg pixmap size mismatch"))
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
