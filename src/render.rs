//! Rasterization of applied frame markup and avatar compositing.

pub(crate) mod composite;
pub(crate) mod raster;

#[cfg(test)]
#[path = "../tests/unit/render/render.rs"]
mod tests;
