//! Frame, font and palette catalogs consumed by the engine.

pub(crate) mod fonts;
pub(crate) mod frames;
pub(crate) mod palettes;

#[cfg(test)]
#[path = "../tests/unit/catalog/catalog.rs"]
mod tests;
