//! Owned SVG document model used by the schema parser and applier.

mod parse;
pub(crate) mod selector;
pub(crate) mod tree;
mod write;

#[cfg(test)]
#[path = "../tests/unit/svg/document.rs"]
mod tests;
