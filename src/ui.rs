//! Schema-driven control panel.

pub(crate) mod generate;
pub(crate) mod panel;

#[cfg(test)]
#[path = "../tests/unit/ui/generate.rs"]
mod tests;
