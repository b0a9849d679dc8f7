//! Frame-maker session: selection, loading and the render loop.

pub(crate) mod maker;
pub(crate) mod source;

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
