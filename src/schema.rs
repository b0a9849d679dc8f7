//! Frame schema: the `<config>` block embedded in frame markup.
//!
//! - [`parse_schema`](crate::parse_schema) reads declarations into an ordered [`Schema`](crate::Schema)
//! - [`apply_schema`](crate::apply_schema) writes state back into a document

pub(crate) mod apply;
pub(crate) mod model;
pub(crate) mod parse;

#[cfg(test)]
#[path = "../tests/unit/schema/parse.rs"]
mod parse_tests;

#[cfg(test)]
#[path = "../tests/unit/schema/apply.rs"]
mod apply_tests;
