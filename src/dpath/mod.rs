//! Path expression matcher.
//!
//! The validator only needs the [`PathMatcher`] trait; [`DpathMatcher`] is the
//! implementation used by default and understands every expression the
//! template compiler emits.
//!
//! # Supported Syntax
//!
//! - `/step` - select from the current nodes
//! - `//step` - select from the current nodes and all their descendants
//! - `key` or `"quoted key"` - mapping value under that key
//! - `*` - every child (a scalar is its own single child)
//! - `.` - the current node
//! - `[ idx == N ]` - position N in the parent sequence
//! - `[ value == N ]` - scalar numerically equal to N
//! - `[ value eq 'S' ]` - scalar whose text is S
//!
//! A path matches when it selects at least one node.

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod parser;

pub use ast::{Axis, DPath, Filter, Selector, Step};
pub use error::DpathError;
pub use evaluator::Evaluator;
pub use matcher::{DpathMatcher, PathMatcher};
pub use parser::Parser;
