//! File input for templates and candidate data.

pub mod loader;
