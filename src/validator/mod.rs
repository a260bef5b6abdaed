//! Validation of candidate data against loaded templates.
//!
//! Templates are compiled into path expressions when loaded and kept in an
//! append-only collection. Each candidate is then checked against the whole
//! collection:
//!
//! - loose mode (default): passes if any path matches; no paths means fail
//! - strict mode: passes if every path matches; no paths means pass
//!
//! # Example
//!
//! ```
//! use dpath_validator::config::Config;
//! use dpath_validator::document::parser::{parse_data, parse_template};
//! use dpath_validator::validator::Validator;
//!
//! let mut validator = Validator::new(&Config::default());
//! validator.load(&parse_template("foo: '*'", "*").unwrap());
//!
//! let candidates = vec![
//!     parse_data("foo: [1, 2, 3]").unwrap(),
//!     parse_data("foo: {bar: mtfnpy}").unwrap(),
//!     parse_data("bar: 1").unwrap(),
//! ];
//! assert_eq!(validator.validate(&candidates).unwrap(), vec![true, true, false]);
//! ```

use crate::compiler::PathCompiler;
use crate::config::Config;
use crate::document::node::DataNode;
use crate::document::template::TemplateNode;
use crate::dpath::{DpathError, DpathMatcher, PathMatcher};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by [`Validator::validate`].
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The matcher could not evaluate a stored path expression.
    #[error("failed to evaluate path '{expression}': {source}")]
    Matcher {
        expression: String,
        #[source]
        source: DpathError,
    },
}

/// Holds compiled template paths and checks candidates against them.
///
/// The aggregation mode is fixed at construction.
#[derive(Debug, Clone)]
pub struct Validator<M = DpathMatcher> {
    compiler: PathCompiler,
    strict_mode: bool,
    paths: Vec<String>,
    matcher: M,
}

impl Default for Validator<DpathMatcher> {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Validator<DpathMatcher> {
    pub fn new(config: &Config) -> Self {
        Self::with_matcher(config, DpathMatcher)
    }
}

impl<M: PathMatcher> Validator<M> {
    /// Creates a validator that delegates matching to `matcher`.
    pub fn with_matcher(config: &Config, matcher: M) -> Self {
        Self {
            compiler: PathCompiler::new(config.compiler_options()),
            strict_mode: config.strict_mode,
            paths: Vec::new(),
            matcher,
        }
    }

    /// Compiles `template` and appends its paths. Returns how many were added.
    pub fn load(&mut self, template: &TemplateNode) -> usize {
        let compilation = self.compiler.compile(template);
        let added = compilation.paths.len();
        self.paths.extend(compilation.paths);
        debug!(added, total = self.paths.len(), "loaded template");
        added
    }

    /// Loads several templates in order. Returns the total number of paths added.
    pub fn load_all<'t>(&mut self, templates: impl IntoIterator<Item = &'t TemplateNode>) -> usize {
        templates
            .into_iter()
            .map(|template| self.load(template))
            .sum()
    }

    /// Every path expression loaded so far, in load order.
    pub fn templates(&self) -> &[String] {
        &self.paths
    }

    /// Returns one verdict per candidate, in order.
    pub fn validate(&self, candidates: &[DataNode]) -> Result<Vec<bool>, ValidateError> {
        candidates
            .iter()
            .map(|candidate| self.validate_one(candidate))
            .collect()
    }

    /// Checks a single candidate.
    pub fn validate_one(&self, candidate: &DataNode) -> Result<bool, ValidateError> {
        let verdict = if self.strict_mode {
            self.all_match(candidate)?
        } else {
            self.any_match(candidate)?
        };
        debug!(verdict, strict = self.strict_mode, "validated candidate");
        Ok(verdict)
    }

    fn any_match(&self, candidate: &DataNode) -> Result<bool, ValidateError> {
        for path in &self.paths {
            if self.path_matches(path, candidate)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn all_match(&self, candidate: &DataNode) -> Result<bool, ValidateError> {
        for path in &self.paths {
            if !self.path_matches(path, candidate)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn path_matches(&self, path: &str, candidate: &DataNode) -> Result<bool, ValidateError> {
        self.matcher
            .matches(path, candidate)
            .map_err(|source| ValidateError::Matcher {
                expression: path.to_string(),
                source,
            })
    }
}
