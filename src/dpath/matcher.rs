//! Matching a path expression against candidate data.

use super::error::DpathError;
use super::evaluator::Evaluator;
use super::parser::Parser;
use crate::document::node::DataNode;

/// Decides whether a path expression matches a data tree.
///
/// Implementations return `Err` only when the expression itself is not
/// understood; "no match" is `Ok(false)`.
pub trait PathMatcher {
    fn matches(&self, expression: &str, data: &DataNode) -> Result<bool, DpathError>;
}

/// Reference matcher for the expressions produced by the template compiler.
///
/// # Example
///
/// ```
/// use dpath_validator::document::parser::parse_data;
/// use dpath_validator::dpath::{DpathMatcher, PathMatcher};
///
/// let data = parse_data("{foo: [1, 2, 3]}").unwrap();
/// let matcher = DpathMatcher;
/// assert!(matcher.matches("//foo/*[ idx == 1 ]/.[ value == 2 ]", &data).unwrap());
/// assert!(!matcher.matches("//foo/*[ idx == 1 ]/.[ value == 3 ]", &data).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DpathMatcher;

impl PathMatcher for DpathMatcher {
    fn matches(&self, expression: &str, data: &DataNode) -> Result<bool, DpathError> {
        let path = Parser::parse(expression)?;
        Ok(Evaluator::new(data).matches(&path))
    }
}

impl<F> PathMatcher for F
where
    F: Fn(&str, &DataNode) -> Result<bool, DpathError>,
{
    fn matches(&self, expression: &str, data: &DataNode) -> Result<bool, DpathError> {
        self(expression, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_expression_is_an_error() {
        let result = DpathMatcher.matches("no-root", &DataNode::Null);
        assert!(result.is_err());
    }

    #[test]
    fn test_closure_matcher() {
        let always = |_: &str, _: &DataNode| -> Result<bool, DpathError> { Ok(true) };
        assert!(always.matches("anything", &DataNode::Null).unwrap());
    }
}
