//! Abstract syntax tree types for path expressions.

/// How a step reaches its candidates from the context nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `/` - the context nodes themselves
    Child,
    /// `//` - every context node and all of its descendants
    DescendantOrSelf,
}

/// What a step selects.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Named mapping entry (`foo` or `"foo bar"`)
    Key(String),
    /// Every child (`*`); a scalar counts as its own single child
    AnyChild,
    /// The node itself (`.`)
    Current,
}

/// Predicate in brackets after a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `[ idx == N ]` - position within the parent sequence
    Index(usize),
    /// `[ value == N ]` - numeric equality
    NumberEq(f64),
    /// `[ value eq 'S' ]` - string equality
    TextEq(String),
}

/// One `/`-separated step of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub axis: Axis,
    pub selector: Selector,
    pub filter: Option<Filter>,
}

/// A complete path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct DPath {
    /// Steps in evaluation order. An empty path (`/`) selects the root.
    pub steps: Vec<Step>,
}

impl DPath {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}
