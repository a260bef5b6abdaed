//! Candidate data representation.
//!
//! `DataNode` is the tree that templates are validated against. It mirrors the
//! usual YAML/JSON data model: ordered mappings, sequences and scalars. Every
//! scalar has a textual form which value predicates compare against.
//!
//! # Example
//!
//! ```
//! use dpath_validator::document::node::{DataNode, Number};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), DataNode::String("dpath".to_string()));
//! map.insert("version".to_string(), DataNode::Number(Number::Integer(1)));
//! let node = DataNode::Mapping(map);
//!
//! assert!(node.is_container());
//! assert_eq!(node.get("version").and_then(|v| v.text()).as_deref(), Some("1"));
//! ```

use indexmap::IndexMap;
use std::borrow::Cow;

/// Represents numbers (integer or float)
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// A node of candidate data.
#[derive(Debug, Clone, PartialEq)]
pub enum DataNode {
    /// Key-value pairs in document order
    Mapping(IndexMap<String, DataNode>),
    /// Ordered elements
    Sequence(Vec<DataNode>),
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

impl DataNode {
    /// Returns true if this node is a mapping or a sequence.
    pub fn is_container(&self) -> bool {
        matches!(self, DataNode::Mapping(_) | DataNode::Sequence(_))
    }

    /// Returns true if this node is a scalar (including null).
    pub fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    /// Returns the textual form of a scalar, or `None` for containers.
    ///
    /// Null renders as the empty string, booleans as `true`/`false`.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            DataNode::String(s) => Some(Cow::Borrowed(s)),
            DataNode::Number(n) => Some(Cow::Owned(n.to_string())),
            DataNode::Boolean(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            DataNode::Null => Some(Cow::Borrowed("")),
            DataNode::Mapping(_) | DataNode::Sequence(_) => None,
        }
    }

    /// Looks up a mapping value by key.
    pub fn get(&self, key: &str) -> Option<&DataNode> {
        match self {
            DataNode::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns the direct children of a container, paired with their
    /// sequence position (`None` for mapping values).
    pub fn children(&self) -> Vec<(Option<usize>, &DataNode)> {
        match self {
            DataNode::Mapping(map) => map.values().map(|child| (None, child)).collect(),
            DataNode::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(idx, child)| (Some(idx), child))
                .collect(),
            _ => vec![],
        }
    }
}

impl From<&str> for DataNode {
    fn from(value: &str) -> Self {
        DataNode::String(value.to_string())
    }
}

impl From<i64> for DataNode {
    fn from(value: i64) -> Self {
        DataNode::Number(Number::Integer(value))
    }
}

impl From<f64> for DataNode {
    fn from(value: f64) -> Self {
        DataNode::Number(Number::Float(value))
    }
}

impl From<bool> for DataNode {
    fn from(value: bool) -> Self {
        DataNode::Boolean(value)
    }
}
