//! Template trees.
//!
//! A template has the same shape as candidate data, but every scalar is kept
//! in its textual form and any scalar position may instead hold
//! [`TemplateNode::Wildcard`], meaning "accept any value here".
//!
//! The wildcard is its own variant: `TemplateNode::Scalar("*".into())` is the
//! literal text `*`. Only the document parser maps the configured wildcard
//! glyph onto `Wildcard`.

use indexmap::IndexMap;

/// One position in a template tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Ordered key/value pairs with unique keys
    Mapping(IndexMap<String, TemplateNode>),
    /// Ordered elements
    Sequence(Vec<TemplateNode>),
    /// Text or numeric literal, kept as text
    Scalar(String),
    /// Accepts any value
    Wildcard,
}

impl TemplateNode {
    /// Creates a scalar leaf from anything displayable.
    ///
    /// ```
    /// use dpath_validator::document::template::TemplateNode;
    ///
    /// assert_eq!(TemplateNode::scalar(42), TemplateNode::Scalar("42".to_string()));
    /// ```
    pub fn scalar(value: impl ToString) -> Self {
        TemplateNode::Scalar(value.to_string())
    }

    /// Builds a mapping from `(key, node)` pairs, keeping their order.
    ///
    /// A repeated key keeps its first position and takes the last value.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TemplateNode)>,
    {
        TemplateNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn sequence(items: impl IntoIterator<Item = TemplateNode>) -> Self {
        TemplateNode::Sequence(items.into_iter().collect())
    }

    /// Counts the leaves of this template, i.e. the number of path
    /// expressions it compiles to.
    pub fn leaf_count(&self) -> usize {
        match self {
            TemplateNode::Mapping(map) => map.values().map(TemplateNode::leaf_count).sum(),
            TemplateNode::Sequence(items) => items.iter().map(TemplateNode::leaf_count).sum(),
            TemplateNode::Scalar(_) | TemplateNode::Wildcard => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_star_is_not_wildcard() {
        assert_ne!(TemplateNode::scalar("*"), TemplateNode::Wildcard);
    }

    #[test]
    fn test_leaf_count() {
        let template = TemplateNode::mapping([
            ("a", TemplateNode::sequence([TemplateNode::scalar(1), TemplateNode::scalar(2)])),
            ("b", TemplateNode::Wildcard),
            ("c", TemplateNode::Mapping(IndexMap::new())),
        ]);
        assert_eq!(template.leaf_count(), 3);
    }

    #[test]
    fn test_mapping_keeps_insertion_order() {
        let template = TemplateNode::mapping([
            ("z", TemplateNode::Wildcard),
            ("a", TemplateNode::Wildcard),
        ]);
        match template {
            TemplateNode::Mapping(map) => {
                let keys: Vec<_> = map.keys().cloned().collect();
                assert_eq!(keys, vec!["z", "a"]);
            }
            _ => panic!("Expected mapping"),
        }
    }
}
