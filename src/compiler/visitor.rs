//! Visitor over template trees.
//!
//! Each node kind has its own `visit_*` method. The default implementations
//! just recurse through the matching `walk_*` function, so an implementor
//! overrides a method, does its own work around the node, and calls the walk
//! function to continue the descent.

use crate::document::template::TemplateNode;
use indexmap::IndexMap;

/// A template leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf<'a> {
    Scalar(&'a str),
    Wildcard,
}

pub trait TemplateVisitor {
    fn visit(&mut self, node: &TemplateNode) {
        walk_node(self, node);
    }

    fn visit_mapping(&mut self, map: &IndexMap<String, TemplateNode>) {
        walk_mapping(self, map);
    }

    fn visit_entry(&mut self, key: &str, value: &TemplateNode) {
        walk_entry(self, key, value);
    }

    fn visit_key(&mut self, key: &str);

    fn visit_value(&mut self, value: &TemplateNode) {
        self.visit(value);
    }

    fn visit_sequence(&mut self, items: &[TemplateNode]) {
        walk_sequence(self, items);
    }

    fn visit_element(&mut self, _index: usize, element: &TemplateNode) {
        self.visit(element);
    }

    fn visit_leaf(&mut self, leaf: Leaf<'_>);
}

/// Dispatches a node to the `visit_*` method for its kind.
pub fn walk_node<V: TemplateVisitor + ?Sized>(visitor: &mut V, node: &TemplateNode) {
    match node {
        TemplateNode::Mapping(map) => visitor.visit_mapping(map),
        TemplateNode::Sequence(items) => visitor.visit_sequence(items),
        TemplateNode::Scalar(text) => visitor.visit_leaf(Leaf::Scalar(text)),
        TemplateNode::Wildcard => visitor.visit_leaf(Leaf::Wildcard),
    }
}

pub fn walk_mapping<V: TemplateVisitor + ?Sized>(
    visitor: &mut V,
    map: &IndexMap<String, TemplateNode>,
) {
    for (key, value) in map {
        visitor.visit_entry(key, value);
    }
}

pub fn walk_entry<V: TemplateVisitor + ?Sized>(visitor: &mut V, key: &str, value: &TemplateNode) {
    visitor.visit_key(key);
    visitor.visit_value(value);
}

pub fn walk_sequence<V: TemplateVisitor + ?Sized>(visitor: &mut V, items: &[TemplateNode]) {
    for (index, item) in items.iter().enumerate() {
        visitor.visit_element(index, item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records visit order.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl TemplateVisitor for Recorder {
        fn visit_key(&mut self, key: &str) {
            self.events.push(format!("key:{}", key));
        }

        fn visit_element(&mut self, index: usize, element: &TemplateNode) {
            self.events.push(format!("elem:{}", index));
            self.visit(element);
        }

        fn visit_leaf(&mut self, leaf: Leaf<'_>) {
            match leaf {
                Leaf::Scalar(text) => self.events.push(format!("scalar:{}", text)),
                Leaf::Wildcard => self.events.push("wildcard".to_string()),
            }
        }
    }

    #[test]
    fn test_walk_order() {
        let template = TemplateNode::mapping([
            ("a", TemplateNode::sequence([TemplateNode::scalar("x"), TemplateNode::Wildcard])),
            ("b", TemplateNode::scalar("y")),
        ]);
        let mut recorder = Recorder::default();
        recorder.visit(&template);
        assert_eq!(
            recorder.events,
            vec!["key:a", "elem:0", "scalar:x", "elem:1", "wildcard", "key:b", "scalar:y"]
        );
    }
}
