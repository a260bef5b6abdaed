use super::ast::{Axis, DPath, Filter, Selector, Step};
use crate::compiler::emit::looks_like_number;
use crate::document::node::DataNode;
use std::collections::HashSet;

/// A selected node and its position in the parent sequence, if any.
#[derive(Debug, Clone, Copy)]
struct Located<'a> {
    node: &'a DataNode,
    index: Option<usize>,
}

pub struct Evaluator<'a> {
    root: &'a DataNode,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a DataNode) -> Self {
        Evaluator { root }
    }

    /// Evaluates a path and returns every node it selects.
    pub fn evaluate(&self, path: &DPath) -> Vec<&'a DataNode> {
        let mut current = vec![Located {
            node: self.root,
            index: None,
        }];

        for step in &path.steps {
            current = self.evaluate_step(&current, step);
            if current.is_empty() {
                break;
            }
        }

        current.into_iter().map(|located| located.node).collect()
    }

    /// Returns true if the path selects at least one node.
    pub fn matches(&self, path: &DPath) -> bool {
        !self.evaluate(path).is_empty()
    }

    fn evaluate_step(&self, context: &[Located<'a>], step: &Step) -> Vec<Located<'a>> {
        let context = match step.axis {
            Axis::Child => context.to_vec(),
            Axis::DescendantOrSelf => descendants_or_self(context),
        };

        let mut selected = Vec::new();
        for located in context {
            match &step.selector {
                Selector::Key(key) => {
                    if let Some(child) = located.node.get(key) {
                        selected.push(Located {
                            node: child,
                            index: None,
                        });
                    }
                }
                Selector::AnyChild => {
                    if located.node.is_container() {
                        selected.extend(
                            located
                                .node
                                .children()
                                .into_iter()
                                .map(|(index, node)| Located { node, index }),
                        );
                    } else {
                        selected.push(located);
                    }
                }
                Selector::Current => selected.push(located),
            }
        }

        let mut seen = HashSet::new();
        selected
            .into_iter()
            .filter(|located| seen.insert(located.node as *const DataNode))
            .filter(|located| {
                step.filter
                    .as_ref()
                    .map_or(true, |filter| filter_accepts(filter, located))
            })
            .collect()
    }
}

fn filter_accepts(filter: &Filter, located: &Located<'_>) -> bool {
    match filter {
        Filter::Index(idx) => located.index == Some(*idx),
        Filter::NumberEq(expected) => located
            .node
            .text()
            .filter(|text| looks_like_number(text))
            .and_then(|text| text.parse::<f64>().ok())
            .is_some_and(|value| value == *expected),
        Filter::TextEq(expected) => located
            .node
            .text()
            .is_some_and(|text| text == expected.as_str()),
    }
}

/// Collects every context node and all of its descendants, each node once.
fn descendants_or_self<'a>(context: &[Located<'a>]) -> Vec<Located<'a>> {
    fn walk<'a>(
        located: Located<'a>,
        seen: &mut HashSet<*const DataNode>,
        results: &mut Vec<Located<'a>>,
    ) {
        if !seen.insert(located.node as *const DataNode) {
            return;
        }
        results.push(located);
        for (index, child) in located.node.children() {
            walk(Located { node: child, index }, seen, results);
        }
    }

    let mut seen = HashSet::new();
    let mut results = Vec::new();
    for located in context {
        walk(*located, &mut seen, &mut results);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::super::parser::Parser;
    use super::*;
    use indexmap::IndexMap;

    fn make_test_tree() -> DataNode {
        // {"name": "test", "age": 42, "items": ["a", "b", {"deep": 1.5}]}
        let mut deep = IndexMap::new();
        deep.insert("deep".to_string(), DataNode::from(1.5));

        let mut obj = IndexMap::new();
        obj.insert("name".to_string(), DataNode::from("test"));
        obj.insert("age".to_string(), DataNode::from(42_i64));
        obj.insert(
            "items".to_string(),
            DataNode::Sequence(vec![
                DataNode::from("a"),
                DataNode::from("b"),
                DataNode::Mapping(deep),
            ]),
        );
        DataNode::Mapping(obj)
    }

    fn select<'a>(tree: &'a DataNode, expression: &str) -> Vec<&'a DataNode> {
        let path = Parser::parse(expression).unwrap();
        Evaluator::new(tree).evaluate(&path)
    }

    #[test]
    fn test_evaluate_root() {
        let tree = make_test_tree();
        let results = select(&tree, "/");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_container());
    }

    #[test]
    fn test_evaluate_key() {
        let tree = make_test_tree();
        let results = select(&tree, "/name");
        assert_eq!(results, vec![&DataNode::from("test")]);
    }

    #[test]
    fn test_evaluate_any_child() {
        let tree = make_test_tree();
        assert_eq!(select(&tree, "/*").len(), 3);
        assert_eq!(select(&tree, "/items/*").len(), 3);
    }

    #[test]
    fn test_scalar_is_its_own_child() {
        let tree = make_test_tree();
        assert_eq!(select(&tree, "/age/*"), vec![&DataNode::from(42_i64)]);
    }

    #[test]
    fn test_evaluate_index_filter() {
        let tree = make_test_tree();
        assert_eq!(
            select(&tree, "/items/*[ idx == 1 ]"),
            vec![&DataNode::from("b")]
        );
        assert!(select(&tree, "/items/*[ idx == 7 ]").is_empty());
        // mapping values have no index
        assert!(select(&tree, "/*[ idx == 0 ]").is_empty());
    }

    #[test]
    fn test_evaluate_value_filters() {
        let tree = make_test_tree();
        assert_eq!(select(&tree, "/age/.[ value == 42 ]").len(), 1);
        assert_eq!(select(&tree, "/age/.[ value == 42.0 ]").len(), 1);
        assert!(select(&tree, "/age/.[ value == 43 ]").is_empty());
        assert_eq!(select(&tree, "/name/.[ value eq 'test' ]").len(), 1);
        assert!(select(&tree, "/name/.[ value == 0 ]").is_empty());
        assert!(select(&tree, "/items/.[ value eq 'a' ]").is_empty());
    }

    #[test]
    fn test_evaluate_descendant() {
        let tree = make_test_tree();
        assert_eq!(select(&tree, "//deep").len(), 1);
        assert_eq!(select(&tree, "//deep/*[ value == 1.5 ]").len(), 1);
        assert_eq!(
            select(&tree, "//*[ idx == 0 ]/.[ value eq 'a' ]"),
            vec![&DataNode::from("a")]
        );
    }

    #[test]
    fn test_descendants_visited_once() {
        let tree = make_test_tree();
        // root, 3 values, 3 items, 1 deep value
        assert_eq!(select(&tree, "//.").len(), 8);
    }

    #[test]
    fn test_missing_key_selects_nothing() {
        let tree = make_test_tree();
        assert!(select(&tree, "/nope/*").is_empty());
        assert!(select(&tree, "/name/inner").is_empty());
    }
}
