//! Integration tests for the reference path matcher.

use dpath_validator::document::node::DataNode;
use dpath_validator::document::parser::parse_data;
use dpath_validator::dpath::{Axis, DpathError, DpathMatcher, Evaluator, Parser, PathMatcher, Selector};
use dpath_validator::validator::{ValidateError, Validator};
use dpath_validator::{Config, TemplateNode};

fn sample() -> DataNode {
    parse_data(
        r#"
store:
  name: corner
  books:
    - {title: Dune, price: 9.5}
    - {title: Emma, price: 12}
  "opening hours": 9-17
"#,
    )
    .unwrap()
}

#[test]
fn test_descendant_prefix_finds_nested_keys() {
    let data = sample();
    assert!(DpathMatcher.matches("//title/*[ value eq 'Emma' ]", &data).unwrap());
    assert!(DpathMatcher.matches("//books/*[ idx == 0 ]/price/*[ value == 9.5 ]", &data).unwrap());
    assert!(!DpathMatcher.matches("//books/*[ idx == 1 ]/title/*[ value eq 'Dune' ]", &data).unwrap());
}

#[test]
fn test_child_axis_starts_at_root() {
    let data = sample();
    assert!(DpathMatcher.matches("/store/name", &data).unwrap());
    assert!(!DpathMatcher.matches("/name", &data).unwrap());
}

#[test]
fn test_quoted_keys() {
    let data = sample();
    let path = "//\"opening hours\"/*[ value eq '9-17' ]";
    assert!(DpathMatcher.matches(path, &data).unwrap());
}

#[test]
fn test_selected_nodes_are_unique() {
    let data = sample();
    let path = Parser::parse("//*").unwrap();
    let nodes = Evaluator::new(&data).evaluate(&path);

    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            assert!(!std::ptr::eq(*a, *b));
        }
    }
}

#[test]
fn test_parsed_structure() {
    let path = Parser::parse("//foo/*[ idx == 2 ]").unwrap();

    assert_eq!(path.steps.len(), 2);
    assert_eq!(path.steps[0].axis, Axis::DescendantOrSelf);
    assert_eq!(path.steps[0].selector, Selector::Key("foo".to_string()));
    assert_eq!(path.steps[1].axis, Axis::Child);
    assert_eq!(path.steps[1].selector, Selector::AnyChild);
}

#[test]
fn test_malformed_expressions() {
    let data = sample();
    for expression in ["", "store", "//a[ idx == ]", "//a[ value eq 'open", "//a/"] {
        assert!(
            DpathMatcher.matches(expression, &data).is_err(),
            "{:?} should not parse",
            expression
        );
    }
}

#[test]
fn test_matcher_errors_surface_from_validator() {
    let broken = |_: &str, _: &DataNode| -> Result<bool, DpathError> {
        Err(DpathError::InvalidSyntax {
            message: "unsupported".to_string(),
        })
    };
    let mut validator = Validator::with_matcher(&Config::default(), broken);
    validator.load(&TemplateNode::mapping([("a", TemplateNode::Wildcard)]));

    let err = validator.validate_one(&sample()).unwrap_err();
    match err {
        ValidateError::Matcher { expression, .. } => assert_eq!(expression, "//a/*"),
    }
}
