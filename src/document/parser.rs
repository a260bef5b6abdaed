//! Conversion of YAML and JSON text into template and data trees.
//!
//! YAML is parsed with `serde_yaml` (which also accepts JSON documents) and
//! converted into our own node types. Templates treat the configured wildcard
//! glyph as [`TemplateNode::Wildcard`]; every other scalar keeps its text.
//!
//! # Example
//!
//! ```
//! use dpath_validator::document::parser::parse_template;
//! use dpath_validator::document::template::TemplateNode;
//!
//! let template = parse_template("foo: '*'", "*").unwrap();
//! assert_eq!(template, TemplateNode::mapping([("foo", TemplateNode::Wildcard)]));
//! ```

use super::node::{DataNode, Number};
use super::template::TemplateNode;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses a single YAML (or JSON) document into a template.
pub fn parse_template(source: &str, wildcard: &str) -> Result<TemplateNode> {
    let value: YamlValue = serde_yaml::from_str(source).context("Failed to parse template")?;
    Ok(template_from_yaml(&value, wildcard))
}

/// Parses every document of a multi-document YAML stream into templates.
pub fn parse_templates(source: &str, wildcard: &str) -> Result<Vec<TemplateNode>> {
    Ok(parse_yaml_documents(source)?
        .iter()
        .map(|value| template_from_yaml(value, wildcard))
        .collect())
}

/// Parses a single YAML (or JSON) document into candidate data.
pub fn parse_data(source: &str) -> Result<DataNode> {
    let value: YamlValue = serde_yaml::from_str(source).context("Failed to parse data")?;
    Ok(data_from_yaml(&value))
}

/// Parses every document of a multi-document YAML stream into candidates.
pub fn parse_data_documents(source: &str) -> Result<Vec<DataNode>> {
    Ok(parse_yaml_documents(source)?
        .iter()
        .map(data_from_yaml)
        .collect())
}

fn parse_yaml_documents(source: &str) -> Result<Vec<YamlValue>> {
    if source.trim().is_empty() {
        anyhow::bail!("No YAML documents found");
    }

    let mut documents = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(source).enumerate() {
        let value = YamlValue::deserialize(document)
            .with_context(|| format!("Invalid YAML in document {}", index + 1))?;
        documents.push(value);
    }
    Ok(documents)
}

/// Converts a `serde_yaml::Value` into a template.
pub fn template_from_yaml(value: &YamlValue, wildcard: &str) -> TemplateNode {
    match value {
        YamlValue::Mapping(map) => TemplateNode::Mapping(
            map.iter()
                .map(|(k, v)| (key_text(k), template_from_yaml(v, wildcard)))
                .collect(),
        ),
        YamlValue::Sequence(items) => TemplateNode::Sequence(
            items
                .iter()
                .map(|item| template_from_yaml(item, wildcard))
                .collect(),
        ),
        YamlValue::String(s) if s == wildcard => TemplateNode::Wildcard,
        YamlValue::String(s) => TemplateNode::Scalar(s.clone()),
        YamlValue::Number(n) => TemplateNode::Scalar(yaml_number(n).to_string()),
        YamlValue::Bool(b) => TemplateNode::Scalar(b.to_string()),
        YamlValue::Null => TemplateNode::Scalar(String::new()),
        YamlValue::Tagged(tagged) => template_from_yaml(&tagged.value, wildcard),
    }
}

/// Converts a `serde_yaml::Value` into candidate data.
pub fn data_from_yaml(value: &YamlValue) -> DataNode {
    match value {
        YamlValue::Mapping(map) => DataNode::Mapping(
            map.iter()
                .map(|(k, v)| (key_text(k), data_from_yaml(v)))
                .collect(),
        ),
        YamlValue::Sequence(items) => DataNode::Sequence(items.iter().map(data_from_yaml).collect()),
        YamlValue::String(s) => DataNode::String(s.clone()),
        YamlValue::Number(n) => DataNode::Number(yaml_number(n)),
        YamlValue::Bool(b) => DataNode::Boolean(*b),
        YamlValue::Null => DataNode::Null,
        YamlValue::Tagged(tagged) => data_from_yaml(&tagged.value),
    }
}

/// Converts a `serde_json::Value` into candidate data.
pub fn data_from_json(value: &JsonValue) -> DataNode {
    match value {
        JsonValue::Object(map) => DataNode::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), data_from_json(v)))
                .collect(),
        ),
        JsonValue::Array(items) => DataNode::Sequence(items.iter().map(data_from_json).collect()),
        JsonValue::String(s) => DataNode::String(s.clone()),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => DataNode::Number(Number::Integer(i)),
            None => DataNode::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        JsonValue::Bool(b) => DataNode::Boolean(*b),
        JsonValue::Null => DataNode::Null,
    }
}

/// Template and data numbers share one text form, so `.inf` in a template
/// renders the same as `.inf` in data.
fn yaml_number(n: &serde_yaml::Number) -> Number {
    match n.as_i64() {
        Some(i) => Number::Integer(i),
        None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Mapping keys are always text; non-string YAML keys use their scalar form.
fn key_text(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => yaml_number(n).to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => String::new(),
        YamlValue::Tagged(tagged) => key_text(&tagged.value),
        complex => serde_yaml::to_string(complex)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
