//! Template and data trees, and their conversion from YAML/JSON.

pub mod node;
pub mod parser;
pub mod template;

pub use node::{DataNode, Number};
pub use template::TemplateNode;
