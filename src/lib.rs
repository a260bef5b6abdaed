//! Validate tree-shaped data against structural templates.
//!
//! A template is a data tree in which any scalar may be a wildcard. The
//! [`compiler`] turns each template into one path expression per leaf, and
//! the [`validator`] checks candidates by matching those expressions with a
//! [`dpath::PathMatcher`].
//!
//! ```
//! use dpath_validator::document::parser::{parse_data, parse_template};
//! use dpath_validator::{Config, Validator};
//!
//! let mut validator = Validator::new(&Config::default());
//! validator.load(&parse_template("{name: '*', tags: [rust]}", "*").unwrap());
//!
//! let candidate = parse_data("{name: x, tags: [rust, yaml]}").unwrap();
//! assert!(validator.validate_one(&candidate).unwrap());
//! ```

pub mod compiler;
pub mod config;
pub mod document;
pub mod dpath;
pub mod file;
pub mod validator;

pub use compiler::{compile, PathCompiler};
pub use config::Config;
pub use document::{DataNode, TemplateNode};
pub use validator::{ValidateError, Validator};
