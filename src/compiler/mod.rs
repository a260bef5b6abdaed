//! Template-to-path compiler.
//!
//! A template is walked depth first and every leaf yields one path
//! expression describing the route from the root to that leaf:
//!
//! - mapping keys become literal path segments (`/foo`); keys that are not
//!   plain identifiers (anything beyond alphanumerics, `_` and `-`) are
//!   double-quoted with backslash escapes (`/"a.b"`)
//! - sequence elements become index predicates (`*[ idx == 0 ]`)
//! - scalars become value predicates (`/.[ value == 1 ]`, `/*[ value eq 'x' ]`)
//! - wildcards end the path with `/*`
//!
//! # Example
//!
//! ```
//! use dpath_validator::compiler::compile;
//! use dpath_validator::document::template::TemplateNode;
//!
//! let template = TemplateNode::mapping([(
//!     "foo",
//!     TemplateNode::sequence([TemplateNode::scalar(1), TemplateNode::scalar(2)]),
//! )]);
//!
//! assert_eq!(
//!     compile(&template),
//!     vec![
//!         "//foo/*[ idx == 0 ]/.[ value == 1 ]",
//!         "//foo/*[ idx == 1 ]/.[ value == 2 ]",
//!     ]
//! );
//! ```

pub mod emit;
pub mod state;
pub mod visitor;

use crate::document::template::TemplateNode;
use emit::{equality_fragment, key_segment};
use indexmap::IndexMap;
use state::{SlotKind, TraversalState};
use tracing::{debug, trace};
use visitor::{walk_mapping, walk_node, walk_sequence, Leaf, TemplateVisitor};

pub use state::TraversalStats;

/// Compiles a template with default options.
pub fn compile(root: &TemplateNode) -> Vec<String> {
    PathCompiler::default().compile(root).paths
}

/// Options for [`PathCompiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompilerOptions {
    /// Quote every mapping key, not only those that need it.
    pub quote_all_keys: bool,
}

/// Paths produced by one compilation, with traversal counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub paths: Vec<String>,
    pub stats: TraversalStats,
}

/// Compiles templates into path expressions.
///
/// The compiler itself only holds options; all traversal state lives in a
/// run scoped to a single [`PathCompiler::compile`] call.
#[derive(Debug, Clone, Default)]
pub struct PathCompiler {
    options: CompilerOptions,
}

impl PathCompiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn compile(&self, root: &TemplateNode) -> Compilation {
        let mut run = CompileRun {
            state: TraversalState::new(),
            paths: Vec::new(),
            options: self.options,
        };
        run.visit(root);

        let stats = run.state.stats();
        assert_eq!(stats.enters, stats.leaves, "unbalanced traversal");
        debug!(
            paths = run.paths.len(),
            max_depth = stats.max_depth,
            "compiled template"
        );

        Compilation {
            paths: run.paths,
            stats,
        }
    }
}

struct CompileRun {
    state: TraversalState,
    paths: Vec<String>,
    options: CompilerOptions,
}

impl CompileRun {
    fn emit(&mut self) {
        let path = self.state.path().to_string();
        trace!(path = %path, "emitted path");
        self.paths.push(path);
    }

    /// Appends a value predicate (or `/*` for a wildcard) and emits.
    fn emit_value(&mut self, prefix: &str, leaf: Leaf<'_>) {
        match leaf {
            Leaf::Wildcard => self.state.append("/*"),
            Leaf::Scalar(text) => {
                self.state.append(prefix);
                self.state.append(&equality_fragment(text));
                self.state.append(" ]");
            }
        }
        self.emit();
    }

    fn separator(&mut self) {
        if self.state.depth() > 1 {
            self.state.append("/");
        }
    }
}

impl TemplateVisitor for CompileRun {
    fn visit(&mut self, node: &TemplateNode) {
        let top_level = self.state.depth() == 0;
        if top_level {
            self.state.append("/");
        }

        self.state.dive();
        walk_node(self, node);
        self.state.rise();

        if top_level && self.state.depth() == 0 {
            self.state.clear();
        }
    }

    fn visit_mapping(&mut self, map: &IndexMap<String, TemplateNode>) {
        self.state.dive();
        self.separator();
        walk_mapping(self, map);
        self.state.rise();
    }

    fn visit_entry(&mut self, key: &str, value: &TemplateNode) {
        self.state.dive();

        self.state.set_slot(SlotKind::MapKey);
        self.visit_key(key);
        self.state.set_slot(SlotKind::None);

        self.state.set_slot(SlotKind::MapValue);
        self.visit_value(value);
        self.state.set_slot(SlotKind::None);

        self.state.rise();
    }

    fn visit_key(&mut self, key: &str) {
        self.visit_leaf(Leaf::Scalar(key));
    }

    fn visit_value(&mut self, value: &TemplateNode) {
        walk_node(self, value);
    }

    fn visit_sequence(&mut self, items: &[TemplateNode]) {
        self.state.dive();
        self.separator();
        walk_sequence(self, items);
        self.state.rise();
    }

    fn visit_element(&mut self, index: usize, element: &TemplateNode) {
        self.state.dive();
        self.state.set_slot(SlotKind::ArrayElement);
        self.state.append(&format!("*[ idx == {} ]", index));
        walk_node(self, element);
        self.state.rise();
        self.state.set_slot(SlotKind::None);
    }

    fn visit_leaf(&mut self, leaf: Leaf<'_>) {
        match self.state.slot() {
            SlotKind::ArrayElement => self.emit_value("/.[ value ", leaf),
            SlotKind::MapValue => self.emit_value("/*[ value ", leaf),
            // Keys are always literal text and never emit on their own.
            SlotKind::MapKey => {
                if let Leaf::Scalar(text) = leaf {
                    let segment = key_segment(text, self.options.quote_all_keys);
                    self.state.append(&segment);
                }
            }
            SlotKind::None => match leaf {
                Leaf::Wildcard => {
                    self.state.append("/*");
                    self.emit();
                }
                Leaf::Scalar(_) => self.emit_value(".[ value ", leaf),
            },
        }
    }
}
