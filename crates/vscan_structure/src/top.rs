//! Top-module inference and hierarchy trees.

use serde::Serialize;
use std::collections::HashSet;

use crate::graph::InstantiationGraph;

/// Modules that instantiate something and are instantiated by nothing.
///
/// When no module qualifies (for instance a lone leaf module), every module
/// that nothing instantiates is returned instead. Several entries mean several
/// independent hierarchies; they are all returned, in collection order.
pub fn find_top_modules(graph: &InstantiationGraph) -> Vec<String> {
    let roots: Vec<String> = graph
        .modules()
        .filter(|m| graph.out_degree(m) > 0 && graph.in_degree(m) == 0)
        .map(str::to_string)
        .collect();
    if !roots.is_empty() {
        return roots;
    }
    graph
        .modules()
        .filter(|m| graph.in_degree(m) == 0)
        .map(str::to_string)
        .collect()
}

/// One module in an instantiation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    /// The module name.
    pub name: String,
    /// Instantiated modules. Empty when the module was already expanded on
    /// the path from the root (`recursive` is then set).
    pub children: Vec<HierarchyNode>,
    /// Set when this module already appears on the path from the root.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub recursive: bool,
}

/// Expands the instantiation tree below `root`.
pub fn hierarchy(graph: &InstantiationGraph, root: &str) -> HierarchyNode {
    let mut path = HashSet::new();
    expand(graph, root, &mut path)
}

fn expand<'g>(
    graph: &'g InstantiationGraph,
    name: &'g str,
    path: &mut HashSet<&'g str>,
) -> HierarchyNode {
    if !path.insert(name) {
        return HierarchyNode {
            name: name.to_string(),
            children: Vec::new(),
            recursive: true,
        };
    }
    let children = graph
        .children(name)
        .into_iter()
        .map(|child| expand(graph, child, path))
        .collect();
    path.remove(name);
    HierarchyNode {
        name: name.to_string(),
        children,
        recursive: false,
    }
}

impl HierarchyNode {
    /// Renders the tree with two-space indentation per level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(0, &mut out);
        out
    }

    fn render_into(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.name);
        if self.recursive {
            out.push_str(" (recursive)");
        }
        out.push('\n');
        for child in &self.children {
            child.render_into(depth + 1, out);
        }
    }
}
