//! Instantiation graph over extracted modules.
//!
//! A module instantiates another when the other's name leads a statement in
//! its body. Statements are approximated twice, by splitting on `;` and by
//! splitting on newlines, and both passes add an edge. A typical one-line
//! instantiation therefore yields two parallel edges. Downstream logic only
//! distinguishes zero from non-zero degree.

use indexmap::{IndexMap, IndexSet};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::module::ModuleCollection;

/// Directed multigraph: an edge `a -> b` per piece of evidence that `a` instantiates `b`.
#[derive(Debug, Default)]
pub struct InstantiationGraph {
    graph: DiGraph<String, ()>,
    nodes: IndexMap<String, NodeIndex>,
}

impl InstantiationGraph {
    /// Builds the graph from every module body in the collection.
    pub fn build(modules: &ModuleCollection) -> Self {
        let mut graph = DiGraph::with_capacity(modules.len(), 0);
        let mut nodes = IndexMap::with_capacity(modules.len());
        for name in modules.names() {
            nodes.insert(name.to_string(), graph.add_node(name.to_string()));
        }

        for record in modules.iter() {
            let from = nodes[record.name.as_str()];
            for word in leading_words(&record.body) {
                if let Some(&to) = nodes.get(word) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        Self { graph, nodes }
    }

    /// Module names in collection order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Number of instantiation edges leaving `name` (0 for unknown names).
    pub fn out_degree(&self, name: &str) -> usize {
        self.degree(name, Direction::Outgoing)
    }

    /// Number of instantiation edges entering `name` (0 for unknown names).
    pub fn in_degree(&self, name: &str) -> usize {
        self.degree(name, Direction::Incoming)
    }

    fn degree(&self, name: &str, dir: Direction) -> usize {
        self.nodes
            .get(name)
            .map_or(0, |&idx| self.graph.edges_directed(idx, dir).count())
    }

    /// Distinct modules instantiated by `name`, in order of first evidence.
    pub fn children(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.nodes.get(name) else {
            return Vec::new();
        };
        // petgraph walks adjacency newest-first.
        let mut targets: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        targets.reverse();
        targets
            .into_iter()
            .map(|t| self.graph[t].as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Builds the instantiation graph of a module collection.
pub fn build_graph(modules: &ModuleCollection) -> InstantiationGraph {
    InstantiationGraph::build(modules)
}

/// First whitespace-delimited word of every `;`-separated and every line fragment.
fn leading_words(body: &str) -> impl Iterator<Item = &str> {
    body.split(';')
        .chain(body.split('\n'))
        .filter_map(|fragment| fragment.split_whitespace().next())
}
