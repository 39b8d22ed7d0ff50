//! Class Graph - inheritance relationships between classes.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: `ClassNode` (a declared class, or an external supertype)
//! - Edges: `Extends` to the parent class, `Implements` to each interface

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use zendgen_core::{ClassDecl, QualifiedName};

/// Edge types in the class graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassEdge {
    /// Class extends its parent.
    Extends,
    /// Class implements an interface.
    Implements,
}

/// Data stored in each class node.
#[derive(Debug, Clone)]
pub struct ClassNode {
    /// Name as first written.
    pub name: QualifiedName,
    /// Whether this extension declares the class.
    pub local: bool,
    /// Whether the class is declared final. Always false for external classes.
    pub is_final: bool,
}

/// Directed inheritance graph, one node per case-folded class name.
///
/// Node indices follow declaration order: declared classes first, then
/// external supertypes in order of first mention.
#[derive(Debug, Default)]
pub struct ClassGraph {
    graph: DiGraph<ClassNode, ClassEdge>,
    index: FxHashMap<String, NodeIndex>,
}

impl ClassGraph {
    /// Build the graph for a list of class declarations.
    ///
    /// A class declared twice keeps its first declaration; the duplicate is
    /// reported by the validator, not here.
    pub fn from_classes(classes: &[ClassDecl]) -> Self {
        let mut graph = Self::default();

        for class in classes {
            graph.node_for(&class.name, Some(class));
        }

        let mut seen = FxHashMap::default();
        for class in classes {
            if seen.insert(class.name.folded(), ()).is_some() {
                continue;
            }
            let from = graph.index[&class.name.folded()];
            if let Some(parent) = &class.parent {
                let to = graph.node_for(parent, None);
                graph.graph.add_edge(from, to, ClassEdge::Extends);
            }
            for interface in &class.interfaces {
                let to = graph.node_for(interface, None);
                graph.graph.add_edge(from, to, ClassEdge::Implements);
            }
        }

        graph
    }

    fn node_for(&mut self, name: &QualifiedName, decl: Option<&ClassDecl>) -> NodeIndex {
        let key = name.folded();
        if let Some(&node) = self.index.get(&key) {
            return node;
        }
        let node = self.graph.add_node(ClassNode {
            name: name.clone(),
            local: decl.is_some(),
            is_final: decl.is_some_and(ClassDecl::is_final),
        });
        self.index.insert(key, node);
        node
    }

    /// Look up a node by class name, ignoring case.
    pub fn get(&self, name: &QualifiedName) -> Option<&ClassNode> {
        self.index
            .get(&name.folded())
            .map(|&node| &self.graph[node])
    }

    /// Number of classes in the graph, external ones included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Direct supertypes of a class in declaration order (parent first).
    pub fn supertypes(&self, name: &QualifiedName) -> Vec<(&ClassNode, ClassEdge)> {
        let Some(&node) = self.index.get(&name.folded()) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .collect();
        edges.sort_by_key(|e| e.id().index());
        edges
            .into_iter()
            .map(|e| (&self.graph[e.target()], *e.weight()))
            .collect()
    }

    /// The parent class, if the class extends one.
    pub fn parent(&self, name: &QualifiedName) -> Option<&ClassNode> {
        self.supertypes(name)
            .into_iter()
            .find(|(_, edge)| *edge == ClassEdge::Extends)
            .map(|(node, _)| node)
    }

    /// Every inheritance cycle, as the classes on it.
    ///
    /// Members of a cycle are listed in declaration order, and cycles are
    /// ordered by their first member.
    pub fn cycles(&self) -> Vec<Vec<&QualifiedName>> {
        let mut cycles: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|mut scc| {
                scc.sort();
                scc
            })
            .collect();
        cycles.sort();

        cycles
            .into_iter()
            .map(|scc| scc.into_iter().map(|n| &self.graph[n].name).collect())
            .collect()
    }
}
