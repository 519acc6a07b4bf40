//! Search for a self-fulfilling strongly connected component
//!
//! The SCC decomposition itself is delegated to petgraph; this module
//! filters out trivial components, builds each component's subgraph
//! augmented with entry edges from the initial nodes, and runs the
//! self-fulfilment and entailment tests that decide the verdict.

use crate::atoms::{ModelAtoms, NodeId};
use crate::formula::Formula;
use crate::graph::AdjacencyMap;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use std::collections::BTreeSet;

/// Strongly connected components of the graph, each sorted by node id.
///
/// The algorithm is an external capability: an adjacency mapping goes in, a
/// list of components comes out.
pub fn strongly_connected_components(graph: &AdjacencyMap) -> Vec<Vec<NodeId>> {
    let mut g: DiGraphMap<NodeId, ()> = DiGraphMap::new();
    for (&node, successors) in graph {
        g.add_node(node);
        for &succ in successors {
            g.add_edge(node, succ, ());
        }
    }
    let mut components = tarjan_scc(&g);
    for component in &mut components {
        component.sort_unstable();
    }
    components
}

/// A trivial component is a singleton without a self-loop.
fn is_trivial(component: &[NodeId], graph: &AdjacencyMap) -> bool {
    match component {
        [node] => !graph
            .get(node)
            .map(|successors| successors.contains(node))
            .unwrap_or(false),
        _ => false,
    }
}

/// The non-trivial components, in decomposition order.
pub fn non_trivial_components(
    components: &[Vec<NodeId>],
    graph: &AdjacencyMap,
) -> Vec<Vec<NodeId>> {
    components
        .iter()
        .filter(|component| !is_trivial(component, graph))
        .cloned()
        .collect()
}

/// The subgraph of one component: for each member, its successors inside
/// the component; augmented with an entry for every initial node that can
/// step into the component. The entries let the later tests see which
/// initial nodes feed the component.
pub fn scc_subgraph(
    component: &[NodeId],
    graph: &AdjacencyMap,
    initial_nodes: &[NodeId],
) -> AdjacencyMap {
    let members: BTreeSet<NodeId> = component.iter().copied().collect();
    let restrict = |node: NodeId| -> Vec<NodeId> {
        graph
            .get(&node)
            .map(|successors| {
                let inside: BTreeSet<NodeId> = successors
                    .iter()
                    .copied()
                    .filter(|succ| members.contains(succ))
                    .collect();
                inside.into_iter().collect()
            })
            .unwrap_or_default()
    };

    let mut subgraph = AdjacencyMap::new();
    for &node in component {
        let inside = restrict(node);
        if !inside.is_empty() {
            subgraph.insert(node, inside);
        }
    }
    for &node in initial_nodes {
        let inside = restrict(node);
        if !inside.is_empty() {
            subgraph.insert(node, inside);
        }
    }
    subgraph
}

/// A subgraph is self-fulfilling when every eventuality demanded by a
/// non-initial node is realised at some non-initial node of the subgraph.
pub fn is_self_fulfilling(
    subgraph: &AdjacencyMap,
    initial_nodes: &[NodeId],
    atoms: &ModelAtoms,
) -> bool {
    let loop_nodes: Vec<NodeId> = subgraph
        .keys()
        .copied()
        .filter(|node| !initial_nodes.contains(node))
        .collect();

    for &node in &loop_nodes {
        let Some(atom) = atoms.atom(node) else {
            return false;
        };
        for eventuality in atom.eventualities() {
            let discharged = loop_nodes.iter().any(|&other| {
                atoms
                    .atom(other)
                    .map(|a| a.contains(eventuality))
                    .unwrap_or(false)
            });
            if !discharged {
                return false;
            }
        }
    }
    true
}

/// A subgraph entails the formula when some initial node in it carries the
/// formula in its atom.
pub fn entails_formula(
    subgraph: &AdjacencyMap,
    initial_nodes: &[NodeId],
    atoms: &ModelAtoms,
    formula: &Formula,
) -> bool {
    subgraph
        .keys()
        .filter(|node| initial_nodes.contains(node))
        .any(|&node| {
            atoms
                .atom(node)
                .map(|atom| atom.contains(formula))
                .unwrap_or(false)
        })
}
