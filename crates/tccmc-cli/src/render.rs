//! DOT rendering of model checking graphs
//!
//! Diagnostic output only; the checker runs without it. Nodes are drawn as
//! circles in a left-to-right layout with `vee` arrowheads, coloured
//! cyclically from a fixed palette by node id.

use std::collections::BTreeSet;
use tccmc_core::{AdjacencyMap, NodeId};

/// Node colours, cycled by `node_id % PALETTE.len()`.
pub const PALETTE: [&str; 26] = [
    "red",
    "blue",
    "orange",
    "violet",
    "red",
    "salmon2",
    "deepskyblue",
    "burlywood2",
    "greenyellow",
    "darkseagreen",
    "thistle2",
    "dodgerblue1",
    "darkolivegreen3",
    "chocolate",
    "turquoise3",
    "steelblue3",
    "navy",
    "coral",
    "blanchedalmond",
    "darkorange1",
    "goldenrod3",
    "firebrick",
    "chartreuse4",
    "crimson",
    "darkorange1",
    "darkolivegreen4",
];

fn colour(node: NodeId) -> &'static str {
    PALETTE[node % PALETTE.len()]
}

/// Render an adjacency map as a DOT digraph.
pub fn dot(graph: &AdjacencyMap) -> String {
    let mut nodes: BTreeSet<NodeId> = graph.keys().copied().collect();
    for successors in graph.values() {
        nodes.extend(successors.iter().copied());
    }

    let mut out = String::from("digraph {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    node [shape=circle];\n");
    out.push_str("    edge [arrowhead=vee];\n");
    for &node in &nodes {
        out.push_str(&format!(
            "    {} [color={}, fontcolor={}];\n",
            node,
            colour(node),
            colour(node)
        ));
    }
    for (&node, successors) in graph {
        for &succ in successors {
            out.push_str(&format!(
                "    {} -> {} [color={}];\n",
                node,
                succ,
                colour(node)
            ));
        }
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_output_shape() {
        let graph: AdjacencyMap = [(3, vec![11, 13]), (11, vec![11, 13]), (13, vec![3])]
            .into_iter()
            .collect();
        let text = dot(&graph);
        assert!(text.starts_with("digraph {"));
        assert!(text.contains("rankdir=LR;"));
        assert!(text.contains("node [shape=circle];"));
        assert!(text.contains("edge [arrowhead=vee];"));
        assert!(text.contains("3 -> 11"));
        assert!(text.contains("11 -> 13"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_targets_without_entries_are_declared() {
        let graph: AdjacencyMap = [(1, vec![2])].into_iter().collect();
        let text = dot(&graph);
        assert!(text.contains(&format!("2 [color={}", colour(2))));
    }

    #[test]
    fn test_colour_cycles() {
        assert_eq!(colour(0), colour(PALETTE.len()));
        assert_eq!(colour(3), "violet");
    }
}
