//! Model checking graph
//!
//! Nodes are the (state, atom) pairs produced by per-state filtering; an
//! edge `n -> m` exists when `m` lives in a tcc successor of `n`'s state
//! and the atom of `m` contains every next-obligation of the atom of `n`.

use crate::atoms::{Atom, ModelAtoms, NodeId};
use crate::formula::Formula;
use crate::structure::TccStructure;
use std::collections::BTreeMap;

/// Successor lists keyed by node id.
pub type AdjacencyMap = BTreeMap<NodeId, Vec<NodeId>>;

/// True when the atom contains every formula that must hold next.
fn satisfies_obligations(obligations: &[Formula], atom: &Atom) -> bool {
    obligations.iter().all(|formula| atom.contains(formula))
}

/// Build the model checking graph over the per-state atoms.
///
/// Every node is present as a key; nodes whose obligations no successor
/// atom meets simply map to an empty list.
pub fn model_checking_graph(structure: &TccStructure, atoms: &ModelAtoms) -> AdjacencyMap {
    let mut graph = AdjacencyMap::new();
    for (&state_id, state) in structure.iter() {
        let Some(table) = atoms.state_table(state_id) else {
            continue;
        };
        for (&node, atom) in table {
            let obligations = atom.next_obligations();
            let mut successors = Vec::new();
            for &next_state in &state.edges {
                let Some(next_table) = atoms.state_table(next_state) else {
                    continue;
                };
                for (&candidate, next_atom) in next_table {
                    if satisfies_obligations(&obligations, next_atom) {
                        successors.push(candidate);
                    }
                }
            }
            graph.insert(node, successors);
        }
    }
    graph
}
