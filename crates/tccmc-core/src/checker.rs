//! Pipeline orchestration
//!
//! `ModelChecker::check` runs the full tableau pipeline for one formula
//! against one structure and returns the diagnostic report; `satisfies`
//! wraps it in the driver protocol, checking the negation of the
//! user-facing property and declaring the property satisfied exactly when
//! no witness exists.

use crate::atoms::{AtomEngine, ModelAtoms, NodeId};
use crate::closure::closure;
use crate::error::CheckerResult;
use crate::formula::Formula;
use crate::graph::{model_checking_graph, AdjacencyMap};
use crate::search;
use crate::structure::TccStructure;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};

/// Verdict flags for one non-trivial SCC subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SccVerdict {
    /// Nodes of the component (entry nodes not included)
    pub nodes: Vec<NodeId>,
    pub self_fulfilling: bool,
    pub entails_formula: bool,
}

impl SccVerdict {
    /// A component witnesses the formula when both tests pass.
    pub fn is_witness(&self) -> bool {
        self.self_fulfilling && self.entails_formula
    }
}

/// Diagnostic bundle of one checker run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    /// The formula the witness search ran on (normalized)
    pub formula: Formula,
    /// Whether some initial run of the structure satisfies the formula
    pub witness_found: bool,
    /// The closure of the formula
    pub closure: Vec<Formula>,
    /// Number of enumerated atoms (2^basic)
    pub atom_count: usize,
    /// Surviving atoms per state with their node ids
    pub atoms: ModelAtoms,
    /// The model checking graph
    pub graph: AdjacencyMap,
    /// All strongly connected components
    pub components: Vec<Vec<NodeId>>,
    /// Subgraphs of the non-trivial components, entry edges included
    pub subgraphs: Vec<AdjacencyMap>,
    /// Per-subgraph test results, parallel to `subgraphs`
    pub verdicts: Vec<SccVerdict>,
    /// Nodes whose state is initial
    pub initial_nodes: Vec<NodeId>,
}

/// Explicit-state tableau model checker over a fixed vocabulary.
pub struct ModelChecker {
    vocabulary: Vocabulary,
}

impl ModelChecker {
    pub fn new(vocabulary: Vocabulary) -> Self {
        ModelChecker { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Search the structure for an initial run satisfying `phi`.
    ///
    /// Builds the closure, the atoms, the per-state atom table and the
    /// model checking graph, then looks for a reachable non-trivial SCC
    /// that is self-fulfilling and entailed by an initial node.
    pub fn check(&self, phi: &Formula, structure: &TccStructure) -> CheckerResult<CheckReport> {
        let phi = phi.normalized();

        structure.validate()?;
        self.vocabulary.validate_formula(&phi)?;
        for (_, state) in structure.iter() {
            for proposition in &state.store {
                self.vocabulary.validate_formula(&proposition.normalized())?;
            }
        }

        let closure_set = closure(&phi);
        let engine = AtomEngine::new(&self.vocabulary);
        let all_atoms = engine.all_atoms(&closure_set);
        let atom_count = all_atoms.len();
        let atoms = engine.model_atoms(structure, &all_atoms)?;

        let graph = model_checking_graph(structure, &atoms);
        let components = search::strongly_connected_components(&graph);
        let initial_nodes = atoms.initial_nodes(structure);

        let non_trivial = search::non_trivial_components(&components, &graph);
        let mut subgraphs = Vec::with_capacity(non_trivial.len());
        let mut verdicts = Vec::with_capacity(non_trivial.len());
        for component in &non_trivial {
            let subgraph = search::scc_subgraph(component, &graph, &initial_nodes);
            let verdict = SccVerdict {
                nodes: component.clone(),
                self_fulfilling: search::is_self_fulfilling(&subgraph, &initial_nodes, &atoms),
                entails_formula: search::entails_formula(
                    &subgraph,
                    &initial_nodes,
                    &atoms,
                    &phi,
                ),
            };
            subgraphs.push(subgraph);
            verdicts.push(verdict);
        }

        let witness_found = verdicts.iter().any(SccVerdict::is_witness);

        Ok(CheckReport {
            formula: phi,
            witness_found,
            closure: closure_set.into_iter().collect(),
            atom_count,
            atoms,
            graph,
            components,
            subgraphs,
            verdicts,
            initial_nodes,
        })
    }

    /// Driver protocol: the structure satisfies `phi` exactly when no
    /// initial run satisfies its negation.
    pub fn satisfies(&self, phi: &Formula, structure: &TccStructure) -> CheckerResult<bool> {
        let report = self.check(&phi.normalized().negate(), structure)?;
        Ok(!report.witness_found)
    }
}
