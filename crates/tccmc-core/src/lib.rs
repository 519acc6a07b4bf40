//! tccmc-core - Tableau model checking for temporal properties of tcc
//! structures
//!
//! Given a labelled finite-state structure and a temporal formula over
//! `^`, `v`, `~`, `o`, `<>` and `[]`, the checker decides whether any
//! initial run of the structure satisfies the formula. It follows the
//! tableau method: compute the closure of the formula, enumerate the atoms
//! of the closure, intersect them with each state's store, build the model
//! checking graph along next-obligations, and search for a reachable
//! self-fulfilling strongly connected component that entails the formula.

pub mod error;
pub mod formula;
pub mod vocabulary;
pub mod closure;
pub mod atoms;
pub mod structure;
pub mod graph;
pub mod search;
pub mod checker;

pub use atoms::{Atom, AtomEngine, ModelAtoms, NodeId};
pub use checker::{CheckReport, ModelChecker, SccVerdict};
pub use closure::closure;
pub use error::{CheckerError, CheckerResult};
pub use formula::{Connective, Formula};
pub use graph::{model_checking_graph, AdjacencyMap};
pub use structure::{StateId, TccState, TccStructure};
pub use vocabulary::{Vocabulary, VocabularyConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_surface() {
        let vocab = Vocabulary::new(vec!["tc"], Vec::<Vec<String>>::new()).unwrap();
        let checker = ModelChecker::new(vocab);
        assert!(checker.vocabulary().contains("tc"));
    }
}
