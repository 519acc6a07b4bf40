//! tcc structures
//!
//! A tcc structure is a labelled directed graph of states. Each state
//! carries a propositional store (formulas true in that state), successor
//! edges, an initial flag, and the `normal`/`temporal` annotations of the
//! source system, which the checker carries through untouched.

use crate::error::{CheckerError, CheckerResult};
use crate::formula::Formula;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a tcc state.
pub type StateId = usize;

/// A single tcc state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TccState {
    /// Propositional formulas holding in this state
    pub store: Vec<Formula>,
    /// Successor states
    pub edges: Vec<StateId>,
    /// Whether runs may begin here
    pub initial: bool,
    /// Opaque annotation carried through from the source system
    #[serde(default)]
    pub normal: Vec<String>,
    /// Opaque annotation carried through from the source system
    #[serde(default)]
    pub temporal: Vec<String>,
}

impl TccState {
    pub fn new(store: Vec<Formula>, edges: Vec<StateId>, initial: bool) -> Self {
        TccState {
            store,
            edges,
            initial,
            normal: Vec::new(),
            temporal: Vec::new(),
        }
    }
}

/// A finite tcc structure: states keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TccStructure {
    states: BTreeMap<StateId, TccState>,
}

impl TccStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: StateId, state: TccState) {
        self.states.insert(id, state);
    }

    pub fn get(&self, id: StateId) -> Option<&TccState> {
        self.states.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateId, &TccState)> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States flagged as initial, in id order.
    pub fn initial_states(&self) -> Vec<StateId> {
        self.states
            .iter()
            .filter(|(_, state)| state.initial)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Every edge must point at an existing state.
    pub fn validate(&self) -> CheckerResult<()> {
        for (&id, state) in &self.states {
            for &target in &state.edges {
                if !self.states.contains_key(&target) {
                    return Err(CheckerError::UndefinedState {
                        from: id,
                        to: target,
                    });
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<(StateId, TccState)> for TccStructure {
    fn from_iter<I: IntoIterator<Item = (StateId, TccState)>>(iter: I) -> Self {
        TccStructure {
            states: iter.into_iter().collect(),
        }
    }
}
