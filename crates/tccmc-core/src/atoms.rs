//! Atoms of the closure
//!
//! An atom is a maximal locally consistent subset of the closure. Atoms are
//! enumerated from all sign assignments to the basic formulas (propositions
//! and `o`-headed members), completed with the `o~psi` forms for absent
//! next formulas, and closed under the consistency rules for the remaining
//! members. Per-state filtering intersects the atom table with each state's
//! store and assigns the node ids used by the rest of the pipeline.

use crate::error::{CheckerError, CheckerResult};
use crate::formula::Formula;
use crate::structure::{StateId, TccStructure};
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier of a model-checking node (a state/atom pair).
pub type NodeId = usize;

/// A set of formulas, locally consistent by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom {
    formulas: BTreeSet<Formula>,
}

impl Atom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, formula: &Formula) -> bool {
        self.formulas.contains(formula)
    }

    /// Insert a formula; returns false if it was already present.
    pub fn insert(&mut self, formula: Formula) -> bool {
        self.formulas.insert(formula)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Formulas with `o` as main connective.
    pub fn next_formulas(&self) -> impl Iterator<Item = &Formula> {
        self.formulas
            .iter()
            .filter(|f| matches!(f, Formula::Next(_)))
    }

    /// Bodies of the `o`-headed members: what must hold in every successor.
    pub fn next_obligations(&self) -> Vec<Formula> {
        self.next_formulas()
            .filter_map(Formula::unary_body)
            .cloned()
            .collect()
    }

    /// Bodies of the `<>`-headed members: what the run must eventually make
    /// true.
    pub fn eventualities(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter().filter_map(|f| match f {
            Formula::Eventually(body) => Some(&**body),
            _ => None,
        })
    }
}

impl FromIterator<Formula> for Atom {
    fn from_iter<I: IntoIterator<Item = Formula>>(iter: I) -> Self {
        Atom {
            formulas: iter.into_iter().collect(),
        }
    }
}

/// Per-state atom table with globally unique node ids.
///
/// Ids are allocated in state-iteration order starting at 1 and are
/// contiguous across states; the `node -> state` index is the single
/// source of identity downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelAtoms {
    states: BTreeMap<StateId, BTreeMap<NodeId, Atom>>,
    index: BTreeMap<NodeId, StateId>,
}

impl ModelAtoms {
    /// Atoms surviving at one state.
    pub fn state_table(&self, state: StateId) -> Option<&BTreeMap<NodeId, Atom>> {
        self.states.get(&state)
    }

    /// The atom identified by a node id.
    pub fn atom(&self, node: NodeId) -> Option<&Atom> {
        let state = self.index.get(&node)?;
        self.states.get(state)?.get(&node)
    }

    /// The state a node belongs to.
    pub fn state_of(&self, node: NodeId) -> Option<StateId> {
        self.index.get(&node).copied()
    }

    pub fn states(&self) -> impl Iterator<Item = (&StateId, &BTreeMap<NodeId, Atom>)> {
        self.states.iter()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.keys().copied()
    }

    pub fn total_nodes(&self) -> usize {
        self.index.len()
    }

    /// Node ids whose state is initial, in id order.
    pub fn initial_nodes(&self, structure: &TccStructure) -> Vec<NodeId> {
        self.index
            .iter()
            .filter(|(_, &state)| {
                structure
                    .get(state)
                    .map(|s| s.initial)
                    .unwrap_or(false)
            })
            .map(|(&node, _)| node)
            .collect()
    }
}

/// Atom enumeration and consistency reasoning over a fixed vocabulary.
pub struct AtomEngine<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> AtomEngine<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        AtomEngine { vocabulary }
    }

    /// The basic formulas of a closure: propositions and `o`-headed members
    /// whose body is not a negation.
    pub fn basic_formulas(closure: &BTreeSet<Formula>) -> Vec<Formula> {
        closure.iter().filter(|f| f.is_basic()).cloned().collect()
    }

    /// Closure members that are neither basic, negation-headed, nor
    /// `o`-headed: the `<>`/`[]`/`^`/`v` formulas forced in by consistency.
    pub fn non_basic_formulas(closure: &BTreeSet<Formula>) -> Vec<Formula> {
        closure
            .iter()
            .filter(|f| {
                matches!(
                    f,
                    Formula::Eventually(_) | Formula::Always(_) | Formula::And(_, _) | Formula::Or(_, _)
                )
            })
            .cloned()
            .collect()
    }

    /// Enumerate all atoms of the closure: one candidate per sign assignment
    /// to the basic formulas, each completed and closed under consistency.
    pub fn all_atoms(&self, closure: &BTreeSet<Formula>) -> Vec<Atom> {
        let basic = Self::basic_formulas(closure);
        let non_basic = Self::non_basic_formulas(closure);
        let count = 1usize << basic.len();

        let mut atoms: Vec<Atom> = (0..count)
            .map(|mask| {
                basic
                    .iter()
                    .enumerate()
                    .map(|(bit, formula)| {
                        if mask & (1 << bit) == 0 {
                            formula.clone()
                        } else {
                            formula.negate()
                        }
                    })
                    .collect()
            })
            .collect();

        // An absent next formula o psi leaves the obligation o~psi behind.
        for formula in &basic {
            if let Formula::Next(body) = formula {
                let shifted = Formula::next(body.negate());
                for atom in &mut atoms {
                    if !atom.contains(formula) {
                        atom.insert(shifted.clone());
                    }
                }
            }
        }

        for formula in &non_basic {
            for atom in &mut atoms {
                if self.consistent(formula, atom) {
                    atom.insert(formula.clone());
                } else {
                    atom.insert(formula.negate());
                }
            }
        }

        atoms
    }

    /// Local consistency of a formula with a (partial) atom. Fails whenever
    /// the negation is already present; otherwise the connective rules of
    /// the tableau apply.
    pub fn consistent(&self, formula: &Formula, atom: &Atom) -> bool {
        if atom.contains(&formula.negate()) {
            return false;
        }
        match formula {
            Formula::Eventually(body) => {
                atom.contains(&Formula::next(formula.clone())) || self.consistent(body, atom)
            }
            Formula::Always(body) => {
                atom.contains(&Formula::next(formula.clone())) && self.consistent(body, atom)
            }
            Formula::And(left, right) => {
                self.consistent(left, atom) && self.consistent(right, atom)
            }
            Formula::Or(left, right) => {
                self.consistent(left, atom) || self.consistent(right, atom)
            }
            Formula::Prop(name) => self
                .vocabulary
                .conflict_list(name)
                .iter()
                .all(|literal| !atom.contains(literal)),
            // A negated proposition only conflicts with its positive form,
            // which the membership check above has already ruled out.
            Formula::Not(inner) if matches!(**inner, Formula::Prop(_)) => true,
            // Basic next and negative next hold only by literal membership.
            Formula::Next(_) => atom.contains(formula),
            Formula::Not(inner) if matches!(**inner, Formula::Next(_)) => atom.contains(formula),
            Formula::Not(_) => false,
        }
    }

    /// Filter the atom table against every state's store and assign node
    /// ids. Each state starts from the full atom list; an atom survives a
    /// store proposition only if consistent with it, and a surviving atom
    /// absorbs the proposition (and the conjuncts of a conjunction).
    pub fn model_atoms(
        &self,
        structure: &TccStructure,
        atoms: &[Atom],
    ) -> CheckerResult<ModelAtoms> {
        let mut states = BTreeMap::new();
        let mut index = BTreeMap::new();
        let mut next_id: NodeId = 1;

        for (&state_id, state) in structure.iter() {
            let mut survivors: Vec<Atom> = atoms.to_vec();
            for proposition in &state.store {
                let proposition = proposition.normalized();
                let mut kept = Vec::with_capacity(survivors.len());
                for mut atom in survivors {
                    if self.consistent(&proposition, &atom) {
                        if let Formula::And(left, right) = &proposition {
                            atom.insert((**left).clone());
                            atom.insert((**right).clone());
                        }
                        atom.insert(proposition.clone());
                        kept.push(atom);
                    }
                }
                survivors = kept;
            }

            // A surviving atom that fails its own store indicates a bug in
            // the filtering above.
            for atom in &survivors {
                for proposition in &state.store {
                    if !self.consistent(&proposition.normalized(), atom) {
                        return Err(CheckerError::internal(format!(
                            "atom at state {} inconsistent with store proposition {}",
                            state_id, proposition
                        )));
                    }
                }
            }

            let mut table = BTreeMap::new();
            for atom in survivors {
                table.insert(next_id, atom);
                index.insert(next_id, state_id);
                next_id += 1;
            }
            states.insert(state_id, table);
        }

        Ok(ModelAtoms { states, index })
    }
}
