//! Proposition vocabulary and mutual-exclusion classes
//!
//! The vocabulary is the only tunable of the checker: the set of atomic
//! names that may appear at formula leaves, partitioned into mutex classes
//! (a variable that takes exactly one of several values). For a proposition
//! in a class, the conflict list is the set of literals whose presence in a
//! candidate atom makes the proposition inconsistent. Propositions outside
//! any class have empty conflict lists.

use crate::error::{CheckerError, CheckerResult};
use crate::formula::Formula;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Serializable vocabulary configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub propositions: Vec<String>,
    #[serde(default)]
    pub mutex_classes: Vec<Vec<String>>,
}

/// Declared propositions with their mutex conflict lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    propositions: BTreeSet<String>,
    mutex_classes: Vec<BTreeSet<String>>,
    conflicts: BTreeMap<String, Vec<Formula>>,
}

impl Vocabulary {
    /// Build a vocabulary from atomic names and mutex classes. Every class
    /// member must be a declared proposition.
    pub fn new<P, S, C>(propositions: P, mutex_classes: Vec<Vec<C>>) -> CheckerResult<Self>
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
        C: Into<String>,
    {
        let propositions: BTreeSet<String> = propositions
            .into_iter()
            .map(|name| name.into().trim().to_string())
            .collect();
        if propositions.iter().any(|name| name.is_empty()) {
            return Err(CheckerError::malformed_formula("empty proposition name"));
        }

        let mut classes = Vec::new();
        let mut conflicts: BTreeMap<String, Vec<Formula>> = BTreeMap::new();
        for class in mutex_classes {
            let class: BTreeSet<String> = class
                .into_iter()
                .map(|name| name.into().trim().to_string())
                .collect();
            for member in &class {
                if !propositions.contains(member) {
                    return Err(CheckerError::UndeclaredClassMember {
                        name: member.clone(),
                    });
                }
                // A member conflicts with its own negation and with the
                // positive form of every sibling in the class.
                let mut list = vec![Formula::prop(member.as_str()).negate()];
                list.extend(
                    class
                        .iter()
                        .filter(|sibling| *sibling != member)
                        .map(|sibling| Formula::prop(sibling.as_str())),
                );
                conflicts.insert(member.clone(), list);
            }
            classes.push(class);
        }

        Ok(Vocabulary {
            propositions,
            mutex_classes: classes,
            conflicts,
        })
    }

    /// Build from the serializable configuration form.
    pub fn from_config(config: VocabularyConfig) -> CheckerResult<Self> {
        Self::new(config.propositions, config.mutex_classes)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.propositions.contains(name)
    }

    pub fn propositions(&self) -> impl Iterator<Item = &str> {
        self.propositions.iter().map(String::as_str)
    }

    pub fn mutex_classes(&self) -> &[BTreeSet<String>] {
        &self.mutex_classes
    }

    /// Literals whose presence in an atom rules the proposition out.
    pub fn conflict_list(&self, name: &str) -> &[Formula] {
        self.conflicts.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check that every proposition leaf of a formula is declared. The
    /// vocabulary is closed: an undeclared name is an error, not an
    /// unconstrained proposition.
    pub fn validate_formula(&self, formula: &Formula) -> CheckerResult<()> {
        match formula {
            Formula::Prop(name) => {
                if name.trim().is_empty() {
                    return Err(CheckerError::malformed_formula("empty proposition name"));
                }
                if !self.contains(name.trim()) {
                    return Err(CheckerError::unknown_proposition(name.trim()));
                }
                Ok(())
            }
            Formula::Not(body)
            | Formula::Next(body)
            | Formula::Eventually(body)
            | Formula::Always(body) => self.validate_formula(body),
            Formula::And(left, right) | Formula::Or(left, right) => {
                self.validate_formula(left)?;
                self.validate_formula(right)
            }
        }
    }
}
