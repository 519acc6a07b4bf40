//! Closure of a temporal formula
//!
//! `closure(phi)` is the set of subformulas that must be tracked to decide
//! `phi`: each connective contributes its expansion together with the
//! negations and next-shifted forms demanded by the tableau rules. The
//! result is deduplicated by structural equality.

use crate::formula::Formula;
use std::collections::BTreeSet;

/// Compute the closure of a formula.
pub fn closure(phi: &Formula) -> BTreeSet<Formula> {
    let mut set = BTreeSet::new();
    expand(&phi.normalized(), &mut set);
    set
}

fn expand(formula: &Formula, out: &mut BTreeSet<Formula>) {
    // A negative formula expands through its positive form.
    let formula = match formula {
        Formula::Not(inner) if formula.is_negative() => &**inner,
        other => other,
    };

    if let Some((name, _)) = formula.as_proposition() {
        let positive = Formula::prop(name);
        out.insert(positive.negate()); // ~p
        out.insert(positive); // p
        return;
    }

    match formula {
        Formula::And(left, right) | Formula::Or(left, right) => {
            out.insert(formula.clone());
            out.insert(formula.negate());
            expand(left, out);
            expand(right, out);
        }
        Formula::Next(body) => {
            out.insert(formula.clone()); // o phi
            out.insert(formula.negate()); // ~o phi
            out.insert(Formula::next(body.negate())); // o~ phi
            expand(body, out);
        }
        Formula::Eventually(body) | Formula::Always(body) => {
            let next = Formula::next(formula.clone());
            out.insert(formula.clone()); // <> phi
            out.insert(formula.negate()); // ~<> phi
            out.insert(next.clone()); // o<> phi
            out.insert(next.negate()); // ~o<> phi
            out.insert(Formula::next(formula.negate())); // o~<> phi
            expand(body, out);
        }
        // Bare propositions were handled above; a remaining `~` head can
        // only be a double negation, which `normalized` has removed.
        Formula::Prop(_) | Formula::Not(_) => {}
    }
}
