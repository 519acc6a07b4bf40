//! Temporal formula trees
//!
//! A formula is an immutable tree over the connectives `^`, `v`, `~`, `o`
//! (next), `<>` (eventually) and `[]` (always), with propositions at the
//! leaves. Formulas compare by structure; all classification queries are
//! O(1) on the root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main connective of a formula.
///
/// `None` tags a bare proposition so that every node has a connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Connective {
    /// Bare proposition (empty connective)
    None,
    /// `~`
    Negation,
    /// `o`
    Next,
    /// `<>`
    Eventually,
    /// `[]`
    Always,
    /// `^`
    And,
    /// `v`
    Or,
}

impl Connective {
    /// The symbol used in the surface notation.
    pub fn symbol(&self) -> &'static str {
        match self {
            Connective::None => "",
            Connective::Negation => "~",
            Connective::Next => "o",
            Connective::Eventually => "<>",
            Connective::Always => "[]",
            Connective::And => "^",
            Connective::Or => "v",
        }
    }
}

/// A temporal formula.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Formula {
    Prop(String),
    Not(Box<Formula>),
    Next(Box<Formula>),
    Eventually(Box<Formula>),
    Always(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// A bare proposition. The name is trimmed: serialized legacy input pads
    /// connective keys and proposition names with whitespace.
    pub fn prop(name: impl Into<String>) -> Formula {
        Formula::Prop(name.into().trim().to_string())
    }

    pub fn not(body: Formula) -> Formula {
        Formula::Not(Box::new(body))
    }

    pub fn next(body: Formula) -> Formula {
        Formula::Next(Box::new(body))
    }

    pub fn eventually(body: Formula) -> Formula {
        Formula::Eventually(Box::new(body))
    }

    pub fn always(body: Formula) -> Formula {
        Formula::Always(Box::new(body))
    }

    pub fn and(left: Formula, right: Formula) -> Formula {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Formula {
        Formula::Or(Box::new(left), Box::new(right))
    }

    /// The main connective.
    pub fn connective(&self) -> Connective {
        match self {
            Formula::Prop(_) => Connective::None,
            Formula::Not(_) => Connective::Negation,
            Formula::Next(_) => Connective::Next,
            Formula::Eventually(_) => Connective::Eventually,
            Formula::Always(_) => Connective::Always,
            Formula::And(_, _) => Connective::And,
            Formula::Or(_, _) => Connective::Or,
        }
    }

    /// The unique subformula of a unary connective.
    pub fn unary_body(&self) -> Option<&Formula> {
        match self {
            Formula::Not(body)
            | Formula::Next(body)
            | Formula::Eventually(body)
            | Formula::Always(body) => Some(body),
            _ => None,
        }
    }

    /// The ordered pair of subformulas of `^` / `v`.
    pub fn binary_parts(&self) -> Option<(&Formula, &Formula)> {
        match self {
            Formula::And(left, right) | Formula::Or(left, right) => Some((left, right)),
            _ => None,
        }
    }

    /// Negation in normal form: a double negation strips, negating a bare
    /// proposition flips its tag, anything else is wrapped in `~`.
    pub fn negate(&self) -> Formula {
        match self {
            Formula::Not(inner) => (**inner).clone(),
            other => Formula::Not(Box::new(other.clone())),
        }
    }

    /// A proposition is a bare atomic name or its negation.
    pub fn is_proposition(&self) -> bool {
        match self {
            Formula::Prop(_) => true,
            Formula::Not(inner) => matches!(**inner, Formula::Prop(_)),
            _ => false,
        }
    }

    /// The atomic name and sign of a proposition.
    pub fn as_proposition(&self) -> Option<(&str, bool)> {
        match self {
            Formula::Prop(name) => Some((name, true)),
            Formula::Not(inner) => match &**inner {
                Formula::Prop(name) => Some((name, false)),
                _ => None,
            },
            _ => None,
        }
    }

    /// A negative formula is a `~` over a non-leaf body built with one of
    /// the non-negation connectives.
    pub fn is_negative(&self) -> bool {
        match self {
            Formula::Not(inner) => !matches!(**inner, Formula::Prop(_) | Formula::Not(_)),
            _ => false,
        }
    }

    /// `~ o phi`
    pub fn is_negative_next(&self) -> bool {
        match self {
            Formula::Not(inner) => matches!(**inner, Formula::Next(_)),
            _ => false,
        }
    }

    /// A basic formula is a proposition or an `o`-headed formula whose body
    /// is not itself a negation.
    pub fn is_basic(&self) -> bool {
        match self {
            Formula::Prop(_) => true,
            Formula::Next(inner) => !matches!(**inner, Formula::Not(_)),
            _ => false,
        }
    }

    /// Canonical form: proposition names trimmed and double negations
    /// stripped, recursively. Checker entry points apply this so that the
    /// consistency rules only ever see canonical connectives.
    pub fn normalized(&self) -> Formula {
        match self {
            Formula::Prop(name) => Formula::prop(name.as_str()),
            Formula::Not(inner) => match &**inner {
                Formula::Not(body) => body.normalized(),
                _ => Formula::not(inner.normalized()),
            },
            Formula::Next(body) => Formula::next(body.normalized()),
            Formula::Eventually(body) => Formula::eventually(body.normalized()),
            Formula::Always(body) => Formula::always(body.normalized()),
            Formula::And(left, right) => Formula::and(left.normalized(), right.normalized()),
            Formula::Or(left, right) => Formula::or(left.normalized(), right.normalized()),
        }
    }

    /// Depth of the tree, leaves at zero.
    pub fn depth(&self) -> usize {
        match self {
            Formula::Prop(_) => 0,
            Formula::Not(body)
            | Formula::Next(body)
            | Formula::Eventually(body)
            | Formula::Always(body) => 1 + body.depth(),
            Formula::And(left, right) | Formula::Or(left, right) => {
                1 + left.depth().max(right.depth())
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Prop(name) => write!(f, "{}", name),
            Formula::Not(body) => write!(f, "~{}", body),
            Formula::Next(body) => write!(f, "o {}", body),
            Formula::Eventually(body) => write!(f, "<>{}", body),
            Formula::Always(body) => write!(f, "[]{}", body),
            Formula::And(left, right) => write!(f, "({} ^ {})", left, right),
            Formula::Or(left, right) => write!(f, "({} v {})", left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Formula {
        // <>(in=true ^ ~o x=2)
        Formula::eventually(Formula::and(
            Formula::prop("in=true"),
            Formula::not(Formula::next(Formula::prop("x=2"))),
        ))
    }

    #[test]
    fn test_connective() {
        assert_eq!(sample().connective(), Connective::Eventually);
        assert_eq!(Formula::prop("x=2").connective(), Connective::None);
        assert_eq!(
            Formula::not(Formula::prop("x=2")).connective(),
            Connective::Negation
        );
    }

    #[test]
    fn test_negate_proposition_flips_tag() {
        let p = Formula::prop("x=2");
        assert_eq!(p.negate(), Formula::not(Formula::prop("x=2")));
        assert_eq!(p.negate().negate(), p);
    }

    #[test]
    fn test_negate_wraps_compound() {
        let phi = Formula::next(Formula::prop("x=2"));
        assert_eq!(phi.negate(), Formula::not(phi.clone()));
        assert_eq!(phi.negate().negate(), phi);
    }

    #[test]
    fn test_is_proposition_includes_negated() {
        assert!(Formula::prop("x=2").is_proposition());
        assert!(Formula::not(Formula::prop("x=2")).is_proposition());
        assert!(!Formula::next(Formula::prop("x=2")).is_proposition());
        assert_eq!(
            Formula::not(Formula::prop("x=2")).as_proposition(),
            Some(("x=2", false))
        );
    }

    #[test]
    fn test_is_negative() {
        assert!(Formula::not(Formula::next(Formula::prop("x=2"))).is_negative());
        assert!(sample().negate().is_negative());
        // a negated proposition is not a negative formula
        assert!(!Formula::not(Formula::prop("x=2")).is_negative());
        // neither is a double negation
        let dn = Formula::not(Formula::not(Formula::prop("x=2")));
        assert!(!dn.is_negative());
    }

    #[test]
    fn test_is_negative_next() {
        assert!(Formula::not(Formula::next(Formula::prop("x=2"))).is_negative_next());
        assert!(!Formula::next(Formula::prop("x=2")).is_negative_next());
    }

    #[test]
    fn test_is_basic() {
        assert!(Formula::prop("x=2").is_basic());
        assert!(Formula::next(Formula::prop("x=2")).is_basic());
        assert!(Formula::next(sample()).is_basic());
        // o ~ phi is not basic
        assert!(!Formula::next(Formula::not(Formula::prop("x=2"))).is_basic());
        assert!(!Formula::not(Formula::prop("x=2")).is_basic());
        assert!(!sample().is_basic());
    }

    #[test]
    fn test_normalized_trims_and_strips() {
        let padded = Formula::Prop(" x=2".to_string());
        assert_eq!(padded.normalized(), Formula::prop("x=2"));

        let dn = Formula::not(Formula::not(Formula::prop("x=2")));
        assert_eq!(dn.normalized(), Formula::prop("x=2"));
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "<>(in=true ^ ~o x=2)");
        assert_eq!(
            Formula::always(Formula::prop("da=0")).to_string(),
            "[]da=0"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let phi = sample();
        let json = serde_json::to_string(&phi).unwrap();
        let back: Formula = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phi);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(sample(), sample());
        assert_ne!(sample(), sample().negate());
    }
}
