//! Partial order classification of functional field pairs.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::cardinality::{FieldPair, PairCardinality};

/// Equivalent and strictly ordered field pairs.
///
/// Equivalences are reported once, alphabetically smaller field first.
/// Ordered pairs put the determining field first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialOrder {
    pub equivalences: Vec<FieldPair>,
    pub ordered: Vec<FieldPair>,
}

impl PartialOrder {
    /// Classify the functional pairs of a cardinality table.
    pub fn classify(cardinality: &PairCardinality) -> Self {
        Self::from_functional_pairs(&cardinality.functional_pairs())
    }

    /// Split functional pairs into equivalences and strict orderings,
    /// preserving the order of `pairs`.
    pub fn from_functional_pairs(pairs: &[FieldPair]) -> Self {
        let functional: IndexSet<&FieldPair> = pairs.iter().collect();
        let mut order = Self::default();

        for pair in pairs {
            if functional.contains(&pair.flipped()) {
                if pair.first() < pair.second() {
                    trace!(%pair, "equivalent fields");
                    order.equivalences.push(pair.clone());
                }
            } else {
                trace!(%pair, "ordered fields");
                order.ordered.push(pair.clone());
            }
        }

        order
    }

    pub fn is_empty(&self) -> bool {
        self.equivalences.is_empty() && self.ordered.is_empty()
    }

    /// Fields strictly determined by `field`, in output order.
    pub fn dependents_of<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.ordered
            .iter()
            .filter(move |p| p.first() == field)
            .map(|p| p.second())
    }

    /// Fields equivalent to `field`.
    pub fn equivalents_of<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.equivalences.iter().filter_map(move |p| {
            if p.first() == field {
                Some(p.second())
            } else if p.second() == field {
                Some(p.first())
            } else {
                None
            }
        })
    }
}
