//! Pair cardinality: how many values of one field a single value of another sees.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::cooccurrence::CooccurrenceGraph;

/// An ordered pair of field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPair(pub String, pub String);

impl FieldPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self(first.into(), second.into())
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }

    /// The same pair in the opposite direction.
    pub fn flipped(&self) -> Self {
        Self(self.1.clone(), self.0.clone())
    }

    /// Whether both members are the given fields, in either direction.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.0 == a && self.1 == b) || (self.0 == b && self.1 == a)
    }
}

impl fmt::Display for FieldPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Maximum distinct co-occurring values per ordered field pair.
///
/// Pairs keep the order in which the reducer first met them. Fields that
/// never appear together have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCardinality {
    pairs: IndexMap<FieldPair, usize>,
}

impl PairCardinality {
    /// Reduce a co-occurrence graph to pair cardinalities.
    pub fn from_graph(graph: &CooccurrenceGraph) -> Self {
        let mut pairs: IndexMap<FieldPair, usize> = IndexMap::new();

        for (node, neighbors) in graph.iter() {
            let mut counts: IndexMap<&str, usize> = IndexMap::new();
            for neighbor in neighbors {
                *counts.entry(neighbor.field.as_str()).or_insert(0) += 1;
            }

            for (field, count) in counts {
                let max = pairs
                    .entry(FieldPair::new(node.field.as_str(), field))
                    .or_insert(0);
                *max = (*max).max(count);
            }
        }

        Self { pairs }
    }

    /// Cardinality of `(first, second)`, if the fields co-occur.
    pub fn get(&self, first: &str, second: &str) -> Option<usize> {
        self.pairs.get(&FieldPair::new(first, second)).copied()
    }

    /// Whether `first` functionally determines `second`.
    pub fn is_functional(&self, first: &str, second: &str) -> bool {
        self.get(first, second) == Some(1)
    }

    /// Pairs with cardinality exactly one, in reducer order.
    pub fn functional_pairs(&self) -> Vec<FieldPair> {
        self.pairs
            .iter()
            .filter(|(_, card)| **card == 1)
            .map(|(pair, _)| pair.clone())
            .collect()
    }

    /// All pairs and their cardinalities, in reducer order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPair, usize)> {
        self.pairs.iter().map(|(pair, &card)| (pair, card))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
