//! Field dependency inference from value co-occurrence.
//!
//! The pipeline has three stages:
//!
//! 1. [`CooccurrenceGraph`] links every `(field, value)` to the values it
//!    appears alongside.
//! 2. [`PairCardinality`] reduces the graph to, for each ordered field pair
//!    `(A, B)`, the most distinct `B` values any single `A` value sees.
//! 3. [`PartialOrder`] classifies pairs with cardinality one as either
//!    equivalences (both directions) or strict orderings.
//!
//! A cardinality of one is taken at face value: a pair seen in a single
//! record is functional even though the data cannot distinguish a real
//! dependency from a coincidence.

mod cardinality;
mod cooccurrence;
mod order;
mod resolve;

pub use cardinality::{FieldPair, PairCardinality};
pub use cooccurrence::{CooccurrenceGraph, FieldValue};
pub use order::PartialOrder;
pub use resolve::{
    choose, resolve_equivalences, EquivalenceResolver, FieldPriority, KeepOrder, PromptResolver,
};

use crate::error::Result;
use crate::input::Record;

/// Run the full pipeline over a record source.
pub fn partial_order<'a, I>(records: I) -> Result<PartialOrder>
where
    I: IntoIterator<Item = &'a Record>,
{
    let graph = CooccurrenceGraph::build(records)?;
    Ok(PartialOrder::classify(&PairCardinality::from_graph(&graph)))
}
