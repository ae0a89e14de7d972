//! fieldorder: functional-dependency inference for tabular records.
//!
//! Given a batch of records that share one set of fields, fieldorder works
//! out which fields determine which others by looking at how their values
//! co-occur. The result is a partial order over fields:
//!
//! - **Equivalences**: pairs that determine each other (one-to-one)
//! - **Ordered pairs**: `A` determines `B` but not the other way round
//!
//! Equivalences can then be turned into strict orderings with an
//! [`EquivalenceResolver`], either interactively or by a fixed policy.
//!
//! # Example
//!
//! ```
//! use fieldorder::{sample, DependencyAnalyzer, FieldPair, RecordBatch};
//!
//! let batch = RecordBatch::new(sample::customer_purchases()).unwrap();
//! let report = DependencyAnalyzer::new().analyze(&batch).unwrap();
//!
//! assert_eq!(report.equivalences, vec![FieldPair::new("city", "city_population")]);
//! ```

pub mod dependency;
pub mod error;
pub mod input;
pub mod sample;

mod analyzer;

pub use analyzer::{AnalyzerConfig, CardinalityEntry, DependencyAnalyzer, DependencyReport};
pub use dependency::{
    partial_order, CooccurrenceGraph, EquivalenceResolver, FieldPair, FieldPriority, FieldValue,
    KeepOrder, PairCardinality, PartialOrder, PromptResolver,
};
pub use error::{FieldOrderError, Result};
pub use input::{record, Parser, ParserConfig, Record, RecordBatch, SourceMetadata, Value};
