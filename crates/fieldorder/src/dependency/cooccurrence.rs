//! Field-value co-occurrence graph.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FieldOrderError, Result};
use crate::input::{check_schema, Record, Value};

/// A `(field, value)` node of the co-occurrence graph.
///
/// Nodes order by value first, then by field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldValue {
    pub field: String,
    pub value: Value,
}

impl FieldValue {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.field.cmp(&other.field))
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

/// Symmetric co-occurrence sets over a batch of records.
///
/// Nodes keep first-seen order; each node's neighbors are a value-ordered
/// set, so repeated records add nothing.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceGraph {
    fields: Vec<String>,
    record_count: usize,
    links: IndexMap<FieldValue, BTreeSet<FieldValue>>,
}

impl CooccurrenceGraph {
    /// Build the graph from a record source.
    pub fn build<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        Self::build_with_progress(records, |_| {})
    }

    /// Build the graph, calling `on_row` with the running record count.
    ///
    /// Field names come from the first record; any later record with a
    /// different field set fails with [`FieldOrderError::SchemaMismatch`].
    pub fn build_with_progress<'a, I, F>(records: I, mut on_row: F) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Record>,
        F: FnMut(usize),
    {
        let mut graph = Self::default();
        let mut fields: Option<Vec<String>> = None;

        for (row, record) in records.into_iter().enumerate() {
            let fields = fields.get_or_insert_with(|| record.keys().cloned().collect());
            if row > 0 {
                check_schema(row, fields, record)?;
            }

            let nodes: Vec<FieldValue> = fields
                .iter()
                .map(|f| FieldValue::new(f.as_str(), record[f.as_str()].clone()))
                .collect();

            for (i, a) in nodes.iter().enumerate() {
                for (j, b) in nodes.iter().enumerate() {
                    if i != j {
                        graph.link(a, b);
                        graph.link(b, a);
                    }
                }
            }

            graph.record_count += 1;
            on_row(graph.record_count);
        }

        graph.fields = fields
            .ok_or_else(|| FieldOrderError::EmptyData("No records to analyze".to_string()))?;

        Ok(graph)
    }

    fn link(&mut self, from: &FieldValue, to: &FieldValue) {
        match self.links.get_mut(from) {
            Some(set) => {
                if !set.contains(to) {
                    set.insert(to.clone());
                }
            }
            None => {
                self.links.insert(from.clone(), BTreeSet::from([to.clone()]));
            }
        }
    }

    /// Field names in first-record order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of records consumed.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of distinct field-value nodes.
    pub fn node_count(&self) -> usize {
        self.links.len()
    }

    /// Neighbors of a node, if it was seen.
    pub fn neighbors(&self, node: &FieldValue) -> Option<&BTreeSet<FieldValue>> {
        self.links.get(node)
    }

    /// Nodes and their neighbor sets in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldValue, &BTreeSet<FieldValue>)> {
        self.links.iter()
    }
}
