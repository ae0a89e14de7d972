//! Dependency analyzer and report.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dependency::{
    resolve_equivalences, CooccurrenceGraph, EquivalenceResolver, FieldPair, PairCardinality,
    PartialOrder,
};
use crate::error::Result;
use crate::input::{Parser, ParserConfig, Record, RecordBatch, SourceMetadata};

/// Configuration for dependency analysis.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Parser configuration for file input.
    pub parser: ParserConfig,
    /// Fields dropped before analysis.
    pub excluded_fields: Vec<String>,
    /// Emit a progress event every this many records (None = never).
    pub progress_interval: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            excluded_fields: Vec::new(),
            progress_interval: Some(10_000),
        }
    }
}

/// Cardinality of one ordered field pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardinalityEntry {
    pub determiner: String,
    pub dependent: String,
    pub cardinality: usize,
}

/// Result of analyzing a batch of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    /// Analyzed fields, in record order.
    pub fields: Vec<String>,
    /// Number of records consumed.
    pub record_count: usize,
    /// Pair cardinalities in computation order.
    pub cardinalities: Vec<CardinalityEntry>,
    /// Mutually determining pairs, alphabetical within each pair.
    pub equivalences: Vec<FieldPair>,
    /// Strict dependencies, determiner first.
    pub ordered: Vec<FieldPair>,
    /// Equivalences after resolution, primary field first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolved: Vec<FieldPair>,
}

impl DependencyReport {
    fn new(graph: &CooccurrenceGraph, cardinality: &PairCardinality, order: PartialOrder) -> Self {
        Self {
            fields: graph.fields().to_vec(),
            record_count: graph.record_count(),
            cardinalities: cardinality
                .iter()
                .map(|(pair, card)| CardinalityEntry {
                    determiner: pair.first().to_string(),
                    dependent: pair.second().to_string(),
                    cardinality: card,
                })
                .collect(),
            equivalences: order.equivalences,
            ordered: order.ordered,
            resolved: Vec::new(),
        }
    }

    /// The classification as a [`PartialOrder`].
    pub fn partial_order(&self) -> PartialOrder {
        PartialOrder {
            equivalences: self.equivalences.clone(),
            ordered: self.ordered.clone(),
        }
    }

    /// Resolve every equivalence with `resolver`.
    ///
    /// On error the report is left unchanged.
    pub fn resolve_with<R>(&mut self, resolver: &mut R) -> Result<()>
    where
        R: EquivalenceResolver + ?Sized,
    {
        self.resolved = resolve_equivalences(&self.equivalences, resolver)?;
        Ok(())
    }

    /// Resolved equivalences followed by strict dependencies.
    pub fn strict_order(&self) -> Vec<FieldPair> {
        self.resolved
            .iter()
            .chain(self.ordered.iter())
            .cloned()
            .collect()
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Infers field dependencies from records.
pub struct DependencyAnalyzer {
    config: AnalyzerConfig,
    parser: Parser,
}

impl DependencyAnalyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Drop the named fields before analysis.
    pub fn with_excluded_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.config.excluded_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Analyze a batch, honoring excluded fields.
    pub fn analyze(&self, batch: &RecordBatch) -> Result<DependencyReport> {
        if self.config.excluded_fields.is_empty() {
            self.analyze_records(batch.records())
        } else {
            let stripped = batch.strip_fields(self.config.excluded_fields.as_slice())?;
            self.analyze_records(stripped.records())
        }
    }

    /// Analyze a record source as-is.
    pub fn analyze_records<'a, I>(&self, records: I) -> Result<DependencyReport>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let interval = self.config.progress_interval.filter(|&n| n > 0);
        let graph = CooccurrenceGraph::build_with_progress(records, |rows| {
            if let Some(n) = interval {
                if rows % n == 0 {
                    debug!(rows, "building co-occurrence graph");
                }
            }
        })?;
        debug!(
            records = graph.record_count(),
            nodes = graph.node_count(),
            "co-occurrence graph built"
        );

        let cardinality = PairCardinality::from_graph(&graph);
        let order = PartialOrder::classify(&cardinality);
        debug!(
            pairs = cardinality.len(),
            equivalences = order.equivalences.len(),
            ordered = order.ordered.len(),
            "partial order classified"
        );

        Ok(DependencyReport::new(&graph, &cardinality, order))
    }

    /// Parse a delimited file and analyze it.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<(DependencyReport, SourceMetadata)> {
        let (batch, source) = self.parser.parse_file(path)?;
        debug!(file = %source.file, rows = source.row_count, "parsed input");

        let report = self.analyze(&batch)?;
        Ok((report, source))
    }
}

impl Default for DependencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
