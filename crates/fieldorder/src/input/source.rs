//! Record batches and source metadata.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::Record;
use crate::error::{FieldOrderError, Result};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of records (excluding header).
    pub row_count: usize,
    /// Number of fields.
    pub field_count: usize,
    /// When the file was read.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        field_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            field_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// Check that `record` exposes exactly the `expected` fields (in any order).
pub(crate) fn check_schema(row: usize, expected: &[String], record: &Record) -> Result<()> {
    let matches = record.len() == expected.len()
        && expected.iter().all(|f| record.contains_key(f.as_str()));

    if matches {
        Ok(())
    } else {
        Err(FieldOrderError::SchemaMismatch {
            row,
            expected: expected.to_vec(),
            found: record.keys().cloned().collect(),
        })
    }
}

/// A non-empty batch of records sharing one field set.
///
/// Field order is taken from the first record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordBatch {
    fields: Vec<String>,
    records: Vec<Record>,
}

impl RecordBatch {
    /// Create a batch, validating that it is non-empty and uniform.
    pub fn new(records: Vec<Record>) -> Result<Self> {
        let first = records
            .first()
            .ok_or_else(|| FieldOrderError::EmptyData("No records in batch".to_string()))?;
        let fields: Vec<String> = first.keys().cloned().collect();

        for (row, record) in records.iter().enumerate().skip(1) {
            check_schema(row, &fields, record)?;
        }

        Ok(Self { fields, records })
    }

    /// Create a batch from any record source.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self> {
        Self::new(records.into_iter().collect())
    }

    /// Field names in authoritative order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The records of the batch.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed batch.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct values per field, in field order.
    pub fn value_counts(&self) -> IndexMap<String, usize> {
        self.fields
            .iter()
            .map(|field| {
                let distinct: HashSet<_> = self.records.iter().filter_map(|r| r.get(field)).collect();
                (field.clone(), distinct.len())
            })
            .collect()
    }

    /// A copy of the batch without the named fields.
    pub fn strip_fields<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        for name in names {
            if !self.fields.iter().any(|f| f == name.as_ref()) {
                return Err(FieldOrderError::UnknownField(name.as_ref().to_string()));
            }
        }

        let keep = |field: &str| !names.iter().any(|n| n.as_ref() == field);
        let fields: Vec<String> = self.fields.iter().filter(|f| keep(f)).cloned().collect();

        if fields.is_empty() {
            return Err(FieldOrderError::EmptyData("No fields remain after stripping".to_string()));
        }

        let records = self
            .records
            .iter()
            .map(|r| {
                r.iter()
                    .filter(|(k, _)| keep(k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .collect();

        Ok(Self { fields, records })
    }

    /// A batch with every record repeated `times` times, in sequence.
    pub fn repeat(&self, times: usize) -> Result<Self> {
        if times == 0 {
            return Err(FieldOrderError::Config("Repeat count must be at least 1".to_string()));
        }

        let total = self.records.len().checked_mul(times).ok_or_else(|| {
            FieldOrderError::Config(format!(
                "Repeating {} records {} times overflows",
                self.records.len(),
                times
            ))
        })?;

        let mut records = Vec::with_capacity(total);
        for _ in 0..times {
            records.extend(self.records.iter().cloned());
        }

        Ok(Self {
            fields: self.fields.clone(),
            records,
        })
    }
}
