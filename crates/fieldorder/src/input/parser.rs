//! CSV/TSV record source with delimiter detection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use super::source::{RecordBatch, SourceMetadata};
use super::value::{Record, Value};
use crate::error::{FieldOrderError, Result};

/// Delimiters to try when auto-detecting, tab first so it wins ties.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Rows sampled for delimiter detection, header included.
const SAMPLE_ROWS: usize = 10;

// Leading zeros are not integers: zip codes and padded ids stay text.
static INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(0|[1-9][0-9]*)$").expect("valid integer pattern"));
static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)\.[0-9]+([eE][-+]?[0-9]+)?$").expect("valid float pattern")
});

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Convert numeric-looking cells to numbers.
    pub infer_types: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            infer_types: true,
        }
    }
}

/// Reads delimited files into record batches.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the record batch and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RecordBatch, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |e| FieldOrderError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let batch = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            batch.len(),
            batch.fields().len(),
        );

        Ok((batch, source_metadata))
    }

    /// Parse bytes directly with a known delimiter.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<RecordBatch> {
        if !delimiter.is_ascii() || delimiter == self.config.quote || delimiter == b'\n' {
            return Err(FieldOrderError::InvalidDelimiter(format!(
                "{:?}",
                delimiter as char
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Option<Vec<String>> = if self.config.has_header {
            Some(reader.headers()?.iter().map(|s| s.to_string()).collect())
        } else {
            None
        };

        if let Some(names) = &headers {
            if names.is_empty() {
                return Err(FieldOrderError::EmptyData("No columns found".to_string()));
            }
            check_unique_headers(names)?;
        }

        let mut headers = headers;
        let mut records = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let row = result?;

            // Headerless files name their fields after the first row's width.
            let names = headers.get_or_insert_with(|| {
                (0..row.len()).map(|i| format!("column_{}", i + 1)).collect()
            });

            let record: Record = names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let cell = row.get(i).unwrap_or("");
                    (name.clone(), self.to_value(cell))
                })
                .collect();

            records.push(record);
        }

        if records.is_empty() {
            return Err(FieldOrderError::EmptyData("No data rows found".to_string()));
        }

        RecordBatch::new(records)
    }

    fn to_value(&self, cell: &str) -> Value {
        if self.config.infer_types {
            infer_value(cell)
        } else {
            Value::Text(cell.to_string())
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Header names key the records, so each must appear once.
fn check_unique_headers(names: &[String]) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(FieldOrderError::Parse {
                row: 1,
                column: i + 1,
                message: format!("duplicate column name '{}' in header", name),
            });
        }
    }
    Ok(())
}

/// Convert a raw cell to a typed value.
pub fn infer_value(cell: &str) -> Value {
    let trimmed = cell.trim();

    if INTEGER_PATTERN.is_match(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    if FLOAT_PATTERN.is_match(trimmed) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::Text(cell.to_string())
}

/// Pick the delimiter that splits the header row into the most fields while
/// the rows after it keep that width. Single-column files fall back to comma.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(FieldOrderError::EmptyData("No lines to analyze".to_string()));
    }

    // (delimiter, rows matching the header width, header width)
    let mut best: Option<(u8, usize, usize)> = None;

    for &delim in DELIMITERS {
        let widths: Vec<usize> = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .records()
            .take(SAMPLE_ROWS)
            .map_while(|row| row.ok())
            .map(|row| row.len())
            .collect();

        let Some(&header_width) = widths.first() else {
            continue;
        };
        if header_width < 2 {
            continue;
        }

        let matching = widths.iter().filter(|&&w| w == header_width).count();
        let better = best.is_none_or(|(_, m, w)| (matching, header_width) > (m, w));
        if better {
            best = Some((delim, matching, header_width));
        }
    }

    Ok(best.map_or(b',', |(delim, ..)| delim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_commas_inside_tsv_cells() {
        let data = b"city\tstate\tnote\nBoston\tMA\tnear 02134, 02135\nChicago\tIL\tloop, north\n";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_respects_quoted_header() {
        let data = b"\"zip;code\",city\n02134,Boston\n60601,Chicago\n";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_semicolon_with_decimal_commas() {
        let data = b"zip;price\n02134;510000,50\n60601;390000,25\n";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_single_column_and_empty() {
        assert_eq!(detect_delimiter(b"zipcode\n02134\n60601\n").unwrap(), b',');
        assert!(matches!(
            detect_delimiter(b" \n\n"),
            Err(FieldOrderError::EmptyData(_))
        ));
    }

    #[test]
    fn test_parse_csv_to_records() {
        let parser = Parser::new();
        let data = b"zipcode,city,beds\n02134,Boston,3\n60601,Chicago,2";
        let batch = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(batch.fields(), &["zipcode", "city", "beds"]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.records()[0]["zipcode"], Value::from("02134"));
        assert_eq!(batch.records()[1]["beds"], Value::Integer(2));
    }

    #[test]
    fn test_short_rows_padded() {
        let parser = Parser::new();
        let batch = parser.parse_bytes(b"a,b,c\n1,2\n", b',').unwrap();

        assert_eq!(batch.records()[0]["c"], Value::from(""));
    }

    #[test]
    fn test_headerless_fields_named_by_position() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let batch = parser.parse_bytes(b"x,1\ny,2\n", b',').unwrap();

        assert_eq!(batch.fields(), &["column_1", "column_2"]);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let parser = Parser::new();
        let err = parser.parse_bytes(b"a,a\n1,2\n", b',').unwrap_err();
        assert!(matches!(err, FieldOrderError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_header_reported_at_header_without_rows() {
        let parser = Parser::new();
        let err = parser.parse_bytes(b"zip,city,zip\n", b',').unwrap_err();

        match err {
            FieldOrderError::Parse { row, column, message } => {
                assert_eq!(row, 1);
                assert_eq!(column, 3);
                assert!(message.contains("'zip'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let parser = Parser::new();
        let err = parser.parse_bytes(b"a,b\n", b',').unwrap_err();
        assert!(matches!(err, FieldOrderError::EmptyData(_)));
    }

    #[test]
    fn test_infer_value() {
        assert_eq!(infer_value("42"), Value::Integer(42));
        assert_eq!(infer_value("-7"), Value::Integer(-7));
        assert_eq!(infer_value("0"), Value::Integer(0));
        assert_eq!(infer_value("3.5"), Value::Float(3.5));
        assert_eq!(infer_value("02134"), Value::from("02134"));
        assert_eq!(infer_value("Boston"), Value::from("Boston"));
        assert_eq!(infer_value(""), Value::from(""));
    }

    #[test]
    fn test_infer_types_disabled() {
        let parser = Parser::with_config(ParserConfig {
            infer_types: false,
            ..ParserConfig::default()
        });
        let batch = parser.parse_bytes(b"n\n1\n", b',').unwrap();
        assert_eq!(batch.records()[0]["n"], Value::from("1"));
    }
}
