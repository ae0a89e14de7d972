//! Record model and record sources.

mod parser;
mod source;
mod value;

pub use parser::{infer_value, Parser, ParserConfig};
pub use source::{RecordBatch, SourceMetadata};
pub(crate) use source::check_schema;
pub use value::{record, Record, Value};
