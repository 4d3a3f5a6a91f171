mod csv_sink;
mod ndjson;

use thiserror::Error;

use crate::models::TransactionRecord;

pub use csv_sink::CsvSink;
pub use ndjson::NdjsonSink;

/// Destination for generated records.
///
/// Stands in for the warehouse client: accepts one record at a time and
/// reports success or failure. Retry policy belongs to the caller, never to
/// the sink or the generator.
pub trait TransactionSink {
    fn send(&mut self, record: &TransactionRecord) -> Result<(), SinkError>;
    fn flush(&mut self) -> Result<(), SinkError>;
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sink JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Sink CSV serialization error: {0}")]
    Csv(#[from] csv::Error)
}
