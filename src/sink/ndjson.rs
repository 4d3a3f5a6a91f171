use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::TransactionRecord;
use crate::sink::{SinkError, TransactionSink};

/// Writes one JSON object per line, the layout the warehouse `COPY INTO`
/// path expects. The diagnostic `is_anomaly` flag is stripped by the record's
/// serializer, not here.
pub struct NdjsonSink<W: Write> {
    writer: W
}

impl<W: Write> NdjsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl NdjsonSink<BufWriter<File>> {
    /// Opens (and truncates) a file-backed sink at `path`.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TransactionSink for NdjsonSink<W> {
    fn send(&mut self, record: &TransactionRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
