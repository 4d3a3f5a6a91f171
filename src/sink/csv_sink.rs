use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::TransactionRecord;
use crate::sink::{SinkError, TransactionSink};

/// Writes records as CSV rows with a header derived from the first record.
///
/// All records of one run must carry the same set of serialized fields, so a
/// CSV sink should not receive a mix of plain and streaming-enriched records.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer)
        }
    }
}

impl CsvSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TransactionSink for CsvSink<W> {
    fn send(&mut self, record: &TransactionRecord) -> Result<(), SinkError> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
