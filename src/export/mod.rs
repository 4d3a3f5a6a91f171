
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::generator::TransactionGenerator;
use crate::sink::{SinkError, TransactionSink};

/// Totals accumulated while a historical batch is exported.
///
/// Anomalies are counted here, before serialization, because the diagnostic
/// flag does not survive the sink.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExportSummary {
    pub records: usize,
    pub total_amount: Decimal,
    pub anomalies: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>
}

impl ExportSummary {
    fn observe_date(&mut self, date: NaiveDate) {
        self.first_date = Some(self.first_date.map_or(date, |first| first.min(date)));
        self.last_date = Some(self.last_date.map_or(date, |last| last.max(date)));
    }
}

/// Generates `days` days of history ending today and writes every record
/// through `sink` in date order.
pub fn export_historical<S: TransactionSink>(
    generator: &mut TransactionGenerator,
    days: u32,
    sink: &mut S
) -> Result<ExportSummary, SinkError> {
    let batch = generator.generate_historical_data(days);
    let mut summary = ExportSummary::default();

    for record in &batch {
        sink.send(record)?;

        summary.records += 1;
        summary.total_amount += record.transaction_amount;
        if record.is_anomaly {
            summary.anomalies += 1;
        }
        summary.observe_date(record.transaction_date);
    }

    sink.flush()?;

    let anomaly_rate = summary.anomalies as f64 / summary.records.max(1) as f64 * 100.0;
    info!(
        "Exported {} transactions totalling {} ({} anomalies, {anomaly_rate:.1}%)",
        summary.records, summary.total_amount, summary.anomalies
    );

    Ok(summary)
}
