use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, DataSource};
use crate::types::{CustomerId, TransactionId};

/// A single synthetic transaction, immutable once produced.
///
/// The serialized form is one newline-delimited JSON object (or one CSV row).
/// `is_anomaly` is a diagnostic flag for monitoring and never survives
/// serialization; the enrichment fields are only present on records that went
/// through the streaming path and are omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique within a generation run: millisecond epoch plus a random salt,
    /// or date plus sequence number in batch mode.
    pub transaction_id: TransactionId,
    /// Drawn uniformly from the configured customer interval.
    pub customer_id: CustomerId,
    /// Calendar date of the transaction, serialized as `YYYY-MM-DD`.
    pub transaction_date: NaiveDate,
    /// Always positive, two fractional digits, serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub transaction_amount: Decimal,
    pub transaction_type: Category,
    /// Whether the amount was drawn from the anomaly range. Diagnostic only.
    #[serde(skip_serializing, default)]
    pub is_anomaly: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_source: Option<DataSource>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub batch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub streaming_timestamp: Option<DateTime<Utc>>
}

impl TransactionRecord {
    /// Attaches the streaming provenance fields to a freshly generated record.
    pub fn into_streaming(mut self, batch_id: &str, streamed_at: DateTime<Utc>) -> Self {
        self.data_source = Some(DataSource::Streaming);
        self.batch_id = Some(batch_id.to_string());
        self.streaming_timestamp = Some(streamed_at);
        self
    }
}
