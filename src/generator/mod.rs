
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::{debug, info};

use crate::config::{DEFAULT_AMOUNT_RANGE, ConfigError, GeneratorConfig};
use crate::models::{Category, TransactionRecord};
use crate::types::TransactionId;

/// Weekend days see roughly 30% less spending than weekdays.
const WEEKEND_VOLUME_FACTOR: f64 = 0.7;

/// Synthetic transaction generator.
///
/// Stateless across calls aside from the validated configuration and the
/// random source, so one instance per worker makes it trivially safe for
/// concurrent use. Every generation operation is total: under a valid
/// configuration no draw can fail.
pub struct TransactionGenerator {
    config: GeneratorConfig,
    category_index: WeightedIndex<u32>,
    rng: StdRng
}

impl TransactionGenerator {
    /// Creates a generator seeded from the operating system.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration violates any
    /// construction-time contract.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a deterministic generator for reproducible runs.
    pub fn from_seed(config: GeneratorConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GeneratorConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let category_index = WeightedIndex::new(config.categories.iter().map(|spec| spec.weight))
            .map_err(|error| ConfigError::WeightTable { reason: error.to_string() })?;

        Ok(Self { config, category_index, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draws a transaction amount for the given category.
    ///
    /// Anomalous amounts are uniform over the anomaly range. Legitimate
    /// amounts follow a normal distribution centered on the category range
    /// with a standard deviation of one sixth of its width, clamped into the
    /// range, so ~99.7% of raw draws already land inside it. The result is
    /// always within the applicable range, rounded to two decimals.
    pub fn generate_amount(&mut self, category: Category, is_anomaly: bool) -> Decimal {
        if is_anomaly {
            let (min, max) = self.config.anomaly_amount_range;
            return round_to_cents(self.rng.random_range(min..=max));
        }

        let (min, max) = self.config.amount_range(category).unwrap_or(DEFAULT_AMOUNT_RANGE);
        let mean = (min + max) / 2.0;
        let std_dev = (max - min) / 6.0;

        let amount = Normal::new(mean, std_dev)
            .map(|distribution| distribution.sample(&mut self.rng))
            .unwrap_or(mean);

        round_to_cents(amount.clamp(min, max))
    }

    /// Generates one transaction stamped at `timestamp`.
    ///
    /// Without an explicit id the record gets `timestamp_millis + salt` with
    /// a random salt in 1..=999. Two calls inside the same host millisecond
    /// can collide on the salt; this is accepted demo-grade uniqueness, not
    /// a hard guarantee.
    pub fn generate_transaction(&mut self, timestamp: NaiveDateTime, explicit_id: Option<TransactionId>) -> TransactionRecord {
        let customer_id = self.rng.random_range(self.config.customer_id_range.clone());

        let category = self.config.categories[self.category_index.sample(&mut self.rng)].category;
        let is_anomaly = self.rng.random_bool(self.config.anomaly_probability);
        let amount = self.generate_amount(category, is_anomaly);

        let transaction_id = explicit_id.unwrap_or_else(|| {
            timestamp.and_utc().timestamp_millis() + self.rng.random_range(1..=999)
        });

        TransactionRecord {
            transaction_id,
            customer_id,
            transaction_date: timestamp.date(),
            transaction_amount: amount,
            transaction_type: category,
            is_anomaly,
            data_source: None,
            batch_id: None,
            streaming_timestamp: None
        }
    }

    /// Generates a day's worth of transactions spread between 06:00 and 23:59.
    ///
    /// Weekends scale both count bounds down by [`WEEKEND_VOLUME_FACTOR`],
    /// truncating. Each record carries an explicit `YYYYMMDDNNNN` id with a
    /// 1-based sequence number, monotonic by construction; no ordering of the
    /// returned records is guaranteed beyond that.
    pub fn generate_daily_transactions(&mut self, date: NaiveDate, min_count: usize, max_count: usize) -> Vec<TransactionRecord> {
        let (min_count, max_count) = if is_weekend(date) {
            (scale_count(min_count), scale_count(max_count))
        } else {
            (min_count, max_count)
        };

        let num_transactions = self.rng.random_range(min_count..=max_count);
        let mut transactions = Vec::with_capacity(num_transactions);

        for sequence in 1..=num_transactions {
            let hour = self.rng.random_range(6..=23);
            let minute = self.rng.random_range(0..=59);
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);

            let transaction_id = daily_transaction_id(date, sequence);
            transactions.push(self.generate_transaction(NaiveDateTime::new(date, time), Some(transaction_id)));
        }

        transactions
    }

    /// Generates `days` days of history ending today, in date order.
    ///
    /// Linear in `days`; deterministic in shape (day count, weekday-adjusted
    /// bounds) given a seeded random source. `days == 0` yields an empty
    /// batch.
    pub fn generate_historical_data(&mut self, days: u32) -> Vec<TransactionRecord> {
        self.generate_history_ending(Local::now().date_naive(), days)
    }

    /// Same as [`generate_historical_data`](Self::generate_historical_data)
    /// with an explicit end date.
    pub fn generate_history_ending(&mut self, end_date: NaiveDate, days: u32) -> Vec<TransactionRecord> {
        if days == 0 {
            return Vec::new();
        }

        let start_date = end_date
            .checked_sub_days(chrono::Days::new(u64::from(days) - 1))
            .unwrap_or(end_date);

        info!("Generating {days} days of historical data from {start_date} to {end_date}");

        let mut all_transactions = Vec::new();
        let mut current_date = start_date;
        let mut generated_days = 0u32;

        while current_date <= end_date {
            let daily = self.generate_daily_transactions(current_date, 50, 200);
            debug!("Generated {} transactions for {current_date}", daily.len());
            all_transactions.extend(daily);

            generated_days += 1;
            if generated_days % 30 == 0 {
                info!("Generated data through {current_date}: {} transactions so far", all_transactions.len());
            }

            current_date = match current_date.succ_opt() {
                Some(next) => next,
                None => break
            };
        }

        info!("Historical data generation complete: {} transactions", all_transactions.len());

        all_transactions
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn scale_count(count: usize) -> usize {
    (count as f64 * WEEKEND_VOLUME_FACTOR) as usize
}

/// Concatenates the date as `YYYYMMDD` with a 4-digit zero-padded sequence.
fn daily_transaction_id(date: NaiveDate, sequence: usize) -> TransactionId {
    let date_key = i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day());
    date_key * 10_000 + sequence as i64
}

fn round_to_cents(value: f64) -> Decimal {
    // Samples always come from finite configured ranges, never NaN or infinity.
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}
