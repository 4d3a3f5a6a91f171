#[cfg(test)]
mod tests;

use std::time::Duration;

use chrono::{Local, Utc};
use rand::Rng;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::generator::TransactionGenerator;
use crate::sink::TransactionSink;

/// Counters accumulated over one streaming run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    pub total: u64,
    pub sent: u64,
    pub failed: u64,
    pub anomalies: u64
}

impl StreamStats {
    pub fn success_rate(&self) -> f64 {
        self.sent as f64 / self.total.max(1) as f64 * 100.0
    }
}

/// Fixed-rate streaming loop.
///
/// Single-threaded and cooperative: one transaction per tick, forwarded to
/// the sink, then sleep until the next tick. Stop conditions (elapsed
/// duration, shutdown signal) are checked once per iteration; an in-flight
/// sink call is never interrupted. Failed sends are counted and logged, not
/// retried.
pub struct RealtimeStreamer {
    generator: TransactionGenerator,
    rate_per_second: f64,
    duration: Option<Duration>
}

impl RealtimeStreamer {
    pub fn new(generator: TransactionGenerator, rate_per_second: f64, duration: Option<Duration>) -> Self {
        Self { generator, rate_per_second, duration }
    }

    /// Streams until the configured duration elapses or `shutdown` flips.
    pub async fn run<S: TransactionSink>(&mut self, sink: &mut S, mut shutdown: watch::Receiver<bool>) -> StreamStats {
        let period = if self.rate_per_second.is_finite() && self.rate_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / self.rate_per_second)
        } else {
            Duration::from_secs(1)
        };

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let batch_id = new_batch_id();
        let deadline = self.duration.map(|duration| Instant::now() + duration);
        let mut stats = StreamStats::default();

        debug!("Streaming batch [{batch_id}] at {} TPS", self.rate_per_second);

        loop {
            if *shutdown.borrow() {
                break;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let record = self
                .generator
                .generate_transaction(Local::now().naive_local(), None)
                .into_streaming(&batch_id, Utc::now());

            stats.total += 1;
            if record.is_anomaly {
                stats.anomalies += 1;
            }

            match sink.send(&record) {
                Ok(()) => {
                    stats.sent += 1;
                    debug!("Streamed transaction [{}] for customer [{}]", record.transaction_id, record.customer_id);
                }
                Err(error) => {
                    stats.failed += 1;
                    warn!("Failed to stream transaction [{}]: {error}", record.transaction_id);
                }
            }
        }

        if let Err(error) = sink.flush() {
            warn!("Failed to flush sink at end of stream: {error}");
        }

        stats
    }
}

/// One batch id per streaming run, e.g. `batch_20240115_103000_9f2c41d7`.
fn new_batch_id() -> String {
    let suffix: u32 = rand::rng().random();
    format!("batch_{}_{suffix:08x}", Local::now().format("%Y%m%d_%H%M%S"))
}
