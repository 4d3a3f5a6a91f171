use super::RealtimeStreamer;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;

use crate::config::GeneratorConfig;
use crate::generator::TransactionGenerator;
use crate::models::{DataSource, TransactionRecord};
use crate::sink::{SinkError, TransactionSink};

struct CollectingSink {
    records: Vec<TransactionRecord>
}

impl TransactionSink for CollectingSink {
    fn send(&mut self, record: &TransactionRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

struct FailingSink;

impl TransactionSink for FailingSink {
    fn send(&mut self, _record: &TransactionRecord) -> Result<(), SinkError> {
        Err(SinkError::Io(std::io::Error::other("sink unavailable")))
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

fn seeded_streamer(rate: f64, duration: Option<Duration>) -> Result<RealtimeStreamer> {
    let generator = TransactionGenerator::from_seed(GeneratorConfig::default(), 42)?;
    Ok(RealtimeStreamer::new(generator, rate, duration))
}

#[tokio::test(start_paused = true)]
async fn test_streamer_stops_after_configured_duration() -> Result<()> {
    let mut streamer = seeded_streamer(10.0, Some(Duration::from_secs(5)))?;
    let mut sink = CollectingSink { records: Vec::new() };
    let (_sender, receiver) = watch::channel(false);

    let stats = streamer.run(&mut sink, receiver).await;

    // 10 TPS over 5 seconds, give or take the immediate first tick.
    assert!((40..=60).contains(&stats.total), "unexpected tick count {}", stats.total);
    assert_eq!(stats.sent, stats.total);
    assert_eq!(stats.failed, 0);
    assert_eq!(sink.records.len() as u64, stats.sent);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_streamed_records_carry_streaming_enrichment() -> Result<()> {
    let mut streamer = seeded_streamer(5.0, Some(Duration::from_secs(2)))?;
    let mut sink = CollectingSink { records: Vec::new() };
    let (_sender, receiver) = watch::channel(false);

    streamer.run(&mut sink, receiver).await;

    assert!(!sink.records.is_empty());

    let first_batch = sink.records[0].batch_id.clone();
    for record in &sink.records {
        assert_eq!(record.data_source, Some(DataSource::Streaming));
        assert!(record.streaming_timestamp.is_some());
        assert_eq!(record.batch_id, first_batch);
    }

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pre_set_shutdown_signal_prevents_any_sends() -> Result<()> {
    let mut streamer = seeded_streamer(100.0, None)?;
    let mut sink = CollectingSink { records: Vec::new() };
    let (_sender, receiver) = watch::channel(true);

    let stats = streamer.run(&mut sink, receiver).await;

    assert_eq!(stats.total, 0);
    assert!(sink.records.is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_signal_stops_the_loop_between_iterations() -> Result<()> {
    let mut streamer = seeded_streamer(10.0, None)?;
    let mut sink = CollectingSink { records: Vec::new() };
    let (sender, receiver) = watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        let _ = sender.send(true);
    });

    let stats = streamer.run(&mut sink, receiver).await;

    assert!(stats.total > 0);
    assert!(stats.total < 100, "loop did not stop on shutdown, {} ticks", stats.total);
    assert_eq!(stats.sent + stats.failed, stats.total);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_failing_sink_is_counted_without_aborting_the_loop() -> Result<()> {
    let mut streamer = seeded_streamer(10.0, Some(Duration::from_secs(2)))?;
    let mut sink = FailingSink;
    let (_sender, receiver) = watch::channel(false);

    let stats = streamer.run(&mut sink, receiver).await;

    assert!(stats.total > 1, "loop aborted after first failure");
    assert_eq!(stats.failed, stats.total);
    assert_eq!(stats.sent, 0);
    assert_eq!(stats.success_rate(), 0.0);

    Ok(())
}
