mod config;
mod customer;
mod export;
mod generator;
mod models;
mod sink;
mod streamer;
mod types;

use std::fs::File;
use std::io::{BufWriter, Write, stderr, stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::watch;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::config::GeneratorConfig;
use crate::customer::CustomerGenerator;
use crate::export::export_historical;
use crate::generator::TransactionGenerator;
use crate::sink::{CsvSink, NdjsonSink, TransactionSink};
use crate::streamer::RealtimeStreamer;

/// Synthetic transaction toolkit for the analytics showcase: historical
/// back-fill export, fixed-rate live streaming and customer dimension data.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Log verbosity: error, warn, info, debug or trace.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    /// Generate a historical batch and export it to a file.
    Historical {
        /// Number of days of history ending today.
        #[arg(long, default_value_t = 365)]
        days: u32,
        /// Output file path.
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Ndjson)]
        format: ExportFormat,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Override the default 5% anomaly probability.
        #[arg(long)]
        anomaly_rate: Option<f64>
    },
    /// Stream live transactions at a fixed rate until stopped.
    Stream {
        /// Target transactions per second.
        #[arg(long, default_value_t = 1.0)]
        rate: f64,
        /// Stop after this many seconds; runs until Ctrl-C when omitted.
        #[arg(long)]
        duration: Option<u64>,
        /// NDJSON output file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        anomaly_rate: Option<f64>
    },
    /// Generate customer dimension records as NDJSON.
    Customers {
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        seed: Option<u64>
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Ndjson,
    Csv
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    match cli.command {
        Command::Historical { days, output, format, seed, anomaly_rate } => {
            run_historical(days, &output, format, seed, anomaly_rate)
        }
        Command::Stream { rate, duration, output, seed, anomaly_rate } => {
            run_stream(rate, duration, output, seed, anomaly_rate).await
        }
        Command::Customers { count, output, seed } => run_customers(count, &output, seed)
    }
}

fn build_generator(seed: Option<u64>, anomaly_rate: Option<f64>) -> Result<TransactionGenerator> {
    let mut config = GeneratorConfig::default();
    if let Some(anomaly_rate) = anomaly_rate {
        config.anomaly_probability = anomaly_rate;
    }

    let generator = match seed {
        Some(seed) => TransactionGenerator::from_seed(config, seed)?,
        None => TransactionGenerator::new(config)?
    };

    Ok(generator)
}

fn run_historical(days: u32, output: &Path, format: ExportFormat, seed: Option<u64>, anomaly_rate: Option<f64>) -> Result<()> {
    let mut generator = build_generator(seed, anomaly_rate)?;

    let summary = match format {
        ExportFormat::Ndjson => {
            let mut sink = NdjsonSink::create(output)?;
            export_historical(&mut generator, days, &mut sink)?
        }
        ExportFormat::Csv => {
            let mut sink = CsvSink::create(output)?;
            export_historical(&mut generator, days, &mut sink)?
        }
    };

    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        info!("Date range: {first} to {last}");
    }
    info!("Historical batch saved to {}", output.display());

    Ok(())
}

async fn run_stream(rate: f64, duration: Option<u64>, output: Option<PathBuf>, seed: Option<u64>, anomaly_rate: Option<f64>) -> Result<()> {
    let generator = build_generator(seed, anomaly_rate)?;

    let writer: Box<dyn Write + Send> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(stdout())
    };
    let mut sink = NdjsonSink::new(writer);

    let (shutdown_sender, shutdown_receiver) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Stop signal received, finishing current iteration");
            let _ = shutdown_sender.send(true);
        }
    });

    let anomaly_probability = generator.config().anomaly_probability;
    let mut streamer = RealtimeStreamer::new(generator, rate, duration.map(Duration::from_secs));

    info!("Starting stream at {rate} TPS (anomaly rate {:.1}%)", anomaly_probability * 100.0);
    let stats = streamer.run(&mut sink, shutdown_receiver).await;
    sink.flush()?;

    info!(
        "Streamed {}/{} transactions ({} anomalies, {:.1}% success rate)",
        stats.sent,
        stats.total,
        stats.anomalies,
        stats.success_rate()
    );

    Ok(())
}

fn run_customers(count: usize, output: &Path, seed: Option<u64>) -> Result<()> {
    let mut generator = match seed {
        Some(seed) => CustomerGenerator::from_seed(seed),
        None => CustomerGenerator::new()
    };

    let first_customer_id = *GeneratorConfig::default().customer_id_range.start();
    let customers = generator.generate_customers(first_customer_id, count);

    let file = BufWriter::new(File::create(output)?);
    customer::write_ndjson(&customers, file)?;

    info!("Customer records saved to {}", output.display());

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Data can be streamed to stdout, so logging has to stay on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
