//! Sniff a file's encoding preamble and delimiter before loading it.
//!
//! Usage: `cargo run --example sniff_file -- data.csv`

use sniffer::{SniffConfig, Sniffer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sniffer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: sniff_file <path>")?;

    let config = SniffConfig::load()?;
    let sniffer = Sniffer::new(config)?;

    let file = tokio::fs::File::open(&path).await?;
    let report = sniffer.sniff(file).await?;

    match report.encoding() {
        Some(encoding) => println!("encoding: {}", encoding.as_str()),
        None => println!("encoding: no preamble detected"),
    }
    match report.delimiter() {
        Some(delimiter) => println!("delimiter: {:?}", delimiter as char),
        None => println!("delimiter: none inferred"),
    }
    for strategy in report.strategies() {
        if let Err(error) = strategy.outcome() {
            println!("strategy {} failed: {}", strategy.label(), error);
        }
    }

    Ok(())
}
