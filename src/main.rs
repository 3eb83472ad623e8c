use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Print a 128-bit pseudo-random binary sequence.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .expect("cannot init logger");

    let sequence = randseq::generate().context("could not generate a random sequence")?;
    debug!("generated sequence with {} ones", sequence.count_ones());

    println!("Random sequence: {}", sequence);

    Ok(())
}
