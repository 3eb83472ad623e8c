use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use randseq::nist;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The sequences to test, read from stdin, one per line, when empty.
    ///
    /// A sequence may be prefixed with a label and a colon, e.g. the output of
    /// `randseq`.
    sequences: Vec<String>,
}

/// Splits `label: 0101...` into its label and its bits.
fn split_label(line: &str) -> (Option<&str>, &str) {
    match line.rsplit_once(':') {
        Some((label, bits)) => (Some(label.trim()), bits),
        None => (None, line),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .expect("cannot init logger");

    let cli = Cli::parse();

    let lines = if cli.sequences.is_empty() {
        info!("reading sequences from stdin");
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("could not read stdin")?
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect()
    } else {
        cli.sequences
    };

    for (i, line) in lines.iter().enumerate() {
        let (label, bits) = split_label(line);
        let name = label.map(String::from).unwrap_or_else(|| i.to_string());

        let bits = nist::parse_bits(bits).with_context(|| format!("invalid sequence {}", name))?;
        info!("testing sequence {} ({} bits)", name, bits.len());
        let report = nist::run_all(&bits).with_context(|| format!("could not test {}", name))?;

        println!("sequence: {}", name);
        println!("frequency: {}", report.frequency);
        println!("runs: {}", report.runs);
        match report.longest_run {
            Ok(p) => println!("longest run: {}", p),
            Err(e) => println!("longest run: {}", e),
        }
    }

    Ok(())
}
