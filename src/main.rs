//! CLI for generating the seed CSV files.
//!
//! Usage:
//!   # Default counts, fresh seed
//!   matchseed --output CSV
//!
//!   # Reproducible fixture for tests
//!   matchseed --seed 42 --users 5 --output fixtures/csv

use std::path::PathBuf;

use clap::Parser;
use matchseed::{Counts, CsvSink, Generator};

#[derive(Parser, Debug)]
#[command(name = "matchseed")]
#[command(about = "Generate CSV seed data for the social-events schema", long_about = None)]
struct Args {
    /// Output directory for the CSV files
    #[arg(short, long, default_value = "CSV")]
    output: PathBuf,

    /// Random seed for reproducible output (default: fresh entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of user rows
    #[arg(long, default_value_t = 120)]
    users: usize,

    /// Number of place rows
    #[arg(long, default_value_t = 25)]
    places: usize,

    /// Number of event rows
    #[arg(long, default_value_t = 40)]
    events: usize,

    /// Number of notification rows
    #[arg(long, default_value_t = 60)]
    notifications: usize,

    /// Number of digital trace rows
    #[arg(long, default_value_t = 200)]
    traces: usize,

    /// Number of like rows
    #[arg(long, default_value_t = 400)]
    likes: usize,

    /// Number of participation rows
    #[arg(long, default_value_t = 180)]
    participations: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let counts = Counts {
        users: args.users,
        places: args.places,
        events: args.events,
        notifications: args.notifications,
        traces: args.traces,
        likes: args.likes,
        participations: args.participations,
    };

    let mut generator = Generator::new(seed, counts);
    let data = generator.generate()?;

    let sink = CsvSink::new(&args.output);
    sink.write_all(&data)?;

    eprintln!(
        "Generated {} tables (seed {}) -> {}",
        data.tables.len(),
        seed,
        args.output.display()
    );
    Ok(())
}
