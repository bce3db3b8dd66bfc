use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use table_shuffle::report::{Source, Summary};
use table_shuffle::sample::{random_guests, DEFAULT_CATEGORIES};
use table_shuffle::{Optimizer, OptimizerConfig, SeatedGuest};

#[derive(Parser)]
#[command(
    name = "table-shuffle",
    about = "Seat a random guest list at tables",
    version
)]
struct Cli {
    /// Number of guests to generate
    #[arg(short, long, default_value_t = 100)]
    guests: usize,
    /// Maximum people per table
    #[arg(short, long, default_value_t = 10.0)]
    capacity: f64,
    /// Random restarts after the initial seating
    #[arg(short = 'n', long, default_value_t = 10)]
    iterations: usize,
    /// Number of "should not sit together" rules
    #[arg(short, long, default_value_t = 0)]
    rules: usize,
    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,
    /// Print the seating as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: String,
    score: i64,
    guests: &'a [SeatedGuest],
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    enable_tracing();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let guests = random_guests(cli.guests, &DEFAULT_CATEGORIES, cli.rules, &mut rng)
        .context("generating guest list")?;

    let config = OptimizerConfig::default()
        .with_capacity(cli.capacity)
        .with_iterations(cli.iterations);
    let optimizer = Optimizer::new(config).context("invalid optimizer settings")?;
    let outcome = optimizer.run_with_rng(&guests, &mut rng)?;
    let seated = outcome.seated(&guests)?;

    let summary = Summary::new(Source::RandomSimulation, &guests, &outcome, cli.capacity);
    tracing::info!("{} (score {})", summary, outcome.score);

    if cli.json {
        let report = Report {
            summary: summary.to_string(),
            score: outcome.score,
            guests: &seated,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (table, members) in seated
        .iter()
        .into_group_map_by(|seat| seat.table)
        .into_iter()
        .sorted_by_key(|(table, _)| *table)
    {
        let names = members
            .iter()
            .map(|seat| {
                let category = seat.guest.category.as_deref().unwrap_or("-");
                match seat.guest.avoid {
                    Some(avoid) => format!("{} [{}, avoids {}]", seat.guest.name, category, avoid),
                    None => format!("{} [{}]", seat.guest.name, category),
                }
            })
            .join(", ");
        println!("Table {table}: {names}");
    }
    Ok(())
}
