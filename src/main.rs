use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};
use universe25::{GestationPolicy, Params, Population, TickSummary};

/// Runs seeded colony simulations and emits the population series as JSON.
#[derive(Debug, Parser)]
#[command(name = "universe25", version)]
struct Cli {
    /// JSON parameter file; flags below override its values.
    #[arg(long)]
    params: Option<PathBuf>,
    /// Number of founding mice.
    #[arg(long)]
    initial: Option<usize>,
    /// Population ceiling.
    #[arg(long)]
    max: Option<usize>,
    /// Base RNG seed; replicate `r` uses `seed + r`.
    #[arg(long)]
    seed: Option<u64>,
    /// Ticks to simulate per replicate.
    #[arg(long, default_value_t = 100)]
    ticks: u64,
    /// Independent replicates, run in parallel.
    #[arg(long, default_value_t = 1)]
    replicates: u64,
    /// Stop a replicate early once the colony is extinct.
    #[arg(long)]
    until_extinct: bool,
    /// Give both mates a gestation countdown.
    #[arg(long)]
    both_carry: bool,
    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ReplicateReport {
    seed: u64,
    /// Population size after each tick.
    series: Vec<usize>,
    summaries: Vec<TickSummary>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let params = resolve_params(&cli)?;
    let base_seed = params.rng_seed.unwrap_or_else(rand::random);
    info!(
        initial = params.initial_population,
        max = params.max_population,
        ticks = cli.ticks,
        replicates = cli.replicates,
        base_seed,
        "starting colony runs"
    );

    let reports = (0..cli.replicates)
        .into_par_iter()
        .map(|r| {
            run_replicate(
                &params,
                base_seed.wrapping_add(r),
                cli.ticks,
                cli.until_extinct,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let json = serde_json::to_string_pretty(&reports)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_params(cli: &Cli) -> Result<Params> {
    let mut params = match &cli.params {
        Some(path) => Params::load_from_file(path)
            .with_context(|| format!("failed to load parameters from {}", path.display()))?,
        None => Params::default(),
    };

    if let Some(initial) = cli.initial {
        params.initial_population = initial;
    }
    if let Some(max) = cli.max {
        params.max_population = max;
    }
    if cli.seed.is_some() {
        params.rng_seed = cli.seed;
    }
    if cli.both_carry {
        params.gestation_policy = GestationPolicy::BothCarry;
    }
    params.validate().context("invalid colony parameters")?;
    Ok(params)
}

fn run_replicate(
    params: &Params,
    seed: u64,
    ticks: u64,
    until_extinct: bool,
) -> Result<ReplicateReport> {
    let mut population = Population::from_params(Params {
        rng_seed: Some(seed),
        ..params.clone()
    })?;

    let mut series = Vec::with_capacity(ticks as usize);
    let mut summaries = Vec::with_capacity(ticks as usize);
    for _ in 0..ticks {
        population.update();
        series.push(population.population_size());
        if let Some(summary) = population.last_summary() {
            summaries.push(*summary);
        }
        if until_extinct && population.population_size() == 0 {
            warn!(seed, tick = population.time_step(), "colony went extinct");
            break;
        }
    }

    info!(
        seed,
        ticks = population.time_step(),
        final_population = population.population_size(),
        "replicate finished"
    );
    Ok(ReplicateReport {
        seed,
        series,
        summaries,
    })
}
