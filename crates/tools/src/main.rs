use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use coverage::{Administrator, StrategyKind, TraceObserver};
use coverage_tools::{RunConfig, prepare, run};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON run config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// dfs, greedy, wavefront or random
    #[arg(short, long)]
    strategy: Option<StrategyKind>,
    /// Seed for the random strategy
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many steps (unbounded by default)
    #[arg(long)]
    max_steps: Option<u64>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Fraction of cells to block, 0.0 to 1.0
    #[arg(long)]
    walls: Option<f64>,
    /// Seed for the map generator
    #[arg(long)]
    map_seed: Option<u64>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.max_steps.is_some() {
            config.max_steps = self.max_steps;
        }
        if let Some(width) = self.width {
            config.map.width = width;
        }
        if let Some(height) = self.height {
            config.map.height = height;
        }
        if let Some(walls) = self.walls {
            config.map.wall_density = walls;
        }
        if let Some(map_seed) = self.map_seed {
            config.map.seed = map_seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = args.resolve()?;

    let (mut map, mut agent) = prepare(&config)?;
    map.add_observer(TraceObserver);
    agent.add_observer(TraceObserver);
    let mut admin = Administrator::new(&mut map, &mut agent)
        .context("Failed to bind agent to generated map")?;

    let report = run(&mut admin, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", admin.map().render());
    println!("Strategy: {}", report.strategy);
    println!("Status: {:?}", report.status);
    println!("Steps: {}", report.steps);
    println!(
        "Covered: {}/{} reachable ({:.1}%), {} unreachable",
        report.reachable - report.not_covered,
        report.reachable,
        report.coverage_ratio * 100.0,
        report.unreachable
    );
    println!("Fingerprint: {:016x}", report.fingerprint);

    Ok(())
}
