use anyhow::{Result, bail};
use clap::Parser;
use coverage::{Administrator, StepOutcome, StrategyKind};
use coverage_tools::{MapGenConfig, RunConfig, prepare};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of generated maps
    #[arg(short, long, default_value_t = 200)]
    maps: u32,
}

fn pick(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    min + rng.next_u64() as usize % (max - min + 1)
}

/// Steps one run while checking per-step invariants; returns the steps taken.
fn check_run(config: &RunConfig) -> Result<u64> {
    let (mut map, mut agent) = prepare(config)?;
    let reachable = map.reachable_count();
    let limit = (reachable * reachable + 4 * reachable) as u64;
    let mut admin = Administrator::new(&mut map, &mut agent)?;

    let mut previous = admin.map().not_covered_count();
    let mut steps = 0;
    while !admin.is_covered() && steps < limit {
        let outcome = admin.step()?;
        let current = admin.map().not_covered_count();
        if current > previous || previous - current > 1 {
            bail!("coverage went from {previous} to {current} at step {}", steps + 1);
        }
        match outcome {
            StepOutcome::Moved { from, to, .. } => {
                if from.manhattan(to) != 1 || !admin.map().is_traversable(to) {
                    bail!("illegal move {from} -> {to} at step {}", steps + 1);
                }
            }
            StepOutcome::Idle => break,
        }
        previous = current;
        steps += 1;
    }

    let must_finish = config.strategy != StrategyKind::Random;
    if must_finish && !admin.is_covered() {
        bail!("{} left {} cells uncovered", config.strategy, admin.map().not_covered_count());
    }
    Ok(steps)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let strategies = StrategyKind::ALL.len();
    println!("Fuzzing {} maps x {strategies} strategies from seed {}...", args.maps, args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut total_steps = 0;

    for _ in 0..args.maps {
        let map = MapGenConfig {
            width: pick(&mut rng, 1, 24),
            height: pick(&mut rng, 1, 16),
            wall_density: pick(&mut rng, 0, 45) as f64 / 100.0,
            seed: rng.next_u64(),
        };
        for strategy in StrategyKind::ALL {
            let config =
                RunConfig { strategy, seed: rng.next_u64(), max_steps: None, map: map.clone() };
            match check_run(&config) {
                Ok(steps) => total_steps += steps,
                Err(err) => bail!("invariant failed for {config:?}: {err:#}"),
            }
        }
    }

    println!("Fuzzing completed successfully ({total_steps} steps).");
    Ok(())
}
