//! Seeded room generator used in place of a map file loader.

use anyhow::{Context, Result};
use coverage::{MapLayout, Pos};
use log::debug;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

use crate::config::MapGenConfig;

const DENSITY_SCALE: u64 = 1_000_000;

/// Scatters blocked cells over a `width` x `height` room. The start sits at the center
/// and is always traversable; the same config always yields the same layout.
pub fn generate(config: &MapGenConfig) -> Result<MapLayout> {
    config.validate()?;
    let (width, height) = (config.width, config.height);
    let start = Pos::new(
        i32::try_from(height / 2).context("room height exceeds the coordinate range")?,
        i32::try_from(width / 2).context("room width exceeds the coordinate range")?,
    );
    let threshold = (config.wall_density * DENSITY_SCALE as f64) as u64;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut cells = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let roll = rng.next_u64() % DENSITY_SCALE;
            let is_start = start == Pos::new(y as i32, x as i32);
            cells.push(is_start || roll >= threshold);
        }
    }

    let open = cells.iter().filter(|cell| **cell).count();
    debug!("generated {width}x{height} room, seed {}: {open} open cells", config.seed);
    MapLayout::new(width, height, cells, start)
        .with_context(|| format!("generated layout {width}x{height} was rejected"))
}
