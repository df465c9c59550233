//! Writes sample education and income CSV files in the layout the viewer reads.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (defaults to the configured data folder).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use statewise::config::AppConfig;
use statewise::data::model::{DatasetKind, Year, STATE_COLUMN};

const FIRST_YEAR: Year = 2006;
const LAST_YEAR: Year = 2019;

const STATES: [&str; 51] = [
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado",
    "Connecticut", "Delaware", "District of Columbia", "Florida", "Georgia",
    "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky",
    "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
    "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota",
    "Ohio", "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island",
    "South Carolina", "South Dakota", "Tennessee", "Texas", "Utah", "Vermont",
    "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// One row per state: a starting value drifting by a per-state trend plus noise.
fn write_series(
    path: &Path,
    rng: &mut SimpleRng,
    start: (f64, f64),
    trend: (f64, f64),
    noise: f64,
    decimals: usize,
) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec![STATE_COLUMN.to_string()];
    header.extend((FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string()));
    writer.write_record(&header)?;

    for state in STATES {
        let mut value = rng.uniform(start.0, start.1);
        let step = rng.uniform(trend.0, trend.1);
        let mut record = vec![state.to_string()];
        for _ in FIRST_YEAR..=LAST_YEAR {
            record.push(format!("{value:.decimals$}"));
            value *= 1.0 + step + rng.uniform(-noise, noise);
        }
        writer.write_record(&record)?;
    }

    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let mut config = AppConfig::default();
    if let Some(dir) = std::env::args().nth(1) {
        config.data_dir = PathBuf::from(dir);
    }
    let out_dir = &config.data_dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    // Share of adults with a bachelor's degree, in percent.
    let education = config.path_for(DatasetKind::Education);
    write_series(&education, &mut rng, (17.0, 36.0), (0.005, 0.02), 0.004, 1)?;

    // Personal income per capita, in dollars.
    let income = config.path_for(DatasetKind::Income);
    write_series(&income, &mut rng, (28000.0, 52000.0), (0.015, 0.04), 0.01, 0)?;

    println!(
        "Wrote {} states × {} years to {} and {}",
        STATES.len(),
        LAST_YEAR - FIRST_YEAR + 1,
        education.display(),
        income.display()
    );
    Ok(())
}
