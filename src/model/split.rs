// src/model/split.rs
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Seed used for the train/holdout split so every run sees the same partitions.
pub const SPLIT_SEED: u64 = 42;

pub const TEST_FRACTION: f64 = 0.2;

/// Row indices of one train/holdout split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a seeded RNG and cut it into `ceil(n * test_fraction)`
/// holdout rows and the remaining training rows.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Split {
    let n_test = ((n as f64) * test_fraction).ceil() as usize;
    let n_test = n_test.min(n);

    let mut idx: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let train = idx.split_off(n_test);
    Split { train, test: idx }
}
