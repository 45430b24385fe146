use crate::domain::errors::ModelError;
use crate::domain::sensor::{SensorReading, TrainingExample};
use rand::distr::Open01;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use statrs::distribution::{ContinuousCDF, Normal};

pub const DEFAULT_SAMPLES: usize = 1000;

/// Generating distribution for one operating regime, as (mean, std dev).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeProfile {
    pub temperature: (f64, f64),
    pub vibration: (f64, f64),
    pub pressure: (f64, f64),
}

/// Normal operation: ~70°C, low vibration, ~15 psi.
pub const NORMAL_REGIME: RegimeProfile = RegimeProfile {
    temperature: (70.0, 10.0),
    vibration: (0.2, 0.05),
    pressure: (15.0, 2.0),
};

/// Failure risk: running hot, shaking, losing pressure (leak).
pub const FAILURE_REGIME: RegimeProfile = RegimeProfile {
    temperature: (90.0, 15.0),
    vibration: (0.8, 0.2),
    pressure: (8.0, 3.0),
};

/// Draws from a normal distribution by inverting its CDF on an open-interval
/// uniform, so the sample stream depends only on the caller's rng.
struct GaussianSampler {
    dist: Normal,
}

impl GaussianSampler {
    fn new((mean, std_dev): (f64, f64)) -> Result<Self, ModelError> {
        let dist = Normal::new(mean, std_dev).map_err(ModelError::training)?;
        Ok(Self { dist })
    }

    fn sample_n<R: Rng>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n)
            .map(|_| {
                let u: f64 = rng.sample(Open01);
                self.dist.inverse_cdf(u)
            })
            .collect()
    }
}

fn sample_regime<R: Rng>(
    rng: &mut R,
    profile: &RegimeProfile,
    n: usize,
    failure: bool,
) -> Result<Vec<TrainingExample>, ModelError> {
    let temperature = GaussianSampler::new(profile.temperature)?.sample_n(rng, n);
    let vibration = GaussianSampler::new(profile.vibration)?.sample_n(rng, n);
    let pressure = GaussianSampler::new(profile.pressure)?.sample_n(rng, n);

    Ok(temperature
        .into_iter()
        .zip(vibration)
        .zip(pressure)
        .map(|((t, v), p)| TrainingExample {
            reading: SensorReading::new(t, v, p),
            failure,
        })
        .collect())
}

/// Builds a shuffled, class-balanced labelled dataset.
///
/// `n_samples / 2` examples come from [`NORMAL_REGIME`] and as many from
/// [`FAILURE_REGIME`]; an odd count is rounded down. The same seed always
/// yields the same examples in the same order.
pub fn generate_synthetic_dataset(
    n_samples: usize,
    seed: u64,
) -> Result<Vec<TrainingExample>, ModelError> {
    let half = n_samples / 2;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut examples = sample_regime(&mut rng, &NORMAL_REGIME, half, false)?;
    examples.extend(sample_regime(&mut rng, &FAILURE_REGIME, half, true)?);
    examples.shuffle(&mut rng);

    Ok(examples)
}

/// Train/test partitions produced by [`train_test_split`].
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub train: Vec<TrainingExample>,
    pub test: Vec<TrainingExample>,
}

/// Shuffles with its own seed and holds out `ceil(len * test_fraction)`
/// examples for evaluation.
pub fn train_test_split(
    examples: &[TrainingExample],
    test_fraction: f64,
    seed: u64,
) -> DatasetSplit {
    let mut indices: Vec<usize> = (0..examples.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((examples.len() as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let test_len = test_len.min(examples.len());

    let test = indices[..test_len].iter().map(|&i| examples[i]).collect();
    let train = indices[test_len..].iter().map(|&i| examples[i]).collect();

    DatasetSplit { train, test }
}
