//! Model training and persistence configuration parsing from environment variables.

use crate::application::ml::{ForestParams, TrainingConfig};
use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

/// Model environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEnvConfig {
    pub model_path: PathBuf,
    pub training_samples: usize,
    pub training_seed: u64,
    pub split_seed: u64,
    pub forest_trees: usize,
    pub forest_max_depth: u16,
    pub forest_min_split: usize,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        let training = TrainingConfig::default();
        Self {
            model_path: PathBuf::from("data/models/trained_model.json"),
            training_samples: training.samples,
            training_seed: training.data_seed,
            split_seed: training.split_seed,
            forest_trees: training.forest.n_trees,
            forest_max_depth: training.forest.max_depth,
            forest_min_split: training.forest.min_split,
        }
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let d = Self::default();

        let config = Self {
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(d.model_path),
            training_samples: parsed(&lookup, "TRAINING_SAMPLES", d.training_samples),
            training_seed: parsed(&lookup, "TRAINING_SEED", d.training_seed),
            split_seed: parsed(&lookup, "SPLIT_SEED", d.split_seed),
            forest_trees: parsed(&lookup, "FOREST_TREES", d.forest_trees),
            forest_max_depth: parsed(&lookup, "FOREST_MAX_DEPTH", d.forest_max_depth),
            forest_min_split: parsed(&lookup, "FOREST_MIN_SPLIT", d.forest_min_split),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.training_samples < 10 {
            bail!(
                "Invalid TRAINING_SAMPLES: {}. Need at least 10 to split train/test",
                self.training_samples
            );
        }
        if self.forest_trees == 0 {
            bail!("Invalid FOREST_TREES: must be at least 1");
        }
        if self.forest_max_depth == 0 {
            bail!("Invalid FOREST_MAX_DEPTH: must be at least 1");
        }
        Ok(())
    }

    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            samples: self.training_samples,
            data_seed: self.training_seed,
            split_seed: self.split_seed,
            forest: ForestParams {
                n_trees: self.forest_trees,
                max_depth: self.forest_max_depth,
                min_split: self.forest_min_split,
            },
            ..TrainingConfig::default()
        }
    }
}
