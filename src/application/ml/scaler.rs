use crate::domain::errors::ModelError;
use crate::domain::ml::feature_registry::{FEATURE_COUNT, FeatureVector};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Per-feature standardisation to zero mean and unit variance.
///
/// Variance is the population variance of the fitting rows. A constant
/// column keeps a scale of 1 so it maps to 0 instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: FeatureVector,
    variance: FeatureVector,
    scale: FeatureVector,
}

impl StandardScaler {
    pub fn fit(rows: &[FeatureVector]) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::training("cannot fit scaler on zero rows"));
        }

        let mut mean = [0.0; FEATURE_COUNT];
        let mut variance = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];

        for col in 0..FEATURE_COUNT {
            let column: Vec<f64> = rows.iter().map(|row| row[col]).collect();
            mean[col] = column.iter().mean();
            variance[col] = column.iter().population_variance();
            if variance[col] > 0.0 {
                scale[col] = variance[col].sqrt();
            }
        }

        Ok(Self {
            mean,
            variance,
            scale,
        })
    }

    pub fn transform(&self, row: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for col in 0..FEATURE_COUNT {
            out[col] = (row[col] - self.mean[col]) / self.scale[col];
        }
        out
    }

    pub fn transform_all(&self, rows: &[FeatureVector]) -> Vec<FeatureVector> {
        rows.iter().map(|row| self.transform(row)).collect()
    }

    pub fn mean(&self) -> &FeatureVector {
        &self.mean
    }

    pub fn variance(&self) -> &FeatureVector {
        &self.variance
    }

    /// True when every fitted parameter is usable for inference.
    pub(crate) fn is_valid(&self) -> bool {
        self.mean.iter().all(|m| m.is_finite())
            && self.variance.iter().all(|v| v.is_finite() && *v >= 0.0)
            && self.scale.iter().all(|s| s.is_finite() && *s > 0.0)
    }
}
