use super::scaler::StandardScaler;
use crate::domain::errors::ModelError;
use crate::domain::ml::feature_registry::{FeatureVector, reading_to_features};
use crate::domain::sensor::{SensorReading, TrainingExample};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Random forest regressed on 0/1 failure labels. The averaged leaf value of
/// the ensemble is the estimated probability of the failure class.
pub type ProbabilityForest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Hyperparameters of the probability forest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_split: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_split: 2,
        }
    }
}

/// Fitted scaler and classifier. Immutable once built; the lifecycle swaps
/// whole instances rather than editing one in place.
pub struct TrainedModel {
    scaler: StandardScaler,
    forest: ProbabilityForest,
}

impl TrainedModel {
    /// Fits the scaler on `train` only, then the forest on the scaled rows.
    pub fn fit(train: &[TrainingExample], params: ForestParams) -> Result<Self, ModelError> {
        let (rows, labels) = split_features(train);
        let scaler = StandardScaler::fit(&rows)?;
        let scaled = scaler.transform_all(&rows);

        let x = to_matrix(&scaled)?;
        let forest_params = RandomForestRegressorParameters::default()
            .with_n_trees(params.n_trees)
            .with_max_depth(params.max_depth)
            .with_min_samples_split(params.min_split);

        let forest =
            RandomForestRegressor::fit(&x, &labels, forest_params).map_err(ModelError::training)?;

        Ok(Self { scaler, forest })
    }

    pub(crate) fn from_parts(scaler: StandardScaler, forest: ProbabilityForest) -> Self {
        Self { scaler, forest }
    }

    pub(crate) fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub(crate) fn forest(&self) -> &ProbabilityForest {
        &self.forest
    }

    /// Failure-class probability in [0, 1] for each raw (unscaled) row.
    pub fn probabilities(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let x = to_matrix(&self.scaler.transform_all(rows))?;
        let predictions = self.forest.predict(&x).map_err(ModelError::training)?;
        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(ModelError::training("Forest produced a non-finite prediction"));
        }

        Ok(predictions.into_iter().map(|p| p.clamp(0.0, 1.0)).collect())
    }

    pub fn probability(&self, reading: &SensorReading) -> Result<f64, ModelError> {
        self.probabilities(&[reading_to_features(reading)])?
            .first()
            .copied()
            .ok_or_else(|| ModelError::training("No prediction returned"))
    }

    /// Share of examples whose thresholded probability (>= 0.5) matches the label.
    pub fn accuracy(&self, examples: &[TrainingExample]) -> Result<f64, ModelError> {
        if examples.is_empty() {
            return Ok(0.0);
        }

        let (rows, _) = split_features(examples);
        let probabilities = self.probabilities(&rows)?;
        let correct = probabilities
            .iter()
            .zip(examples)
            .filter(|(p, e)| (**p >= 0.5) == e.failure)
            .count();

        Ok(correct as f64 / examples.len() as f64)
    }
}

fn split_features(examples: &[TrainingExample]) -> (Vec<FeatureVector>, Vec<f64>) {
    examples
        .iter()
        .map(|e| (reading_to_features(&e.reading), e.label()))
        .unzip()
}

fn to_matrix(rows: &[FeatureVector]) -> Result<DenseMatrix<f64>, ModelError> {
    let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
        .map_err(|e| ModelError::training(format!("Matrix creation failed: {}", e)))
}
