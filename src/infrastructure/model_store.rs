//! On-disk format of a trained model.
//!
//! The artifact is one JSON document holding the fitted scaler, the fitted
//! forest and a ready tag. Decoding is all-or-nothing: callers only receive a
//! [`TrainedModel`] once every part parsed and validated.

use crate::application::ml::scaler::StandardScaler;
use crate::application::ml::trained_model::{ProbabilityForest, TrainedModel};
use crate::domain::errors::ModelError;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ArtifactRef<'a> {
    format_version: u32,
    ready: bool,
    scaler: &'a StandardScaler,
    forest: &'a ProbabilityForest,
}

#[derive(Deserialize)]
struct ModelArtifact {
    format_version: u32,
    ready: bool,
    scaler: StandardScaler,
    forest: ProbabilityForest,
}

pub fn encode(model: &TrainedModel) -> Result<Vec<u8>, ModelError> {
    let artifact = ArtifactRef {
        format_version: ARTIFACT_FORMAT_VERSION,
        ready: true,
        scaler: model.scaler(),
        forest: model.forest(),
    };
    serde_json::to_vec(&artifact).map_err(ModelError::training)
}

pub fn decode(bytes: &[u8], path: &Path) -> Result<TrainedModel, ModelError> {
    let corrupt = |reason: String| ModelError::CorruptArtifact {
        path: path.to_path_buf(),
        reason,
    };

    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
    if !has_trees(&value) {
        return Err(corrupt("forest contains no trees".to_string()));
    }
    let artifact: ModelArtifact =
        serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))?;

    if artifact.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(corrupt(format!(
            "unsupported format version {} (expected {})",
            artifact.format_version, ARTIFACT_FORMAT_VERSION
        )));
    }
    if !artifact.ready {
        return Err(corrupt("artifact is not tagged ready".to_string()));
    }
    if !artifact.scaler.is_valid() {
        return Err(corrupt("scaler parameters are not finite".to_string()));
    }

    let model = TrainedModel::from_parts(artifact.scaler, artifact.forest);
    check_inference(&model).map_err(corrupt)?;
    Ok(model)
}

/// smartcore keeps its fitted trees under `forest_regressor.trees`; an absent,
/// null or empty list would yield NaN or panic at inference time.
fn has_trees(artifact: &serde_json::Value) -> bool {
    artifact
        .pointer("/forest/forest_regressor/trees")
        .and_then(serde_json::Value::as_array)
        .is_some_and(|trees| !trees.is_empty())
}

/// Raw forest output at the training mean must be a finite probability.
fn check_inference(model: &TrainedModel) -> Result<(), String> {
    let row = model.scaler().transform(model.scaler().mean());
    let x = DenseMatrix::from_2d_vec(&vec![row.to_vec()]).map_err(|e| e.to_string())?;
    let prediction = model
        .forest()
        .predict(&x)
        .map_err(|e| format!("forest failed to predict: {}", e))?;

    match prediction.first() {
        Some(p) if p.is_finite() && (0.0..=1.0).contains(p) => Ok(()),
        Some(p) => Err(format!("forest produced invalid probability {}", p)),
        None => Err("forest returned no prediction".to_string()),
    }
}

/// Writes the artifact atomically: temp file first, then rename over `path`.
pub fn save(path: &Path, model: &TrainedModel) -> Result<(), ModelError> {
    let bytes = encode(model)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ModelError::io(parent, e))?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, bytes).map_err(|e| ModelError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| ModelError::io(path, e))?;

    info!("Model saved to {:?}", path);
    Ok(())
}

pub fn load(path: &Path) -> Result<TrainedModel, ModelError> {
    let bytes = fs::read(path).map_err(|e| ModelError::io(path, e))?;
    let model = decode(&bytes, path)?;
    info!("Model loaded from {:?}", path);
    Ok(model)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
