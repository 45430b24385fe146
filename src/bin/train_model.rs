use anyhow::{Context, Result};
use clap::Parser;
use machine_health::application::ml::synthetic_data::generate_synthetic_dataset;
use machine_health::application::ml::{ForestParams, MaintenanceModel, TrainingConfig};
use machine_health::domain::health::PredictionResult;
use machine_health::domain::sensor::SensorReading;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to output model file
    #[arg(long, default_value = "data/models/trained_model.json")]
    output: PathBuf,

    /// Number of synthetic samples (half normal, half failure)
    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// Seed for the synthetic dataset
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Maximum depth of trees
    #[arg(long, default_value_t = 10)]
    max_depth: u16,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 2)]
    min_split: usize,

    /// Also write the synthetic dataset to this CSV file
    #[arg(long)]
    dataset_csv: Option<PathBuf>,

    /// Demo reading as TEMPERATURE VIBRATION PRESSURE
    #[arg(long, num_args = 3, default_values_t = [85.0, 0.6, 12.0], allow_negative_numbers = true)]
    demo: Vec<f64>,
}

/// One CSV row per example, columns in feature order plus the label.
#[derive(Serialize)]
struct DatasetRow {
    temperature: f64,
    vibration: f64,
    pressure: f64,
    failure: u8,
}

fn export_dataset(path: &Path, samples: usize, seed: u64) -> Result<()> {
    let data = generate_synthetic_dataset(samples, seed)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut wtr = csv::Writer::from_writer(file);
    for example in &data {
        wtr.serialize(DatasetRow {
            temperature: example.reading.temperature,
            vibration: example.reading.vibration,
            pressure: example.reading.pressure,
            failure: example.failure as u8,
        })?;
    }
    wtr.flush()?;

    println!("Wrote {} synthetic examples to {:?}", data.len(), path);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = TrainingConfig {
        samples: args.samples,
        data_seed: args.seed,
        forest: ForestParams {
            n_trees: args.n_trees,
            max_depth: args.max_depth,
            min_split: args.min_split,
        },
        ..TrainingConfig::default()
    };

    if let Some(csv_path) = &args.dataset_csv {
        export_dataset(csv_path, args.samples, args.seed)
            .with_context(|| format!("Failed to export dataset to {:?}", csv_path))?;
    }

    println!(
        "Training Random Forest (Samples: {}, Trees: {}, Depth: {}, MinSplit: {})...",
        args.samples, args.n_trees, args.max_depth, args.min_split
    );

    let model = MaintenanceModel::new(config);
    let report = model.train()?;
    println!("Training accuracy: {:.3}", report.train_accuracy);
    println!("Testing accuracy: {:.3}", report.test_accuracy);

    model
        .persist(&args.output)
        .with_context(|| format!("Failed to save model to {:?}", args.output))?;
    println!("Model saved to {:?}", args.output);

    let reading = SensorReading::new(args.demo[0], args.demo[1], args.demo[2]);
    let probability = model.predict_failure_probability(
        reading.temperature,
        reading.vibration,
        reading.pressure,
    )?;
    let result = PredictionResult::from_probability(probability);

    println!("\nTest prediction:");
    println!("Sensor readings: {}", reading);
    println!("Failure probability: {:.1}%", result.failure_probability);
    println!("Machine status: {}", result.machine_status);
    println!("Alert level: {}", result.alert_level);

    Ok(())
}
