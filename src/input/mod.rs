use thiserror::Error;
use tracing::{info, warn};

pub mod results;

use crate::config::EnsembleConfig;
use crate::vote::{PredictionMatrix, VoteError};
use results::load_model_results;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("invalid label: {0}")]
    InvalidLabel(String),
}

impl From<VoteError> for InputError {
    fn from(value: VoteError) -> Self {
        InputError::ShapeMismatch(value.to_string())
    }
}

/// One model's result file: predicted labels and the ground-truth column it
/// carries, in file row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResults {
    pub predictions: Vec<u32>,
    pub labels: Vec<u32>,
}

/// Everything one experiment needs for the vote: the stacked prediction
/// matrix and the ground truth taken from the first model's file.
#[derive(Debug, Clone)]
pub struct ExperimentData {
    pub matrix: PredictionMatrix,
    pub truth: Vec<u32>,
}

/// Reads every model's result file for one experiment and stacks the
/// prediction columns into a matrix, model order preserved.
///
/// The first file's `label` column is authoritative for ground truth. Later
/// files must match its row count (hard error); a later file whose labels
/// disagree only in content is warned about, keeping the trust-first-file
/// behavior visible instead of silent.
pub fn load_experiment(
    config: &EnsembleConfig,
    experiment: u32,
) -> Result<ExperimentData, InputError> {
    let mut rows: Vec<Vec<u32>> = Vec::with_capacity(config.model_dirs.len());
    let mut truth: Option<Vec<u32>> = None;

    for model_dir in &config.model_dirs {
        let path = config.results_path(model_dir, experiment);
        if !path.exists() {
            return Err(InputError::MissingInput(format!(
                "experiment {}: no result file for model dir {} (expected {})",
                experiment,
                model_dir.display(),
                path.display()
            )));
        }

        let results = load_model_results(&path)?;

        if let Some(first_labels) = truth.as_ref() {
            if results.labels.len() != first_labels.len() {
                return Err(InputError::ShapeMismatch(format!(
                    "experiment {}: {} has {} rows, expected {} (from first model file)",
                    experiment,
                    path.display(),
                    results.labels.len(),
                    first_labels.len()
                )));
            }
            if &results.labels != first_labels {
                warn!(
                    "experiment {}: label column in {} disagrees with the first model file; keeping the first",
                    experiment,
                    path.display()
                );
            }
        } else {
            truth = Some(results.labels);
        }

        rows.push(results.predictions);
    }

    let truth = truth.ok_or_else(|| {
        InputError::MissingInput(format!(
            "experiment {}: no model result files read",
            experiment
        ))
    })?;

    check_row_alignment(&rows, truth.len(), experiment, config)?;
    let matrix = PredictionMatrix::from_rows(rows)?;

    info!(
        "experiment {}: loaded {} models x {} samples",
        experiment,
        matrix.num_models(),
        matrix.num_samples()
    );

    Ok(ExperimentData { matrix, truth })
}

fn check_row_alignment(
    rows: &[Vec<u32>],
    expected: usize,
    experiment: u32,
    config: &EnsembleConfig,
) -> Result<(), InputError> {
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != expected {
            let model_dir = &config.model_dirs[idx];
            return Err(InputError::ShapeMismatch(format!(
                "experiment {}: model dir {} yielded {} predictions, expected {}",
                experiment,
                model_dir.display(),
                row.len(),
                expected
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input.rs"]
mod tests;
