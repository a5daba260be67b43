use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::{ConfigError, EnsembleConfig, OutputLayout};
use crate::input::{self, InputError};
use crate::metrics::{self, ConfusionMatrix, MetricsError};
use crate::output::{self, OutputError};
use crate::report::text::render_classification_report;
use crate::vote;

#[derive(Debug, Error)]
pub enum EnsembleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("failed to write run summary: {0}")]
    Summary(String),
    #[error("all {0} experiments failed")]
    AllFailed(usize),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperimentOutcome {
    pub experiment: u32,
    pub label: String,
    pub n_models: usize,
    pub n_samples: usize,
    pub accuracy: f64,
    pub predictions_path: PathBuf,
    pub scores_path: PathBuf,
    pub matrix_path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedExperiment {
    pub experiment: u32,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool_name: String,
    pub tool_version: String,
    pub method_tag: String,
    pub completed: Vec<ExperimentOutcome>,
    pub failed: Vec<FailedExperiment>,
}

/// Batch entry point: processes the configured experiments strictly
/// sequentially. A failure in one experiment is logged and the rest are still
/// attempted; the run as a whole fails only when nothing succeeded.
pub fn run_ensemble(config: &EnsembleConfig) -> Result<RunSummary, EnsembleError> {
    config.validate()?;
    let layout = config.output_layout();

    let mut completed = Vec::new();
    let mut failed = Vec::new();

    for &experiment in &config.experiments {
        match run_experiment(config, &layout, experiment) {
            Ok(outcome) => {
                info!(
                    "experiment {}: accuracy {:.4} over {} samples",
                    experiment, outcome.accuracy, outcome.n_samples
                );
                completed.push(outcome);
            }
            Err(err) => {
                error!("experiment {} failed: {}", experiment, err);
                failed.push(FailedExperiment {
                    experiment,
                    error: err.to_string(),
                });
            }
        }
    }

    let summary = RunSummary {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        method_tag: config.method_tag.clone(),
        completed,
        failed,
    };

    if config.write_summary {
        write_summary(&layout.root, &summary)?;
    }

    if summary.completed.is_empty() {
        return Err(EnsembleError::AllFailed(summary.failed.len()));
    }
    Ok(summary)
}

/// One experiment, start to finish: load the per-model results, reduce by
/// majority vote, score against ground truth, persist the three artifacts.
fn run_experiment(
    config: &EnsembleConfig,
    layout: &OutputLayout,
    experiment: u32,
) -> Result<ExperimentOutcome, EnsembleError> {
    let data = input::load_experiment(config, experiment)?;
    let consensus = vote::majority_vote(&data.matrix);

    let matrix = ConfusionMatrix::from_pairs(&data.truth, &consensus)?;
    let report = metrics::report_from_matrix(&matrix);
    let rendered = render_classification_report(&report);

    let label = config.ensemble_label(experiment);
    let predictions_path =
        output::write_predictions_csv(&layout.predictions_dir, &label, &consensus)?;
    let scores_path = output::write_scores_text(&layout.scores_dir, &label, &rendered)?;
    let matrix_path = output::write_matrix_csv(&layout.matrix_dir, &label, &matrix)?;

    println!("Results for {label}:");
    println!("{rendered}");

    Ok(ExperimentOutcome {
        experiment,
        label,
        n_models: data.matrix.num_models(),
        n_samples: data.matrix.num_samples(),
        accuracy: report.accuracy,
        predictions_path,
        scores_path,
        matrix_path,
    })
}

fn write_summary(root: &Path, summary: &RunSummary) -> Result<(), EnsembleError> {
    fs::create_dir_all(root).map_err(|e| EnsembleError::Summary(e.to_string()))?;
    let path = root.join("summary.json");
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| EnsembleError::Summary(e.to_string()))?;
    fs::write(&path, json).map_err(|e| EnsembleError::Summary(e.to_string()))?;
    info!("wrote run summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline.rs"]
mod tests;
