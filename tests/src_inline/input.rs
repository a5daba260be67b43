use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::config::{EnsembleConfig, Platform};
use crate::vote::majority_vote;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("ensemble_vote_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn config_for(root: &Path, model_names: &[&str]) -> EnsembleConfig {
    EnsembleConfig {
        model_dirs: model_names.iter().map(|n| root.join(n)).collect(),
        experiments: vec![1],
        results_filename: "results_no_dataleak.csv".to_string(),
        out_dir: root.join("out"),
        method_tag: "majority_vote".to_string(),
        platform: Platform::Local,
        write_summary: false,
    }
}

fn write_results(root: &Path, model: &str, experiment: u32, contents: &str) {
    let path = root
        .join(model)
        .join(experiment.to_string())
        .join("results_no_dataleak.csv");
    write_file(&path, contents);
}

#[test]
fn test_load_model_results_extra_columns_ignored() {
    let dir = make_temp_dir();
    let path = dir.join("results_no_dataleak.csv");
    write_file(
        &path,
        "Ground Truth,Prediction,label,language\n0,1,0,en\n1,1,1,de\n",
    );

    let results = load_model_results(&path).unwrap();
    assert_eq!(results.predictions, vec![1, 1]);
    assert_eq!(results.labels, vec![0, 1]);
}

#[test]
fn test_load_model_results_missing_column() {
    let dir = make_temp_dir();
    let path = dir.join("results_no_dataleak.csv");
    write_file(&path, "Prediction,truth\n0,0\n");

    let err = load_model_results(&path).unwrap_err();
    assert!(matches!(err, InputError::Schema(_)), "{err}");
    assert!(err.to_string().contains("label"));
}

#[test]
fn test_load_model_results_negative_label() {
    let dir = make_temp_dir();
    let path = dir.join("results_no_dataleak.csv");
    write_file(&path, "Prediction,label\n-1,0\n");

    let err = load_model_results(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidLabel(_)), "{err}");
}

#[test]
fn test_load_model_results_non_integer_label() {
    let dir = make_temp_dir();
    let path = dir.join("results_no_dataleak.csv");
    write_file(&path, "Prediction,label\n0.5,0\n");

    let err = load_model_results(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidLabel(_)), "{err}");
}

#[test]
fn test_load_experiment_stacks_in_model_order() {
    let dir = make_temp_dir();
    write_results(&dir, "nn", 1, "Prediction,label\n0,0\n1,1\n1,0\n");
    write_results(&dir, "rf", 1, "Prediction,label\n1,0\n1,1\n0,0\n");
    write_results(&dir, "svm", 1, "Prediction,label\n0,0\n1,1\n1,0\n");

    let config = config_for(&dir, &["nn", "rf", "svm"]);
    let data = load_experiment(&config, 1).unwrap();

    assert_eq!(data.matrix.num_models(), 3);
    assert_eq!(data.matrix.num_samples(), 3);
    assert_eq!(data.matrix.rows()[1], vec![1, 1, 0]);
    assert_eq!(data.truth, vec![0, 1, 0]);
    assert_eq!(majority_vote(&data.matrix), vec![0, 1, 1]);
}

#[test]
fn test_load_experiment_truth_from_first_file() {
    let dir = make_temp_dir();
    write_results(&dir, "nn", 1, "Prediction,label\n0,1\n1,1\n");
    // disagreeing label column: warned about, first file wins
    write_results(&dir, "rf", 1, "Prediction,label\n0,0\n1,0\n");

    let config = config_for(&dir, &["nn", "rf"]);
    let data = load_experiment(&config, 1).unwrap();
    assert_eq!(data.truth, vec![1, 1]);
}

#[test]
fn test_load_experiment_missing_file() {
    let dir = make_temp_dir();
    write_results(&dir, "nn", 1, "Prediction,label\n0,0\n");

    let config = config_for(&dir, &["nn", "rf"]);
    let err = load_experiment(&config, 1).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)), "{err}");
    assert!(err.to_string().contains("rf"));
    assert!(err.to_string().contains("experiment 1"));
}

#[test]
fn test_load_experiment_shape_mismatch() {
    let dir = make_temp_dir();
    write_results(&dir, "nn", 1, "Prediction,label\n0,0\n1,1\n");
    write_results(&dir, "rf", 1, "Prediction,label\n0,0\n");

    let config = config_for(&dir, &["nn", "rf"]);
    let err = load_experiment(&config, 1).unwrap_err();
    assert!(matches!(err, InputError::ShapeMismatch(_)), "{err}");
}

#[test]
fn test_check_row_alignment_reports_model_dir() {
    let dir = make_temp_dir();
    let config = config_for(&dir, &["nn", "rf"]);
    let rows = vec![vec![0, 1], vec![0]];
    let err = check_row_alignment(&rows, 2, 7, &config).unwrap_err();
    assert!(err.to_string().contains("rf"));
    assert!(err.to_string().contains("experiment 7"));
}
