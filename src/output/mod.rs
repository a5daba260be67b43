use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::metrics::ConfusionMatrix;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes the consensus vector as a single-column `prediction` CSV,
/// overwriting any previous file for the same label.
pub fn write_predictions_csv(
    dir: &Path,
    label: &str,
    consensus: &[u32],
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{label}.csv"));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["prediction"])?;
    for &value in consensus {
        writer.write_record([value.to_string()])?;
    }
    writer.flush()?;

    info!("wrote consensus predictions to {}", path.display());
    Ok(path)
}

pub fn write_scores_text(dir: &Path, label: &str, rendered: &str) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{label}.txt"));

    let mut w = BufWriter::new(File::create(&path)?);
    w.write_all(rendered.as_bytes())?;
    w.flush()?;

    info!("wrote classification report to {}", path.display());
    Ok(path)
}

/// Writes the confusion matrix as a CSV table with `Actual k` row labels and
/// `Predicted k` column labels.
pub fn write_matrix_csv(
    dir: &Path,
    label: &str,
    matrix: &ConfusionMatrix,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{label}_matrix.csv"));

    let mut writer = csv::Writer::from_path(&path)?;

    let mut header = vec![String::new()];
    for k in 0..matrix.num_classes() {
        header.push(format!("Predicted {k}"));
    }
    writer.write_record(&header)?;

    for (k, row) in matrix.counts().iter().enumerate() {
        let mut record = vec![format!("Actual {k}")];
        for &count in row {
            record.push(count.to_string());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!("wrote confusion matrix to {}", path.display());
    Ok(path)
}

/// Reads a written predictions CSV back into a consensus vector.
pub fn read_predictions_csv(path: &Path) -> Result<Vec<u32>, OutputError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut out = Vec::new();
    for record in reader.records() {
        let record = record?;
        let raw = record.get(0).unwrap_or("").trim();
        let value = raw.parse::<u32>().map_err(|_| {
            OutputError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{}: '{}' is not a prediction", path.display(), raw),
            ))
        })?;
        out.push(value);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/output.rs"]
mod tests;
