use std::path::Path;

use crate::input::{InputError, ModelResults};

const PREDICTION_COLUMN: &str = "Prediction";
const LABEL_COLUMN: &str = "label";

/// Reads one model's result CSV. Requires a header row with `Prediction` and
/// `label` columns; any other columns are ignored.
pub fn load_model_results(path: &Path) -> Result<ModelResults, InputError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let prediction_idx = find_column(&headers, PREDICTION_COLUMN, path)?;
    let label_idx = find_column(&headers, LABEL_COLUMN, path)?;

    let mut predictions = Vec::new();
    let mut labels = Vec::new();

    for (row_no, record) in reader.records().enumerate() {
        let record = record?;
        predictions.push(parse_label(
            record.get(prediction_idx).unwrap_or(""),
            PREDICTION_COLUMN,
            row_no,
            path,
        )?);
        labels.push(parse_label(
            record.get(label_idx).unwrap_or(""),
            LABEL_COLUMN,
            row_no,
            path,
        )?);
    }

    if predictions.is_empty() {
        return Err(InputError::Schema(format!(
            "{}: no data rows",
            path.display()
        )));
    }

    Ok(ModelResults {
        predictions,
        labels,
    })
}

fn find_column(
    headers: &csv::StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, InputError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            InputError::Schema(format!(
                "{}: missing required column '{}'",
                path.display(),
                name
            ))
        })
}

/// Class labels must be non-negative integers; the dense vote counter is
/// indexed by label value.
fn parse_label(raw: &str, column: &str, row_no: usize, path: &Path) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    let value = trimmed.parse::<i64>().map_err(|_| {
        InputError::InvalidLabel(format!(
            "{}: row {}, column '{}': '{}' is not an integer",
            path.display(),
            row_no,
            column,
            trimmed
        ))
    })?;
    u32::try_from(value).map_err(|_| {
        InputError::InvalidLabel(format!(
            "{}: row {}, column '{}': {} is negative",
            path.display(),
            row_no,
            column,
            value
        ))
    })
}
