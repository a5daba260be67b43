use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("empty prediction matrix")]
    Empty,
    #[error("ragged prediction matrix: row {row} has {got} samples, expected {expected}")]
    Ragged {
        row: usize,
        got: usize,
        expected: usize,
    },
}

/// Stacked per-model predictions, one row per model in configured model
/// order, one column per sample. Row lengths are uniform by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionMatrix {
    rows: Vec<Vec<u32>>,
}

impl PredictionMatrix {
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<PredictionMatrix, VoteError> {
        let first = rows.first().ok_or(VoteError::Empty)?;
        if first.is_empty() {
            return Err(VoteError::Empty);
        }
        let expected = first.len();
        for (row, values) in rows.iter().enumerate().skip(1) {
            if values.len() != expected {
                return Err(VoteError::Ragged {
                    row,
                    got: values.len(),
                    expected,
                });
            }
        }
        Ok(PredictionMatrix { rows })
    }

    pub fn num_models(&self) -> usize {
        self.rows.len()
    }

    pub fn num_samples(&self) -> usize {
        self.rows[0].len()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }
}

/// Element-wise majority vote over the model axis.
///
/// Counts are dense, indexed by label value, and scanned from label 0 with a
/// strict comparison, so an even split resolves to the smallest label. That
/// tie-break is part of the output contract and must not change.
pub fn majority_vote(matrix: &PredictionMatrix) -> Vec<u32> {
    let n_samples = matrix.num_samples();
    let max_label = matrix
        .rows
        .iter()
        .flat_map(|row| row.iter().copied())
        .max()
        .unwrap_or(0) as usize;

    let mut counts = vec![0u32; max_label + 1];
    let mut consensus = Vec::with_capacity(n_samples);

    for sample in 0..n_samples {
        counts.iter_mut().for_each(|c| *c = 0);
        for row in &matrix.rows {
            counts[row[sample] as usize] += 1;
        }

        let mut best_label = 0u32;
        let mut best_count = 0u32;
        for (label, &count) in counts.iter().enumerate() {
            if count > best_count {
                best_label = label as u32;
                best_count = count;
            }
        }
        consensus.push(best_label);
    }

    consensus
}

#[cfg(test)]
#[path = "../../tests/src_inline/vote.rs"]
mod tests;
