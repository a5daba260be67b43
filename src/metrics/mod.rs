use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("length mismatch: {truth} ground-truth labels vs {predicted} predictions")]
    LengthMismatch { truth: usize, predicted: usize },
    #[error("empty label vectors")]
    Empty,
}

/// C x C cross-tabulation of true vs predicted labels,
/// `counts[actual][predicted]`. C is the max observed label plus one, so
/// classes below the max that never occur still get zero rows and columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn from_pairs(truth: &[u32], predicted: &[u32]) -> Result<ConfusionMatrix, MetricsError> {
        if truth.len() != predicted.len() {
            return Err(MetricsError::LengthMismatch {
                truth: truth.len(),
                predicted: predicted.len(),
            });
        }
        if truth.is_empty() {
            return Err(MetricsError::Empty);
        }

        let max_label = truth
            .iter()
            .chain(predicted.iter())
            .copied()
            .max()
            .unwrap_or(0) as usize;
        let n_classes = max_label + 1;

        let mut counts = vec![vec![0usize; n_classes]; n_classes];
        for (&actual, &pred) in truth.iter().zip(predicted.iter()) {
            counts[actual as usize][pred as usize] += 1;
        }

        Ok(ConfusionMatrix { counts })
    }

    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|row| row.iter().sum::<usize>()).sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.num_classes()).map(|k| self.counts[k][k]).sum();
        correct as f64 / total as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class precision/recall/F1/support plus accuracy and macro/weighted
/// averages, with sklearn zero-division semantics (undefined ratios are 0).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub total_support: usize,
}

pub fn classification_report(
    truth: &[u32],
    predicted: &[u32],
) -> Result<ClassificationReport, MetricsError> {
    let matrix = ConfusionMatrix::from_pairs(truth, predicted)?;
    Ok(report_from_matrix(&matrix))
}

pub fn report_from_matrix(matrix: &ConfusionMatrix) -> ClassificationReport {
    let n_classes = matrix.num_classes();
    let counts = matrix.counts();
    let total = matrix.total();

    let mut per_class = Vec::with_capacity(n_classes);
    for k in 0..n_classes {
        let tp = counts[k][k];
        let support: usize = counts[k].iter().sum();
        let predicted_as_k: usize = (0..n_classes).map(|a| counts[a][k]).sum();

        let precision = ratio(tp, predicted_as_k);
        let recall = ratio(tp, support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        per_class.push(ClassMetrics {
            precision,
            recall,
            f1,
            support,
        });
    }

    let n = n_classes as f64;
    let macro_avg = ClassMetrics {
        precision: per_class.iter().map(|m| m.precision).sum::<f64>() / n,
        recall: per_class.iter().map(|m| m.recall).sum::<f64>() / n,
        f1: per_class.iter().map(|m| m.f1).sum::<f64>() / n,
        support: total,
    };

    let weighted_avg = if total > 0 {
        ClassMetrics {
            precision: weighted(&per_class, total, |m| m.precision),
            recall: weighted(&per_class, total, |m| m.recall),
            f1: weighted(&per_class, total, |m| m.f1),
            support: total,
        }
    } else {
        macro_avg
    };

    ClassificationReport {
        per_class,
        accuracy: matrix.accuracy(),
        macro_avg,
        weighted_avg,
        total_support: total,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn weighted(per_class: &[ClassMetrics], total: usize, value: impl Fn(&ClassMetrics) -> f64) -> f64 {
    per_class
        .iter()
        .map(|m| value(m) * m.support as f64)
        .sum::<f64>()
        / total as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics.rs"]
mod tests;
