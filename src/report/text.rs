use crate::metrics::{ClassMetrics, ClassificationReport};

const LABEL_WIDTH: usize = 12;

/// Renders the report in the familiar per-class tabular layout: one row per
/// class, then accuracy, macro avg, and weighted avg rows.
pub fn render_classification_report(report: &ClassificationReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:>width$}  {:>9} {:>9} {:>9} {:>9}\n",
        "",
        "precision",
        "recall",
        "f1-score",
        "support",
        width = LABEL_WIDTH
    ));
    out.push('\n');

    for (class, m) in report.per_class.iter().enumerate() {
        out.push_str(&metrics_row(&class.to_string(), m));
    }
    out.push('\n');

    out.push_str(&format!(
        "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}\n",
        "accuracy",
        "",
        "",
        report.accuracy,
        report.total_support,
        width = LABEL_WIDTH
    ));
    out.push_str(&metrics_row("macro avg", &report.macro_avg));
    out.push_str(&metrics_row("weighted avg", &report.weighted_avg));

    out
}

fn metrics_row(name: &str, m: &ClassMetrics) -> String {
    format!(
        "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}\n",
        name,
        m.precision,
        m.recall,
        m.f1,
        m.support,
        width = LABEL_WIDTH
    )
}
