use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DEFAULT_RESULTS_FILENAME: &str = "results_no_dataleak.csv";
pub const DEFAULT_METHOD_TAG: &str = "majority_vote";

/// Execution platform. Replaces runtime environment sniffing with an
/// explicit, enumerated path-prefix mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Local,
    Kaggle,
    Colab,
}

impl Platform {
    pub fn path_prefix(self) -> Option<&'static str> {
        match self {
            Platform::Local => None,
            Platform::Kaggle => Some("/kaggle/working"),
            Platform::Colab => Some("/content"),
        }
    }

    /// Prefixes relative paths with the platform root. Absolute paths are
    /// taken as-is on every platform.
    pub fn resolve(self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.path_prefix() {
            Some(prefix) => Path::new(prefix).join(path),
            None => path.to_path_buf(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: no model result directories given")]
    NoModelDirs,
    #[error("invalid config: no experiments given")]
    NoExperiments,
    #[error("invalid config: results filename is empty")]
    EmptyResultsFilename,
}

#[derive(Debug, Clone)]
pub struct EnsembleConfig {
    pub model_dirs: Vec<PathBuf>,
    pub experiments: Vec<u32>,
    pub results_filename: String,
    pub out_dir: PathBuf,
    pub method_tag: String,
    pub platform: Platform,
    pub write_summary: bool,
}

impl EnsembleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_dirs.is_empty() {
            return Err(ConfigError::NoModelDirs);
        }
        if self.experiments.is_empty() {
            return Err(ConfigError::NoExperiments);
        }
        if self.results_filename.is_empty() {
            return Err(ConfigError::EmptyResultsFilename);
        }
        Ok(())
    }

    /// Human-readable artifact key for one experiment, e.g. `majority_vote_3`.
    pub fn ensemble_label(&self, experiment: u32) -> String {
        format!("{}_{}", self.method_tag, experiment)
    }

    /// `<model_dir>/<experiment>/<results_filename>`, platform-resolved.
    pub fn results_path(&self, model_dir: &Path, experiment: u32) -> PathBuf {
        self.platform
            .resolve(model_dir)
            .join(experiment.to_string())
            .join(&self.results_filename)
    }

    pub fn output_layout(&self) -> OutputLayout {
        OutputLayout::from_root(&self.platform.resolve(&self.out_dir))
    }
}

/// Per-run output directory structure. Directories are created lazily by the
/// writers; the layout itself is pure path arithmetic.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub predictions_dir: PathBuf,
    pub scores_dir: PathBuf,
    pub matrix_dir: PathBuf,
}

impl OutputLayout {
    pub fn from_root(root: &Path) -> OutputLayout {
        OutputLayout {
            root: root.to_path_buf(),
            predictions_dir: root.join("predictions"),
            scores_dir: root.join("scores"),
            matrix_dir: root.join("confusion_matrices"),
        }
    }
}
