use std::{
    env,
    path::{Path, PathBuf},
};

use crate::error::{Result, SummaryError};

/// Default glob for simulation output files.
pub const DEFAULT_PATTERN: &str = "*.csv";

/// Where the pipeline reads from and writes to.
///
/// Discovery and the emitter only ever see these paths, never the process
/// working directory, so a run can be pointed at any folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pattern: String,
}

impl SummaryConfig {
    /// Read and write in `dir`, matching `*.csv`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            output_dir: dir.clone(),
            input_dir: dir,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    /// The only place process state is consulted.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = env::current_dir().map_err(SummaryError::WorkingDir)?;
        Ok(Self::new(cwd))
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// `stat_<input dir name>.csv`
    pub fn output_file_name(&self) -> String {
        format!("stat_{}.csv", dir_label(&self.input_dir))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_file_name())
    }
}

fn dir_label(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "root".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_uses_dir_basename() {
        let cfg = SummaryConfig::new("/data/runs/batch_07");
        assert_eq!(cfg.output_file_name(), "stat_batch_07.csv");
        assert_eq!(
            cfg.output_path(),
            PathBuf::from("/data/runs/batch_07/stat_batch_07.csv")
        );
    }

    #[test]
    fn output_dir_can_differ_from_input() {
        let cfg = SummaryConfig::new("/data/runs/batch_07").with_output_dir("/tmp/out");
        assert_eq!(
            cfg.output_path(),
            PathBuf::from("/tmp/out/stat_batch_07.csv")
        );
    }

    #[test]
    fn filesystem_root_gets_a_label() {
        let cfg = SummaryConfig::new("/");
        assert_eq!(cfg.output_file_name(), "stat_root.csv");
    }
}
