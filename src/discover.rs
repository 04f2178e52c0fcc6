// src/discover.rs

use std::path::PathBuf;

use glob::{glob_with, MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::{
    config::SummaryConfig,
    error::{Result, SummaryError},
};

/// List the input tables under `config.input_dir`, sorted by file name.
///
/// Hidden files are not matched by a leading wildcard. The summary file this
/// run will write is left out, so a second run in the
/// same folder sees the same inputs as the first.
pub fn discover_inputs(config: &SummaryConfig) -> Result<Vec<PathBuf>> {
    let dir = Pattern::escape(&config.input_dir.to_string_lossy());
    let pattern = format!("{}/{}", dir.trim_end_matches('/'), config.pattern);
    let output_name = config.output_file_name();

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    let entries = glob_with(&pattern, options).map_err(|source| SummaryError::Discovery {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        if config.input_dir == config.output_dir
            && path.file_name().and_then(|n| n.to_str()) == Some(output_name.as_str())
        {
            debug!(path = %path.display(), "skipping previous summary");
            continue;
        }
        files.push(path);
    }

    if files.is_empty() {
        return Err(SummaryError::NoInputFiles {
            dir: config.input_dir.clone(),
            pattern: config.pattern.clone(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(count = files.len(), "discovered input files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{init_test_logging, write_file};
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_csv_files_sorted() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        write_file(dir.path(), "b.csv", "Type,ID,Equation,Value\n")?;
        write_file(dir.path(), "a.csv", "Type,ID,Equation,Value\n")?;
        write_file(dir.path(), "notes.txt", "ignored")?;
        write_file(dir.path(), ".backup.csv", "Type,ID,Equation,Value\n")?;
        fs::create_dir(dir.path().join("nested.csv"))?;

        let files = discover_inputs(&SummaryConfig::new(dir.path()))?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
        Ok(())
    }

    #[test]
    fn empty_dir_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let err = discover_inputs(&SummaryConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, SummaryError::NoInputFiles { .. }));
        Ok(())
    }

    #[test]
    fn previous_summary_is_not_an_input() -> Result<()> {
        let dir = tempdir()?;
        let cfg = SummaryConfig::new(dir.path());
        write_file(dir.path(), &cfg.output_file_name(), "Type,ID,Equation\n")?;

        let err = discover_inputs(&cfg).unwrap_err();
        assert!(matches!(err, SummaryError::NoInputFiles { .. }));

        write_file(dir.path(), "run1.csv", "Type,ID,Equation,Value\n")?;
        assert_eq!(discover_inputs(&cfg)?.len(), 1);
        Ok(())
    }

    #[test]
    fn dir_with_glob_metacharacters() -> Result<()> {
        let root = tempdir()?;
        let dir = root.path().join("mc[1]");
        fs::create_dir(&dir)?;
        write_file(&dir, "a.csv", "Type,ID,Equation,Value\n")?;
        assert_eq!(discover_inputs(&SummaryConfig::new(&dir))?.len(), 1);
        Ok(())
    }

    #[test]
    fn custom_pattern() -> Result<()> {
        let dir = tempdir()?;
        write_file(dir.path(), "run.tsv", "x")?;
        write_file(dir.path(), "run.csv", "x")?;
        let files = discover_inputs(&SummaryConfig::new(dir.path()).with_pattern("*.tsv"))?;
        assert_eq!(files, vec![dir.path().join("run.tsv")]);
        Ok(())
    }
}
