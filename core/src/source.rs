use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Where raw production lines come from. The use-case layer only sees this
/// trait, so tests feed it in-memory lines instead of files.
pub trait ProductionSource {
    fn load(&self) -> Result<Vec<String>>;
}

/// A production log export on disk, one event per line.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductionSource for FileSource {
    fn load(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read production log {}", self.path.display()))?;
        Ok(contents
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect())
    }
}

/// In-memory lines, for library callers and tests.
pub struct MemorySource {
    lines: Vec<String>,
}

impl MemorySource {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl ProductionSource for MemorySource {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.lines.clone())
    }
}
