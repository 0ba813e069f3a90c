//! Test utilities for creating growing files and recording emitted lines.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub struct TempLogFile {
    pub path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempLogFile {
    /// Create a new empty temporary log file
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.log");

        File::create(&path)?;

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary log file holding exactly `content`
    pub fn with_content(content: &str) -> std::io::Result<Self> {
        let temp_file = Self::new()?;
        temp_file.append(content)?;
        Ok(temp_file)
    }

    /// Append raw bytes; no delimiter is added
    pub fn append(&self, content: &str) -> std::io::Result<()> {
        Self::append_to(&self.path, content)
    }

    /// Append bytes that need not be valid UTF-8
    pub fn append_bytes(&self, content: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(content)?;
        file.flush()
    }

    pub fn append_to(path: &Path, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A cloneable sink that records every emitted line.
#[derive(Clone, Default)]
pub struct CollectedLines(Arc<Mutex<Vec<String>>>);

impl CollectedLines {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl crate::sink::LineSink for CollectedLines {
    fn emit(&mut self, line: &str) -> crate::error::Result<()> {
        self.0.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::LineSink;

    #[test]
    fn test_temp_log_file_creation() {
        let temp_file = TempLogFile::new().unwrap();
        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_append_is_raw() {
        let temp_file = TempLogFile::with_content("line 1\n").unwrap();
        temp_file.append("frag").unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "line 1\nfrag");
    }

    #[test]
    fn test_collected_lines_shared_between_clones() {
        let collected = CollectedLines::default();
        let mut sink = collected.clone();

        sink.emit("a\n").unwrap();
        assert_eq!(collected.lines(), vec!["a\n"]);
    }
}
