//! Output sinks receiving generated `(relative path, content)` pairs.

use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use indexmap::IndexMap;

/// Destination for generated files.
///
/// The generator never touches a concrete filesystem itself; it hands every
/// rendered file to a sink. A failed write for one file must leave files
/// already written untouched.
pub trait OutputSink {
    /// Write one file, addressed by a `/`-separated path relative to the sink root.
    fn write_file(&mut self, path: &str, content: &str) -> Result<WriteResult>;
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    #[default]
    Always,
    /// Only create if file doesn't exist
    IfMissing,
}

/// A sink that keeps files in memory, in write order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    files: IndexMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the content written for a path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Iterate over `(path, content)` pairs in write order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Consume the sink, returning the files.
    pub fn into_files(self) -> IndexMap<String, String> {
        self.files
    }
}

impl OutputSink for MemorySink {
    fn write_file(&mut self, path: &str, content: &str) -> Result<WriteResult> {
        self.files.insert(path.to_string(), content.to_string());
        Ok(WriteResult::Written)
    }
}

/// A sink that writes below a base directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    base: PathBuf,
    overwrite: Overwrite,
}

impl DirectorySink {
    /// Create a sink rooted at `base` that always overwrites.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            overwrite: Overwrite::Always,
        }
    }

    /// Change the overwrite behavior.
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Get the base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut full = self.base.clone();
        for component in path.split('/') {
            match component {
                "" | "." => continue,
                ".." => bail!("refusing to write outside the output directory: {}", path),
                part => full.push(part),
            }
        }
        Ok(full)
    }
}

impl OutputSink for DirectorySink {
    fn write_file(&mut self, path: &str, content: &str) -> Result<WriteResult> {
        let full = self.resolve(path)?;
        match self.overwrite {
            Overwrite::Always => {
                write_file(&full, content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if full.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&full, content)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_memory_sink_keeps_write_order() {
        let mut sink = MemorySink::new();
        sink.write_file("b.txt", "b").unwrap();
        sink.write_file("a.txt", "a").unwrap();

        let paths: Vec<_> = sink.files().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["b.txt", "a.txt"]);
        assert_eq!(sink.get("a.txt"), Some("a"));
    }

    #[test]
    fn test_directory_sink_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path());

        let result = sink.write_file("lib/Petstore/API.hs", "module").unwrap();

        assert_eq!(result, WriteResult::Written);
        let written = temp.path().join("lib").join("Petstore").join("API.hs");
        assert_eq!(fs::read_to_string(written).unwrap(), "module");
    }

    #[test]
    fn test_directory_sink_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path());

        sink.write_file("test.txt", "first").unwrap();
        sink.write_file("test.txt", "second").unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("test.txt")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_directory_sink_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("stack.yaml"), "user edits").unwrap();

        let mut sink = DirectorySink::new(temp.path()).with_overwrite(Overwrite::IfMissing);
        let result = sink.write_file("stack.yaml", "generated").unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(
            fs::read_to_string(temp.path().join("stack.yaml")).unwrap(),
            "user edits"
        );
    }

    #[test]
    fn test_directory_sink_rejects_parent_components() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path());

        assert!(sink.write_file("../escape.txt", "x").is_err());
    }
}
