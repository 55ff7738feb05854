//! Generated artifacts and how they reach the disk

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

/// Represents a generated file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Relative path from project root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

impl GeneratedFile {
    /// Write the file under `project_root`, creating parent directories
    ///
    /// Returns the absolute path written.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or the file cannot
    /// be written.
    pub fn write_under(&self, project_root: &Path) -> Result<PathBuf> {
        let full_path = project_root.join(&self.path);
        write_file(&full_path, &self.content)?;
        Ok(full_path)
    }
}

/// Write `content` to `path`, creating parent directories if they don't exist
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be
/// written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ScaffoldError::io(path, e))
}

/// Read a text file
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))
}
