use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Connection to the YAML-file person store. Holds the base directory under
/// which each person gets their own subdirectory.
#[derive(Debug, Clone)]
pub struct YamlConnection {
    base_directory: PathBuf,
}

impl YamlConnection {
    /// Create a new connection rooted at `base_directory`, creating the
    /// people directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        let connection = Self { base_directory };
        fs::create_dir_all(connection.people_directory())
            .context("Failed to create people directory")?;
        Ok(connection)
    }

    /// Root of the store
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory containing one subdirectory per person
    pub fn people_directory(&self) -> PathBuf {
        self.base_directory.join("people")
    }
}
