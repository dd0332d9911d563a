//! YAML artifact writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use custspec_core::{CustomerSpec, Error, Result};
use tempfile::NamedTempFile;

/// Default artifact file name.
pub const DEFAULT_OUTPUT: &str = "customers.yaml";

/// Writes customer spec records to a YAML file.
///
/// The file is replaced as a whole: content goes to a temporary file in the
/// destination directory which is then renamed over the destination, so
/// readers see either the previous artifact or the complete new one.
///
/// The artifact carries store passwords, so on Unix it is left readable by
/// its owner only (mode `0600`, as created by [`NamedTempFile`]).
#[derive(Debug, Clone)]
pub struct SpecSerializer {
    path: PathBuf,
}

impl SpecSerializer {
    /// Creates a serializer writing to `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders `records` exactly as [`persist`](Self::persist) would write them.
    pub fn render(records: &[CustomerSpec]) -> Result<String> {
        Ok(serde_yaml::to_string(records)?)
    }

    /// Writes `records`, replacing any existing artifact.
    pub fn persist(&self, records: &[CustomerSpec]) -> Result<()> {
        let rendered = Self::render(records)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(rendered.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        tracing::info!(path = %self.path.display(), records = records.len(), "wrote customer specs");
        Ok(())
    }
}
