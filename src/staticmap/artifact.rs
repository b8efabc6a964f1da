use crate::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Transient on-disk copy of the last fetched map image.
///
/// The file lives only as long as the session: it is removed whenever the
/// center coordinate is edited and when the artifact is dropped.
#[derive(Debug)]
pub struct ImageArtifact {
    dir: Option<PathBuf>,
    file: Option<NamedTempFile>,
}

impl ImageArtifact {
    /// Artifact in the system temp directory
    pub fn new() -> Self {
        Self { dir: None, file: None }
    }

    /// Artifact inside a specific directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            file: None,
        }
    }

    /// Writes the image to a fresh file, replacing the previous one
    pub fn store(&mut self, bytes: &[u8]) -> Result<&Path> {
        self.invalidate();

        let mut builder = Builder::new();
        builder.prefix("mapview-").suffix(".png");
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;
        log::debug!("stored map image at {}", file.path().display());

        Ok(self.file.insert(file).path())
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path())
    }

    pub fn is_stored(&self) -> bool {
        self.file.is_some()
    }

    /// Deletes the file if there is one. Safe to call repeatedly.
    pub fn invalidate(&mut self) {
        if let Some(file) = self.file.take() {
            let path = file.path().to_path_buf();
            if let Err(e) = file.close() {
                log::warn!("failed to remove {}: {}", path.display(), e);
            } else {
                log::debug!("removed map image {}", path.display());
            }
        }
    }
}

impl Default for ImageArtifact {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ImageArtifact {
    fn drop(&mut self) {
        self.invalidate();
    }
}
