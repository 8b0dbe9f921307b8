//! Candidate source drawing random image files from a local directory

use crate::io::error::{MosaicError, Result, unavailable};
use crate::io::source::{Candidate, CandidateSource};
use crate::spatial::cell::SourceRef;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// File extensions recognised as candidate images
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// Picks a random image file per acquisition
///
/// Files are listed once at construction. Source references are the file
/// paths, so the exporter can load the same image again.
pub struct DirectorySource {
    root: PathBuf,
    files: Vec<PathBuf>,
    rng: Mutex<StdRng>,
}

impl DirectorySource {
    /// List the image files directly inside `root`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be read
    /// - The directory contains no image files
    pub fn open(root: impl AsRef<Path>, seed: u64) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let entries = std::fs::read_dir(&root).map_err(|e| MosaicError::FileSystem {
            path: root.clone(),
            operation: "read directory",
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| MosaicError::FileSystem {
                    path: root.clone(),
                    operation: "read directory entry",
                    source: e,
                })?
                .path();
            if path.is_file() && is_image_path(&path) {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(MosaicError::InvalidSourceData {
                reason: format!("No image files found in '{}'", root.display()),
            });
        }

        tracing::info!(
            directory = %root.display(),
            files = files.len(),
            "Indexed candidate directory"
        );

        Ok(Self {
            root,
            files,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        })
    }

    /// Drop `path` from the candidate pool
    ///
    /// Paths are compared after canonicalization when both resolve.
    pub fn exclude(&mut self, path: &Path) {
        let excluded = std::fs::canonicalize(path).ok();
        self.files.retain(|file| {
            if file == path {
                return false;
            }
            match (&excluded, std::fs::canonicalize(file)) {
                (Some(excluded), Ok(canonical)) => *excluded != canonical,
                _ => true,
            }
        });
    }

    /// Directory the candidates come from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files in the pool
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    fn pick(&self) -> Option<PathBuf> {
        if self.files.is_empty() {
            return None;
        }
        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(0..self.files.len());
        self.files.get(index).cloned()
    }
}

#[async_trait]
impl CandidateSource for DirectorySource {
    async fn acquire(&self) -> Result<Candidate> {
        let path = self
            .pick()
            .ok_or_else(|| unavailable(&"candidate directory has no usable files"))?;

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| MosaicError::CandidateFetch {
                location: path.clone(),
                source: e,
            })?;

        let reference = SourceRef::new(path.to_string_lossy());
        let decode_reference = reference.clone();
        let image = tokio::task::spawn_blocking(move || {
            image::load_from_memory(&bytes)
                .map(|decoded| decoded.to_rgb8())
                .map_err(|e| MosaicError::CandidateDecode {
                    reference: decode_reference.to_string(),
                    source: e,
                })
        })
        .await
        .map_err(|e| unavailable(&format!("decode task failed: {e}")))??;

        Ok(Candidate {
            image,
            source: reference,
        })
    }
}

/// Whether the path carries a recognised image extension
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
