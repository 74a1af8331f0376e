//! Writing image batches to disk as JPEG files.
//!
//! Files land in a single output directory, named
//! `<prefix>_<YYYYMMDD_HHMMSS>_<n>.jpg` where `n` is the 1-based position
//! in the batch. The timestamp is taken per image, so the index is what
//! keeps names within one batch apart.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::encode::{encode_jpeg, EncodeError, EncodeOptions, Subsampling};
use crate::quality::Quality;
use crate::tensor::{ImageBatch, TensorError};

/// Directory the saver writes into, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Filename prefix for saved images.
pub const DEFAULT_PREFIX: &str = "comfyui_jpg";

/// `strftime` pattern for the timestamp part of a filename.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Errors raised while saving. Files written before the error stay on disk.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Tensor(#[from] TensorError),
}

/// Folder category reported to the host's preview UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderType {
    #[default]
    Output,
}

/// Record of one written file, as shown in the host's preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedImage {
    pub filename: String,
    pub subfolder: String,
    #[serde(rename = "type")]
    pub folder_type: FolderType,
}

impl SavedImage {
    /// A file saved directly in the output folder.
    pub fn output(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            subfolder: String::new(),
            folder_type: FolderType::Output,
        }
    }
}

/// Where and how the saver writes files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaverConfig {
    pub output_dir: PathBuf,
    pub prefix: String,
    pub quality: Quality,
    pub optimize: bool,
    pub subsampling: Subsampling,
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            quality: Quality::DEFAULT,
            optimize: true,
            subsampling: Subsampling::Yuv420,
        }
    }
}

/// Build the filename for the image at zero-based `index`.
pub fn jpeg_filename(prefix: &str, timestamp: &NaiveDateTime, index: usize) -> String {
    format!(
        "{prefix}_{}_{}.jpg",
        timestamp.format(TIMESTAMP_FORMAT),
        index + 1
    )
}

/// Writes image batches as JPEG files.
#[derive(Debug, Clone, Default)]
pub struct Saver {
    config: SaverConfig,
}

impl Saver {
    pub fn new(config: SaverConfig) -> Self {
        Self { config }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Save every image in `batch`, stamping filenames with local time.
    pub fn save(&self, batch: &ImageBatch) -> Result<Vec<SavedImage>, SaveError> {
        self.save_with_clock(batch, || Local::now().naive_local())
    }

    /// Save every image in `batch`, calling `clock` once per image for the
    /// filename timestamp.
    ///
    /// The output directory is created first if missing. The first failure
    /// aborts the remaining images.
    pub fn save_with_clock<F>(&self, batch: &ImageBatch, mut clock: F) -> Result<Vec<SavedImage>, SaveError>
    where
        F: FnMut() -> NaiveDateTime,
    {
        let dir = self.output_dir();
        fs::create_dir_all(dir).map_err(|source| SaveError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let options = EncodeOptions::new(self.config.quality)
            .with_subsampling(self.config.subsampling)
            .with_optimize(self.config.optimize);

        let mut saved = Vec::with_capacity(batch.len());
        for index in 0..batch.len() {
            let frame = batch.frame(index)?;
            let filename = jpeg_filename(&self.config.prefix, &clock(), index);
            let path = dir.join(&filename);

            let bytes = encode_jpeg(&frame, &options)?;
            fs::write(&path, &bytes).map_err(|source| SaveError::Write {
                path: path.clone(),
                source,
            })?;

            debug!(path = %path.display(), bytes = bytes.len(), "wrote jpeg");
            saved.push(SavedImage::output(filename));
        }

        info!(count = saved.len(), dir = %dir.display(), "saved batch");
        Ok(saved)
    }
}
