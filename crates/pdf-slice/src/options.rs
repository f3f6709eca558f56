use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Slicing and rasterization configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliceOptions {
    /// Width/height ratio above which the panoramic guard narrows the page
    pub panoramic_threshold: f64,

    /// RGB fill for canvas area the source does not cover
    pub background: [u8; 3],

    /// Largest input file accepted, in bytes
    pub max_file_size: u64,

    /// Use the image base name as the PDF document title
    pub title_from_name: bool,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            panoramic_threshold: DEFAULT_PANORAMIC_THRESHOLD,
            background: DEFAULT_BACKGROUND,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            title_from_name: true,
        }
    }
}

impl SliceOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.panoramic_threshold.is_finite() || self.panoramic_threshold <= 0.0 {
            return Err(SliceError::Config(format!(
                "Panoramic threshold must be a positive number, got {}",
                self.panoramic_threshold
            )));
        }

        if self.max_file_size == 0 {
            return Err(SliceError::Config(
                "Maximum file size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Process-wide settings that outlive a single batch.
///
/// Read once when a batch starts; `last_output_dir` is written back after the
/// user picks a directory. Persisting the file is left to the caller.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AppConfig {
    /// Directory chosen for the previous batch
    pub last_output_dir: Option<PathBuf>,

    /// Slicing options
    pub options: SliceOptions,
}

impl AppConfig {
    /// Load config from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SliceError::Config(format!("Failed to parse config: {}", e)))?;
        config.options.validate()?;
        Ok(config)
    }

    /// Load config, falling back to defaults when the file does not exist yet
    #[cfg(feature = "serde")]
    pub async fn load_or_default(path: impl AsRef<std::path::Path>) -> Result<Self> {
        match Self::load(path).await {
            Err(SliceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save config to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SliceError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Record the directory the user picked for this batch
    pub fn remember_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.last_output_dir = Some(dir.into());
    }
}
