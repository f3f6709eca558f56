//! Source images and their loading

use crate::types::*;
use crate::validate::{base_name, check_content, check_extension, check_size};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// A decoded raster image, immutable once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    name: String,
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    /// Decode an in-memory image. The format is sniffed from the content.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let format = check_content(&name, bytes)?;
        Self::decode(name, bytes, format)
    }

    fn decode(name: String, bytes: &[u8], format: ImageFormat) -> Result<Self> {
        let pixels = image::load_from_memory_with_format(bytes, format)?.to_rgba8();
        Ok(Self::new(name, pixels))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without directories or extension
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Where a batch item's image comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image file on disk, validated and decoded on demand
    Path(PathBuf),
    /// Encoded image held in memory
    Bytes { name: String, bytes: Vec<u8> },
    /// Already decoded image
    Decoded(SourceImage),
}

impl ImageSource {
    /// Display name used for logging and output naming
    pub fn name(&self) -> String {
        match self {
            ImageSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ImageSource::Bytes { name, .. } => name.clone(),
            ImageSource::Decoded(image) => image.name().to_string(),
        }
    }

    /// Validate and decode into a [`SourceImage`]
    pub async fn load(self, max_file_size: u64) -> Result<SourceImage> {
        match self {
            ImageSource::Path(path) => load_image(&path, max_file_size).await,
            ImageSource::Bytes { name, bytes } => {
                check_size(bytes.len() as u64, max_file_size)?;
                tokio::task::spawn_blocking(move || SourceImage::from_bytes(name, &bytes)).await?
            }
            ImageSource::Decoded(image) => Ok(image),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<SourceImage> for ImageSource {
    fn from(image: SourceImage) -> Self {
        ImageSource::Decoded(image)
    }
}

/// Load a single image file, rejecting unsupported or oversized files before
/// decoding
pub async fn load_image(path: impl AsRef<Path>, max_file_size: u64) -> Result<SourceImage> {
    let path = path.as_ref().to_owned();
    check_extension(&path)?;
    let format = ImageFormat::from_path(&path)
        .map_err(|_| SliceError::UnsupportedFileType(path.display().to_string()))?;

    // Read failures belong to loading, not to document output
    let size = tokio::fs::metadata(&path)
        .await
        .map_err(image::ImageError::from)?
        .len();
    check_size(size, max_file_size)?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(image::ImageError::from)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Trust the extension so a damaged file reports as a decode failure
    tokio::task::spawn_blocking(move || SourceImage::decode(name, &bytes, format)).await?
}
