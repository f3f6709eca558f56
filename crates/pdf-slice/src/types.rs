use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SliceError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("File too large: {size} bytes (limit {max})")]
    FileTooLarge { size: u64, max: u64 },
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),
    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("No output directory selected")]
    NoOutputDirectory,
    #[error("No input images")]
    NoInputs,
    #[error("No pages to assemble")]
    NoPages,
    #[error("Failed to write document: {0}")]
    DocumentWrite(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SliceError>;

/// Flat classification of a [`SliceError`], stored on batch items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidImageDimensions,
    UnsupportedFileType,
    FileTooLarge,
    InvalidFileName,
    ImageDecodeFailure,
    NoOutputDirectory,
    NoInputs,
    NoPages,
    DocumentWriteFailure,
    Config,
    Internal,
}

impl SliceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SliceError::InvalidImageDimensions { .. } => ErrorKind::InvalidImageDimensions,
            SliceError::UnsupportedFileType(_) => ErrorKind::UnsupportedFileType,
            SliceError::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            SliceError::InvalidFileName(_) => ErrorKind::InvalidFileName,
            SliceError::ImageDecode(_) => ErrorKind::ImageDecodeFailure,
            SliceError::NoOutputDirectory => ErrorKind::NoOutputDirectory,
            SliceError::NoInputs => ErrorKind::NoInputs,
            SliceError::NoPages => ErrorKind::NoPages,
            SliceError::DocumentWrite(_) | SliceError::Io(_) => ErrorKind::DocumentWriteFailure,
            SliceError::Config(_) => ErrorKind::Config,
            SliceError::TaskJoin(_) => ErrorKind::Internal,
        }
    }

    /// Errors that stop the whole batch rather than a single item
    pub fn is_global(&self) -> bool {
        matches!(self, SliceError::NoOutputDirectory | SliceError::NoInputs)
    }
}

/// Declarative description of one output page: which source rows it shows
/// and the A4-proportioned canvas they are drawn onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    /// Zero-based position in the output document
    pub index: usize,
    /// First source row shown on this page
    pub source_y_offset: u32,
    /// Number of source rows shown; shorter than the canvas only on the last page
    pub source_height: u32,
    /// Canvas width in source pixels (may be fractional)
    pub target_width: f64,
    /// Canvas height in source pixels (may be fractional)
    pub target_height: f64,
}

impl PageSpec {
    /// One past the last source row covered by this page
    pub fn source_end(&self) -> u32 {
        self.source_y_offset + self.source_height
    }

    /// Integer pixel size of the raster buffer for this page.
    ///
    /// Width rounds half up; height rounds up so that every page's row range
    /// fits without dropping a row. The rounded buffer is slightly off the
    /// exact A4 ratio (1000×1415 against 1000×1414.29), so placing it on the
    /// sheet stretches it vertically by that fraction, about 0.05%.
    pub fn raster_size(&self) -> (u32, u32) {
        let width = round_half_up(self.target_width).max(1.0) as u32;
        let height = self.target_height.ceil().max(1.0) as u32;
        (width, height)
    }
}

/// Lifecycle of a single conversion in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchStatus {
    #[default]
    Pending,
    Succeeded,
    Failed(ErrorKind),
}

impl BatchStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BatchStatus::Pending)
    }
}

/// Statistics about how an image will be paginated
#[derive(Debug, Clone, PartialEq)]
pub struct SliceStatistics {
    /// Source image width
    pub image_width: u32,
    /// Source image height
    pub image_height: u32,
    /// Page width in source pixels
    pub page_width_px: f64,
    /// Page height in source pixels
    pub page_height_px: f64,
    /// Number of output pages
    pub page_count: usize,
    /// Source rows on the final page
    pub last_page_rows: u32,
    /// Whether the panoramic guard narrowed the page width
    pub panoramic: bool,
}

/// Where a produced document ended up
#[derive(Debug, Clone, PartialEq)]
pub struct ProducedDocument {
    pub name: String,
    pub path: PathBuf,
    pub page_count: usize,
}

#[inline]
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
