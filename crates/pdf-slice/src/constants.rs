//! Shared constants for slicing and page assembly
//!
//! This module centralizes the page geometry and validation limits used
//! throughout the conversion.

// =============================================================================
// Page Geometry
// =============================================================================

/// A4 sheet width in millimeters
pub const A4_WIDTH_MM: f32 = 210.0;

/// A4 sheet height in millimeters
pub const A4_HEIGHT_MM: f32 = 297.0;

/// A4 width / height (≈ 0.7071)
pub const A4_ASPECT: f64 = 210.0 / 297.0;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Panoramic Guard
// =============================================================================

/// Width/height ratio above which the page width falls back to a fraction of
/// the image height
pub const DEFAULT_PANORAMIC_THRESHOLD: f64 = 4.0;

/// Page width as a fraction of image height once the guard triggers
pub const PANORAMIC_WIDTH_FRACTION: f64 = 0.5;

// =============================================================================
// Rasterization
// =============================================================================

/// Background for canvas area not covered by source rows (opaque white)
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Resolution at which one raster pixel maps to one point before scaling
pub const PLACEMENT_DPI: f32 = 72.0;

// =============================================================================
// Validation
// =============================================================================

/// Maximum accepted input file size (20 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Maximum length of a file name
pub const MAX_FILE_NAME_LEN: usize = 255;

/// Characters not allowed in a file name
pub const INVALID_FILE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Extensions (lowercase) of accepted input images
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpeg", "jpg", "png", "gif", "bmp", "webp", "tiff", "tif",
];

// =============================================================================
// Output Naming
// =============================================================================

/// Extension of produced documents
pub const PDF_EXTENSION: &str = "pdf";

/// Suffix of in-progress writes, renamed away once the file is complete
pub const PARTIAL_SUFFIX: &str = ".part";
