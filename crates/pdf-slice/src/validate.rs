//! Pre-decode validation of input files and output names

use crate::constants::*;
use crate::types::*;
use image::ImageFormat;
use std::path::Path;

/// Formats the decoder is allowed to see
fn is_supported_format(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg
            | ImageFormat::Png
            | ImageFormat::Gif
            | ImageFormat::Bmp
            | ImageFormat::WebP
            | ImageFormat::Tiff
    )
}

/// Check an input path's extension against the supported image types
pub fn check_extension(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(SliceError::UnsupportedFileType(path.display().to_string()))
    }
}

/// Sniff in-memory bytes and reject anything that is not a supported image
pub fn check_content(name: &str, bytes: &[u8]) -> Result<ImageFormat> {
    match image::guess_format(bytes) {
        Ok(format) if is_supported_format(format) => Ok(format),
        Ok(format) => Err(SliceError::UnsupportedFileType(format!(
            "{name} ({format:?})"
        ))),
        Err(_) => Err(SliceError::UnsupportedFileType(name.to_string())),
    }
}

/// Reject inputs above the configured size limit
pub fn check_size(size: u64, max: u64) -> Result<()> {
    if size > max {
        return Err(SliceError::FileTooLarge { size, max });
    }
    Ok(())
}

/// Whether `name` can be used as a file name on every common platform
pub fn is_valid_file_name(name: &str) -> bool {
    if name.trim().is_empty() {
        return false;
    }
    if name.chars().count() > MAX_FILE_NAME_LEN {
        return false;
    }
    !name.contains(INVALID_FILE_NAME_CHARS)
}

/// Last path segment of `name` with its final extension removed.
///
/// Both `/` and `\` count as separators so names coming from either platform
/// behave the same.
pub fn base_name(name: &str) -> &str {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file.rfind('.') {
        Some(0) | None => file,
        Some(dot) => &file[..dot],
    }
}
