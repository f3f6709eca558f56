//! Pagination - deciding which source rows land on which A4 page
//!
//! The page width normally spans the whole image and the page height follows
//! from the A4 proportions. Very wide images would give absurdly short pages,
//! so past the panoramic threshold the page width is derived from the image
//! height instead.

use crate::constants::{A4_HEIGHT_MM, A4_WIDTH_MM, PANORAMIC_WIDTH_FRACTION};
use crate::options::SliceOptions;
use crate::types::*;

/// Page size in source pixels for an image, before any row assignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub panoramic: bool,
}

pub(crate) fn page_geometry(width: u32, height: u32, options: &SliceOptions) -> Result<PageGeometry> {
    if width == 0 || height == 0 {
        return Err(SliceError::InvalidImageDimensions { width, height });
    }

    let (w, h) = (width as f64, height as f64);
    let panoramic = w / h > options.panoramic_threshold;
    let page_width = if panoramic {
        h * PANORAMIC_WIDTH_FRACTION
    } else {
        w
    };

    Ok(PageGeometry {
        width: page_width,
        // Multiply before dividing so whole-number ratios stay exact
        height: page_width * A4_HEIGHT_MM as f64 / A4_WIDTH_MM as f64,
        panoramic,
    })
}

/// Split an image of `width × height` pixels into A4-proportioned pages.
///
/// The returned pages are ordered by index and their row ranges tile
/// `[0, height)` exactly. Row boundaries are the page height multiples rounded
/// half up, so fractional page heights never leave gaps.
pub fn paginate(width: u32, height: u32, options: &SliceOptions) -> Result<Vec<PageSpec>> {
    let geometry = page_geometry(width, height, options)?;
    let page_count = (height as f64 / geometry.height).ceil().max(1.0) as usize;

    log::debug!(
        "Image {}x{}, page {:.2}x{:.2}, {} page(s){}",
        width,
        height,
        geometry.width,
        geometry.height,
        page_count,
        if geometry.panoramic { " (panoramic)" } else { "" }
    );

    let mut pages = Vec::with_capacity(page_count);
    for i in 0..page_count {
        let start = row_boundary(i, geometry.height, height);
        let end = row_boundary(i + 1, geometry.height, height);

        // Sub-pixel page heights can round a trailing boundary onto the
        // image edge; such a page would carry no rows.
        if start >= end {
            break;
        }

        pages.push(PageSpec {
            index: pages.len(),
            source_y_offset: start,
            source_height: end - start,
            target_width: geometry.width,
            target_height: geometry.height,
        });
    }

    Ok(pages)
}

/// Row where page `i` starts, clamped to the image height
fn row_boundary(i: usize, page_height: f64, image_height: u32) -> u32 {
    let row = round_half_up(i as f64 * page_height);
    row.min(image_height as f64) as u32
}
