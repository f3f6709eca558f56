use crate::options::SliceOptions;
use crate::paginate::{page_geometry, paginate};
use crate::types::*;

/// Calculate how an image of the given size will be paginated
pub fn calculate_statistics(
    width: u32,
    height: u32,
    options: &SliceOptions,
) -> Result<SliceStatistics> {
    let geometry = page_geometry(width, height, options)?;
    let pages = paginate(width, height, options)?;

    // paginate never returns an empty list for valid dimensions
    let last_page_rows = pages.last().map(|p| p.source_height).unwrap_or(height);

    Ok(SliceStatistics {
        image_width: width,
        image_height: height,
        page_width_px: geometry.width,
        page_height_px: geometry.height,
        page_count: pages.len(),
        last_page_rows,
        panoramic: geometry.panoramic,
    })
}
