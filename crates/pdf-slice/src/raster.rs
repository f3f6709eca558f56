//! Page rasterization
//!
//! Each page gets its own RGB buffer of the page's raster size, filled with the
//! background color, with the page's source rows copied 1:1 onto the top-left
//! corner. Nothing is scaled here; scaling to physical A4 happens when the
//! buffer is placed in the document.

use crate::options::SliceOptions;
use crate::source::SourceImage;
use crate::types::*;
use image::{Rgb, RgbImage, Rgba};

/// A rendered page, ready to be placed on an A4 sheet
#[derive(Debug, Clone, PartialEq)]
pub struct RasterPage {
    pub index: usize,
    pub pixels: RgbImage,
}

impl RasterPage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.into_raw()
    }
}

/// Render one page of `source` according to `spec`
pub fn rasterize_page(source: &SourceImage, spec: &PageSpec, options: &SliceOptions) -> RasterPage {
    let (width, height) = spec.raster_size();
    let background = Rgb(options.background);
    let mut pixels = RgbImage::from_pixel(width, height, background);

    let copy_width = width.min(source.width());
    let copy_rows = spec
        .source_height
        .min(height)
        .min(source.height().saturating_sub(spec.source_y_offset));

    for y in 0..copy_rows {
        let source_y = spec.source_y_offset + y;
        for x in 0..copy_width {
            let pixel = composite(source.pixel(x, source_y), options.background);
            pixels.put_pixel(x, y, pixel);
        }
    }

    RasterPage {
        index: spec.index,
        pixels,
    }
}

/// Render every page in order
pub fn rasterize_all(
    source: &SourceImage,
    specs: &[PageSpec],
    options: &SliceOptions,
) -> Vec<RasterPage> {
    specs
        .iter()
        .map(|spec| rasterize_page(source, spec, options))
        .collect()
}

/// Blend a possibly translucent pixel over the background
fn composite(pixel: Rgba<u8>, background: [u8; 3]) -> Rgb<u8> {
    let [r, g, b, a] = pixel.0;
    match a {
        255 => Rgb([r, g, b]),
        0 => Rgb(background),
        _ => {
            let alpha = a as u32;
            let blend = |fg: u8, bg: u8| -> u8 {
                ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
            };
            Rgb([
                blend(r, background[0]),
                blend(g, background[1]),
                blend(b, background[2]),
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_extremes() {
        let white = [255, 255, 255];
        assert_eq!(composite(Rgba([10, 20, 30, 255]), white), Rgb([10, 20, 30]));
        assert_eq!(composite(Rgba([10, 20, 30, 0]), white), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_composite_half_alpha() {
        let black = [0, 0, 0];
        let out = composite(Rgba([255, 255, 255, 128]), black);
        assert_eq!(out, Rgb([128, 128, 128]));
    }
}
