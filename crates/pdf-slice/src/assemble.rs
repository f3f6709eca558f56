//! Document assembly - one raster per full-bleed A4 page

use crate::constants::*;
use crate::raster::RasterPage;
use crate::types::*;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData, RawImageFormat,
    XObjectTransform,
};
use std::path::{Path, PathBuf};

/// A serialized document for a single source image
#[derive(Debug, Clone)]
pub struct OutputDocument {
    bytes: Vec<u8>,
    page_count: usize,
}

impl OutputDocument {
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// The complete PDF file
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Place each raster on its own 210×297mm page, in index order, and serialize
/// the result.
///
/// Every raster is anchored at the bottom-left origin and scaled on each axis
/// to the full sheet, so the page carries no margin. Rasters are embedded at
/// their full pixel size.
///
/// This is CPU-bound; async callers should run it on `spawn_blocking`.
pub fn assemble_document(title: &str, mut pages: Vec<RasterPage>) -> Result<OutputDocument> {
    if pages.is_empty() {
        return Err(SliceError::NoPages);
    }
    pages.sort_by_key(|page| page.index);

    let mut doc = PdfDocument::new(title);
    let sheet_width_pt = mm_to_pt(A4_WIDTH_MM);
    let sheet_height_pt = mm_to_pt(A4_HEIGHT_MM);

    let mut pdf_pages = Vec::with_capacity(pages.len());
    for page in pages {
        let (width, height) = (page.width(), page.height());
        let image = RawImage {
            pixels: RawImageData::U8(page.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let image_id = doc.add_image(&image);

        // At 72 dpi one raster pixel is one point, so the scale factors are
        // simply sheet size over raster size.
        let transform = XObjectTransform {
            translate_x: Some(Pt(0.0)),
            translate_y: Some(Pt(0.0)),
            scale_x: Some(sheet_width_pt / width as f32),
            scale_y: Some(sheet_height_pt / height as f32),
            dpi: Some(PLACEMENT_DPI),
            ..Default::default()
        };

        pdf_pages.push(PdfPage::new(
            Mm(A4_WIDTH_MM),
            Mm(A4_HEIGHT_MM),
            vec![Op::UseXobject {
                id: image_id,
                transform,
            }],
        ));
    }

    let page_count = pdf_pages.len();
    doc.pages = pdf_pages;

    // printpdf downsamples large images by default
    let save_options = PdfSaveOptions {
        image_optimization: None,
        ..Default::default()
    };
    let mut warnings = Vec::new();
    let bytes = doc.save(&save_options, &mut warnings);
    if !warnings.is_empty() {
        log::debug!("PDF serialization produced {} warning(s)", warnings.len());
    }

    Ok(OutputDocument { bytes, page_count })
}

/// Write a document.
///
/// Bytes go to a sibling `.part` file that is renamed into place once fully
/// written, so `path` only ever holds a complete document.
pub async fn save_pdf(doc: OutputDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let partial = partial_path(path);

    if let Err(e) = tokio::fs::write(&partial, doc.into_bytes()).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(SliceError::DocumentWrite(format!(
            "{}: {}",
            partial.display(),
            e
        )));
    }

    if let Err(e) = tokio::fs::rename(&partial, &path).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(SliceError::DocumentWrite(format!("{}: {}", path.display(), e)));
    }

    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}
