//! Export of page rasters as individual PNG files

use crate::options::SliceOptions;
use crate::paginate::paginate;
use crate::raster::rasterize_all;
use crate::source::SourceImage;
use crate::types::*;
use crate::validate::is_valid_file_name;
use std::path::{Path, PathBuf};

/// File name of slice `index` (zero-based): `{base}_s01.png`, `{base}_s02.png`, ...
pub fn slice_file_name(base: &str, index: usize) -> String {
    format!("{}_s{:02}.png", base, index + 1)
}

/// Write every page of `source` as a PNG into `dir`, returning the paths in
/// page order
pub async fn export_slices(
    source: SourceImage,
    options: &SliceOptions,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref().to_owned();
    let base = source.base_name().to_string();
    if !is_valid_file_name(&base) {
        return Err(SliceError::InvalidFileName(base));
    }

    let options = options.clone();
    let encoded = tokio::task::spawn_blocking(move || {
        let specs = paginate(source.width(), source.height(), &options)?;
        let mut files = Vec::with_capacity(specs.len());
        for page in rasterize_all(&source, &specs, &options) {
            let mut png = Vec::new();
            page.pixels.write_to(
                &mut std::io::Cursor::new(&mut png),
                image::ImageFormat::Png,
            )?;
            files.push((slice_file_name(&base, page.index), png));
        }
        Ok::<_, SliceError>(files)
    })
    .await??;

    let mut paths = Vec::with_capacity(encoded.len());
    for (name, png) in encoded {
        let path = dir.join(name);
        tokio::fs::write(&path, png)
            .await
            .map_err(|e| SliceError::DocumentWrite(format!("{}: {}", path.display(), e)))?;
        paths.push(path);
    }

    log::info!("Exported {} slice(s) to {}", paths.len(), dir.display());
    Ok(paths)
}
