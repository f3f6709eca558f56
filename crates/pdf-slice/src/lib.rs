mod assemble;
pub mod batch;
pub mod constants;
mod export;
mod options;
mod paginate;
mod raster;
mod source;
mod stats;
mod types;
pub mod validate;

pub use assemble::{OutputDocument, assemble_document, save_pdf};
pub use batch::{
    BatchItem, BatchReport, BatchRunner, BatchUpdate, FixedDirectory, LastUsedDirectory,
    OutputDirectoryChooser,
};
pub use export::{export_slices, slice_file_name};
pub use options::*;
pub use paginate::paginate;
pub use raster::{RasterPage, rasterize_all, rasterize_page};
pub use source::{ImageSource, SourceImage, load_image};
pub use stats::calculate_statistics;
pub use types::*;
