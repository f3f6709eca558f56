//! Output directory selection and document naming

use crate::constants::PDF_EXTENSION;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Asks the user (or a stand-in) where a batch's documents should go.
///
/// `last_used` is the directory remembered from the previous batch, if any.
/// Returning `None` or an empty path cancels the batch.
pub trait OutputDirectoryChooser {
    fn choose_directory(&mut self, last_used: Option<&Path>)
    -> impl Future<Output = Option<PathBuf>>;
}

/// Chooser that always answers with a preset directory
#[derive(Debug, Clone, Default)]
pub struct FixedDirectory(pub Option<PathBuf>);

impl FixedDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(Some(dir.into()))
    }

    /// A chooser that behaves like a dismissed dialog
    pub fn cancelled() -> Self {
        Self(None)
    }
}

impl OutputDirectoryChooser for FixedDirectory {
    async fn choose_directory(&mut self, _last_used: Option<&Path>) -> Option<PathBuf> {
        self.0.clone()
    }
}

/// Chooser that reuses the directory remembered from the previous batch
#[derive(Debug, Clone, Copy, Default)]
pub struct LastUsedDirectory;

impl OutputDirectoryChooser for LastUsedDirectory {
    async fn choose_directory(&mut self, last_used: Option<&Path>) -> Option<PathBuf> {
        last_used.map(Path::to_path_buf)
    }
}

/// `{dir}/{base}.pdf`
pub fn output_path(dir: &Path, base: &str) -> PathBuf {
    dir.join(format!("{}.{}", base, PDF_EXTENSION))
}
