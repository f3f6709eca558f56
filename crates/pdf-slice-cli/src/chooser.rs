use pdf_slice::{FixedDirectory, LastUsedDirectory, OutputDirectoryChooser};
use std::path::{Path, PathBuf};

/// How the command line picks the output directory
pub enum DirectoryPrompt {
    /// `--output-dir`
    Given(FixedDirectory),
    /// `--last-dir`: reuse the directory saved in the config
    LastUsed(LastUsedDirectory),
    /// `--pick-dir`: native folder dialog, opened at the last directory
    #[cfg(feature = "dialog")]
    Dialog,
}

impl OutputDirectoryChooser for DirectoryPrompt {
    async fn choose_directory(&mut self, last_used: Option<&Path>) -> Option<PathBuf> {
        match self {
            DirectoryPrompt::Given(fixed) => fixed.choose_directory(last_used).await,
            DirectoryPrompt::LastUsed(last) => last.choose_directory(last_used).await,
            #[cfg(feature = "dialog")]
            DirectoryPrompt::Dialog => {
                let mut dialog = rfd::AsyncFileDialog::new().set_title("Choose output folder");
                if let Some(dir) = last_used {
                    dialog = dialog.set_directory(dir);
                }
                dialog
                    .pick_folder()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            }
        }
    }
}
