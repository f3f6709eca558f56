//! Batch conversion of images into A4 documents
//!
//! Each input goes through the same sequence:
//! 1. Validate and decode the image
//! 2. Paginate it into A4-proportioned row ranges
//! 3. Rasterize every page
//! 4. Assemble the pages into a document and write it out
//!
//! Items run one at a time in input order. A failure is recorded on its item
//! and the batch moves on; only a missing output directory or an empty input
//! list stops the whole batch.

mod item;
mod output;

pub use item::BatchItem;
pub use output::{FixedDirectory, LastUsedDirectory, OutputDirectoryChooser, output_path};

use crate::assemble::{assemble_document, save_pdf};
use crate::options::{AppConfig, SliceOptions};
use crate::paginate::paginate;
use crate::raster::rasterize_all;
use crate::source::ImageSource;
use crate::types::*;
use crate::validate::{base_name, is_valid_file_name};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Progress notifications sent while a batch runs
#[derive(Debug, Clone, PartialEq)]
pub enum BatchUpdate {
    Started {
        output_dir: PathBuf,
        total: usize,
    },
    ItemStarted {
        index: usize,
        name: String,
    },
    ItemSucceeded {
        index: usize,
        path: PathBuf,
        page_count: usize,
    },
    ItemFailed {
        index: usize,
        kind: ErrorKind,
        message: String,
    },
    Finished {
        succeeded: usize,
        failed: usize,
    },
}

/// Outcome of a batch: every item with its final status
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.is_failed()).count()
    }

    /// Paths of the documents written, in input order
    pub fn produced(&self) -> Vec<PathBuf> {
        self.items
            .iter()
            .filter_map(|i| i.output().map(Path::to_path_buf))
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|i| i.is_failed())
    }
}

/// Runs image → paginate → rasterize → assemble → write over a batch
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    options: SliceOptions,
    updates: Option<mpsc::UnboundedSender<BatchUpdate>>,
}

impl BatchRunner {
    pub fn new(options: SliceOptions) -> Self {
        Self {
            options,
            updates: None,
        }
    }

    /// Send progress notifications to `tx`
    pub fn with_updates(mut self, tx: mpsc::UnboundedSender<BatchUpdate>) -> Self {
        self.updates = Some(tx);
        self
    }

    pub fn options(&self) -> &SliceOptions {
        &self.options
    }

    /// Convert every input into `{dir}/{base}.pdf`.
    ///
    /// The output directory is requested once from `chooser`, seeded with
    /// `config.last_output_dir`, and remembered in `config` on success. Fails
    /// as a whole only for an empty input list, invalid options or a
    /// cancelled directory choice, all before any file is written.
    pub async fn run<C: OutputDirectoryChooser>(
        &self,
        inputs: Vec<ImageSource>,
        chooser: &mut C,
        config: &mut AppConfig,
    ) -> Result<BatchReport> {
        if inputs.is_empty() {
            return Err(SliceError::NoInputs);
        }
        self.options.validate()?;

        let output_dir = chooser
            .choose_directory(config.last_output_dir.as_deref())
            .await
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(SliceError::NoOutputDirectory)?;
        config.remember_output_dir(&output_dir);

        self.send(BatchUpdate::Started {
            output_dir: output_dir.clone(),
            total: inputs.len(),
        });

        let mut items = Vec::with_capacity(inputs.len());
        for (index, source) in inputs.into_iter().enumerate() {
            let mut item = BatchItem::new(source.name());
            self.send(BatchUpdate::ItemStarted {
                index,
                name: item.name().to_string(),
            });

            match self.convert(source, &output_dir).await {
                Ok(produced) => {
                    log::info!(
                        "{} → {} ({} page(s))",
                        produced.name,
                        produced.path.display(),
                        produced.page_count
                    );
                    item.succeed(&produced);
                    self.send(BatchUpdate::ItemSucceeded {
                        index,
                        path: produced.path,
                        page_count: produced.page_count,
                    });
                }
                Err(e) => {
                    log::warn!("Failed to convert {}: {}", item.name(), e);
                    item.fail(&e);
                    self.send(BatchUpdate::ItemFailed {
                        index,
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                }
            }
            items.push(item);
        }

        let report = BatchReport { output_dir, items };
        self.send(BatchUpdate::Finished {
            succeeded: report.succeeded(),
            failed: report.failed(),
        });
        Ok(report)
    }

    /// Convert a single image into a document under `dir`
    pub async fn convert(&self, source: ImageSource, dir: &Path) -> Result<ProducedDocument> {
        let name = source.name();
        let base = base_name(&name).to_string();
        if !is_valid_file_name(&base) {
            return Err(SliceError::InvalidFileName(base));
        }

        let image = source.load(self.options.max_file_size).await?;
        let options = self.options.clone();
        let title = if options.title_from_name {
            base.clone()
        } else {
            String::new()
        };

        // The decoded image and its rasters live only inside this task
        let doc = tokio::task::spawn_blocking(move || {
            let specs = paginate(image.width(), image.height(), &options)?;
            let pages = rasterize_all(&image, &specs, &options);
            drop(image);
            assemble_document(&title, pages)
        })
        .await??;

        let page_count = doc.page_count();
        let path = output_path(dir, &base);
        save_pdf(doc, &path).await?;

        Ok(ProducedDocument {
            name,
            path,
            page_count,
        })
    }

    fn send(&self, update: BatchUpdate) {
        if let Some(tx) = &self.updates {
            let _ = tx.send(update);
        }
    }
}
