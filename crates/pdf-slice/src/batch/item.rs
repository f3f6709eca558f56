use crate::types::*;
use std::path::{Path, PathBuf};

/// One image-to-document conversion within a batch.
///
/// Starts `Pending` and moves exactly once to `Succeeded` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    name: String,
    status: BatchStatus,
    error: Option<ErrorKind>,
    message: Option<String>,
    output: Option<PathBuf>,
    page_count: usize,
}

impl BatchItem {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: BatchStatus::Pending,
            error: None,
            message: None,
            output: None,
            page_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Developer-facing description of the failure
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == BatchStatus::Succeeded
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, BatchStatus::Failed(_))
    }

    pub(crate) fn succeed(&mut self, produced: &ProducedDocument) {
        debug_assert!(!self.status.is_terminal(), "{} already finished", self.name);
        self.status = BatchStatus::Succeeded;
        self.output = Some(produced.path.clone());
        self.page_count = produced.page_count;
    }

    pub(crate) fn fail(&mut self, error: &SliceError) {
        debug_assert!(!self.status.is_terminal(), "{} already finished", self.name);
        let kind = error.kind();
        self.status = BatchStatus::Failed(kind);
        self.error = Some(kind);
        self.message = Some(error.to_string());
    }
}
