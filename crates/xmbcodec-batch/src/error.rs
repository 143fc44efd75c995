//! Batch-aborting errors.
//!
//! These are distinct from per-file conversion failures, which are
//! caught at the task boundary and collected in the batch outcome.

use thiserror::Error;

/// Errors that abort an entire batch before or during dispatch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The root or a subdirectory could not be read during discovery.
    #[error("directory discovery failed: {0}")]
    Discovery(#[from] walkdir::Error),

    #[error("could not build worker pool: {0}")]
    WorkerPool(String),
}
