//! `BatchEngine` — orchestrates bounded-parallel file conversion.

use crate::convert::convert;
use crate::discover::discover;
use crate::error::BatchError;
use crate::request::BatchRequest;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use xmbcodec_core::ContainerCodec;

/// One failed conversion, isolated at the task boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionFailure {
    /// The offending input path
    pub input: PathBuf,
    /// Human-readable failure message
    pub message: String,
}

/// Result of a batch conversion run.
///
/// Per-file failures never abort the batch; callers inspect `failures`
/// and decide whether the run as a whole counts as failed.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    /// Output paths written successfully
    pub converted: Vec<PathBuf>,
    /// Failures, one per offending input path
    pub failures: Vec<ConversionFailure>,
    /// Total discovered inputs
    pub total: usize,
}

/// Batch conversion engine.
pub struct BatchEngine {
    codec: Arc<dyn ContainerCodec>,
}

impl BatchEngine {
    pub fn new(codec: Arc<dyn ContainerCodec>) -> Self {
        Self { codec }
    }

    /// Execute a batch conversion request.
    ///
    /// Discovers matching inputs, derives output paths by extension
    /// substitution, and converts every pair over a worker pool bounded
    /// by `request.concurrency`. Blocks until every task has finished;
    /// there is no early exit and no cancellation. Discovery errors
    /// abort the batch; conversion errors are collected per file.
    pub fn run(&self, request: BatchRequest) -> Result<BatchOutcome, BatchError> {
        let inputs = discover(
            &request.root,
            request.direction.source_extension(),
            request.recursive,
        )?;

        let jobs: Vec<(PathBuf, PathBuf)> = inputs
            .into_iter()
            .map(|input| {
                let output = request.direction.derive_output(&input);
                (input, output)
            })
            .collect();

        let total = jobs.len();
        info!(
            "BatchEngine: {} of {} files under '{}' (recursive={}, concurrency={})",
            request.direction,
            total,
            request.root.display(),
            request.recursive,
            request.concurrency,
        );

        let run_jobs = || -> Vec<Result<PathBuf, ConversionFailure>> {
            jobs.par_iter()
                .map(|(input, output)| {
                    if let Some(on_start) = &request.on_start {
                        on_start(input);
                    }
                    match convert(self.codec.as_ref(), request.direction, input, output) {
                        Ok(()) => Ok(output.clone()),
                        Err(err) => Err(ConversionFailure {
                            input: input.clone(),
                            message: err.to_string(),
                        }),
                    }
                })
                .collect()
        };

        // The pool is built once per batch, so the bound is a snapshot
        // that later config changes cannot affect.
        let results = if request.concurrency > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(request.concurrency)
                .build()
                .map_err(|e| BatchError::WorkerPool(e.to_string()))?;
            pool.install(run_jobs)
        } else {
            run_jobs()
        };

        let mut converted = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(output) => converted.push(output),
                Err(failure) => {
                    warn!("{}: {}", failure.input.display(), failure.message);
                    failures.push(failure);
                }
            }
        }

        info!(
            "BatchEngine: complete — {} converted, {} failed",
            converted.len(),
            failures.len()
        );

        Ok(BatchOutcome {
            converted,
            failures,
            total,
        })
    }
}
