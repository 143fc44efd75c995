//! Batch conversion request configuration.

use crate::convert::Direction;
use std::path::{Path, PathBuf};

/// Configuration for one batch conversion run.
pub struct BatchRequest {
    /// Root directory to discover input files under
    pub root: PathBuf,
    /// Which way to convert; also fixes the suffix predicate and the
    /// extension-substitution rule for output paths
    pub direction: Direction,
    /// Descend into subdirectories during discovery
    pub recursive: bool,
    /// Upper bound on simultaneously in-flight conversions, snapshotted
    /// once per batch (0 = one worker per available core)
    pub concurrency: usize,
    /// Invoked with each input path just before its conversion starts
    pub on_start: Option<Box<dyn Fn(&Path) + Send + Sync>>,
}

impl BatchRequest {
    pub fn new(root: impl Into<PathBuf>, direction: Direction) -> Self {
        Self {
            root: root.into(),
            direction,
            recursive: false,
            concurrency: 0,
            on_start: None,
        }
    }

    pub fn recursive(mut self, yes: bool) -> Self {
        self.recursive = yes;
        self
    }

    pub fn concurrency(mut self, workers: usize) -> Self {
        self.concurrency = workers;
        self
    }

    pub fn on_start<F: Fn(&Path) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }
}
