//! # xmbcodec-batch
//!
//! File conversion over directory trees with bounded parallelism.
//!
//! ## Features
//! - Export (binary → XML text) and import (XML text → binary)
//! - Suffix-filtered, optionally recursive discovery with stable order
//! - Worker pool bounded by an explicit, injectable concurrency value
//! - Per-file failure isolation: one bad file never aborts its siblings
//!
//! ## Usage
//! ```no_run
//! use std::sync::Arc;
//! use xmbcodec_batch::{BatchEngine, BatchRequest, Direction};
//!
//! // let engine = BatchEngine::new(Arc::new(codec));
//! // let outcome = engine.run(BatchRequest::new("data/", Direction::Export).recursive(true))?;
//! ```

pub mod convert;
pub mod discover;
pub mod engine;
pub mod error;
pub mod request;

pub use convert::{convert, Direction};
pub use discover::discover;
pub use engine::{BatchEngine, BatchOutcome, ConversionFailure};
pub use error::BatchError;
pub use request::BatchRequest;
