//! Crate-wide error types for failures that are not parse-level anomalies
//! (`spec.md` §7: "I/O errors ... surfaced verbatim to the caller").

use thiserror::Error;

pub use crate::config::ConfigError;

/// Errors the batch pipeline (C4) can surface to its caller. Individual
/// parse failures are never represented here — they become a `quality: 0`
/// `ParsedName`, not an `Err`.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input reader failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("a worker thread panicked")]
    WorkerPanicked,
}
