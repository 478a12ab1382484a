//! Job Error Taxonomy
//!
//! Every fatal condition in the system maps to one variant of [`JobError`].
//! Nothing here is retried or recovered locally: staging failures abort job
//! submission, engine and record failures abort the worker task attempt, and
//! the caller (the surrounding execution layer) decides what happens next.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised by the annotation job layers.
#[derive(Debug, Error)]
pub enum JobError {
    /// The engine bundle could not be copied into shared storage.
    /// Fatal to job submission; no worker task is scheduled after this.
    #[error("failed to stage bundle {path:?}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The engine could not be constructed on a worker (missing or malformed
    /// application descriptor, engine start-up error). Fatal to that task
    /// attempt; rescheduling is the outer framework's decision.
    #[error("engine initialization failed: {reason}")]
    EngineInitialization { reason: String },

    /// The engine failed while annotating one specific record. Fatal to the
    /// task attempt, never swallowed or retried here.
    #[error("record processing failed at offset {offset}: {reason}")]
    RecordProcessing { offset: u64, reason: String },

    /// The job description itself is unusable (no inputs, zero workers).
    #[error("invalid job spec: {reason}")]
    InvalidSpec { reason: String },

    /// A worker task ended without reporting a result (panic or abort).
    #[error("worker {worker_id} aborted: {reason}")]
    WorkerAborted { worker_id: usize, reason: String },

    /// Input/output errors outside the staging path (reading input shards,
    /// writing part files, scratch directory setup).
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl JobError {
    /// Builds a staging error from a path and an underlying I/O failure.
    pub fn staging(path: impl Into<PathBuf>, source: io::Error) -> Self {
        JobError::Staging {
            path: path.into(),
            source,
        }
    }

    /// Builds an engine-initialization error from any displayable cause.
    pub fn engine_init(reason: impl Into<String>) -> Self {
        JobError::EngineInitialization {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type JobResult<T> = Result<T, JobError>;
