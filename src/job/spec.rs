use crate::error::{JobError, JobResult};
use std::path::PathBuf;

/// Description of one annotation job run.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// Local path to the engine bundle directory.
    pub bundle: PathBuf,
    /// One or more input locations (files, or directories of files).
    pub inputs: Vec<PathBuf>,
    /// Output location for part files. When absent the job annotates
    /// without persisting results.
    pub output: Option<PathBuf>,
    /// Number of parallel worker tasks.
    pub worker_count: usize,
    /// Root of shared, worker-visible storage for staged bundles.
    pub shared_root: PathBuf,
    /// Root of worker-local scratch space.
    pub scratch_root: PathBuf,
}

impl JobSpec {
    pub const DEFAULT_WORKER_COUNT: usize = 4;

    pub fn new(bundle: impl Into<PathBuf>, inputs: Vec<PathBuf>) -> Self {
        Self {
            bundle: bundle.into(),
            inputs,
            output: None,
            worker_count: Self::DEFAULT_WORKER_COUNT,
            shared_root: std::env::temp_dir().join("annotation-cluster-shared"),
            scratch_root: std::env::temp_dir().join("annotation-cluster-scratch"),
        }
    }

    pub fn validate(&self) -> JobResult<()> {
        if self.inputs.is_empty() {
            return Err(JobError::InvalidSpec {
                reason: "at least one input location is required".to_string(),
            });
        }
        if self.worker_count == 0 {
            return Err(JobError::InvalidSpec {
                reason: "worker count must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
