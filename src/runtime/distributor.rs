//! Resource Distribution
//!
//! The mechanism that ships staged archives to workers: the stager registers
//! shared-storage locations here, and each worker asks for a local copy of
//! every registered archive before touching its first record. Registration
//! order is preserved; the engine bundle is always the first archive.

use crate::error::{JobError, JobResult};
use crate::staging::store::{copy_dir_all, StagedLocation};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct ResourceDistributor {
    archives: Mutex<Vec<StagedLocation>>,
}

impl ResourceDistributor {
    pub fn new() -> Self {
        Self {
            archives: Mutex::new(Vec::new()),
        }
    }

    /// Registers a staged archive for distribution to every worker.
    pub fn register(&self, location: StagedLocation) {
        tracing::debug!(
            "Registered archive for distribution: {}",
            location.path().display()
        );
        self.archives.lock().unwrap().push(location);
    }

    pub fn registered(&self) -> usize {
        self.archives.lock().unwrap().len()
    }

    /// Copies every registered archive into a worker-local directory and
    /// returns the local paths, in registration order.
    ///
    /// Called during worker setup; failures here surface as engine
    /// initialization failures because the worker cannot build its engine
    /// without a local bundle.
    pub fn materialize(&self, worker_dir: &Path) -> JobResult<Vec<PathBuf>> {
        let archives = self.archives.lock().unwrap().clone();

        let mut local = Vec::with_capacity(archives.len());
        for archive in &archives {
            let name = archive
                .path()
                .file_name()
                .ok_or_else(|| JobError::engine_init("staged archive has no name"))?;
            let target = worker_dir.join(name);
            copy_dir_all(archive.path(), &target).map_err(|e| {
                JobError::engine_init(format!(
                    "cannot materialize archive {}: {}",
                    archive.path().display(),
                    e
                ))
            })?;
            local.push(target);
        }

        Ok(local)
    }
}

impl Default for ResourceDistributor {
    fn default() -> Self {
        Self::new()
    }
}
