use crate::error::{JobError, JobResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A uniquely named shared-storage path holding one staged bundle copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagedLocation {
    path: PathBuf,
}

impl StagedLocation {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Shared durable storage, rooted at a directory every node can reach.
///
/// Stands in for a distributed filesystem: the stager writes bundle copies
/// under it and the orchestrator deletes them after job success.
pub struct SharedStore {
    root: PathBuf,
}

impl SharedStore {
    pub fn new(root: impl Into<PathBuf>) -> JobResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| JobError::staging(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a staged name to its full shared-storage path.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn contains(&self, location: &StagedLocation) -> bool {
        location.path().exists()
    }

    /// Removes a staged copy. Only the orchestrator calls this, and only
    /// after the job reports success.
    pub fn delete(&self, location: &StagedLocation) -> JobResult<()> {
        fs::remove_dir_all(location.path())
            .map_err(|e| JobError::staging(location.path(), e))?;
        tracing::info!("Deleted staged bundle {}", location.path().display());
        Ok(())
    }
}

/// Recursively copies a directory tree, returning the number of files copied.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
