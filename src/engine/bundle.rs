//! Engine Bundle and Application Descriptor
//!
//! A bundle is a directory tree describing one configured annotation
//! application: a top-level `application.json` descriptor plus whatever
//! resources the application ships with. Bundles are immutable after
//! creation; the stager copies them, the workers only read them.

use crate::error::{JobError, JobResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the application descriptor expected at the bundle root.
pub const DESCRIPTOR_FILE: &str = "application.json";

/// A local engine bundle, validated to exist before staging.
#[derive(Debug, Clone)]
pub struct EngineBundle {
    path: PathBuf,
}

impl EngineBundle {
    /// Wraps a local bundle path, failing with a staging error if the path
    /// does not exist or is not a directory.
    pub fn open(path: impl Into<PathBuf>) -> JobResult<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(JobError::staging(
                &path,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "bundle directory does not exist",
                ),
            ));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bundle's base name, used as the prefix of its staged copy.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("bundle")
    }
}

/// The parsed top-level application descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleDescriptor {
    /// Human-readable application name, echoed into every annotation blob.
    pub name: String,
    /// The labelled annotator rules the application is configured with.
    pub annotators: Vec<AnnotatorSpec>,
}

/// One labelled annotation rule inside the descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatorSpec {
    /// Annotation type emitted for each match (e.g. "Token").
    pub label: String,
    /// Regular expression selecting the spans to annotate.
    pub pattern: String,
}

impl BundleDescriptor {
    /// Loads and parses the descriptor from the root of a bundle directory.
    ///
    /// A missing or malformed descriptor is an engine-initialization failure:
    /// the bundle was distributed but cannot drive an engine.
    pub fn load(bundle_dir: &Path) -> JobResult<Self> {
        let descriptor_path = bundle_dir.join(DESCRIPTOR_FILE);
        let raw = std::fs::read_to_string(&descriptor_path).map_err(|e| {
            JobError::engine_init(format!(
                "missing application descriptor {}: {}",
                descriptor_path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            JobError::engine_init(format!(
                "malformed application descriptor {}: {}",
                descriptor_path.display(),
                e
            ))
        })
    }
}
