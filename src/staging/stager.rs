use super::store::{copy_dir_all, SharedStore, StagedLocation};
use crate::engine::bundle::EngineBundle;
use crate::error::{JobError, JobResult};
use crate::runtime::distributor::ResourceDistributor;
use std::sync::Arc;
use uuid::Uuid;

/// Copies local engine bundles into shared storage and registers them for
/// distribution to every worker.
pub struct ResourceStager {
    store: Arc<SharedStore>,
    distributor: Arc<ResourceDistributor>,
}

impl ResourceStager {
    pub fn new(store: Arc<SharedStore>, distributor: Arc<ResourceDistributor>) -> Self {
        Self { store, distributor }
    }

    /// Stages one bundle: generates a unique shared-storage name, copies the
    /// bundle there and registers the staged location with the distributor.
    ///
    /// Each call produces its own independent staged copy; the random suffix
    /// keeps concurrent submissions of the same bundle from colliding.
    pub fn stage(&self, bundle: &EngineBundle) -> JobResult<StagedLocation> {
        let staged_name = format!("{}-{}", bundle.name(), Uuid::new_v4());
        let staged_path = self.store.resolve(&staged_name);

        tracing::info!(
            "Staging bundle {} -> {}",
            bundle.path().display(),
            staged_path.display()
        );

        let copied = copy_dir_all(bundle.path(), &staged_path)
            .map_err(|e| JobError::staging(bundle.path(), e))?;

        tracing::debug!(
            "Copied {} files into staged location {}",
            copied,
            staged_path.display()
        );

        let location = StagedLocation::new(staged_path);
        self.distributor.register(location.clone());

        Ok(location)
    }
}
