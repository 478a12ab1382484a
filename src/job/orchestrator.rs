use super::spec::JobSpec;
use crate::engine::annotator::{BundleEngineFactory, EngineFactory};
use crate::engine::bundle::EngineBundle;
use crate::error::JobResult;
use crate::runtime::distributor::ResourceDistributor;
use crate::runtime::executor::ShardExecutor;
use crate::runtime::input::collect_records;
use crate::staging::stager::ResourceStager;
use crate::staging::store::SharedStore;
use std::sync::Arc;

/// Aggregate outcome of a successful job run.
#[derive(Debug)]
pub struct JobSummary {
    pub records_in: usize,
    pub records_out: u64,
    pub workers: usize,
    /// Whether the staged bundle copy was removed from shared storage.
    /// `false` means the deletion failed and the copy was leaked.
    pub staged_cleaned: bool,
}

/// Runs one annotation job end to end with the default bundle engine.
pub async fn run(spec: JobSpec) -> JobResult<JobSummary> {
    run_with_factory(spec, Arc::new(BundleEngineFactory)).await
}

/// Runs one annotation job end to end with a caller-provided engine factory.
///
/// Staging happens before any worker task is scheduled, so a missing or
/// unreadable bundle fails the submission without leaving a staged copy.
/// On any execution failure the staged copy stays in shared storage for
/// diagnosis and for retries driven by the caller.
pub async fn run_with_factory(
    spec: JobSpec,
    factory: Arc<dyn EngineFactory>,
) -> JobResult<JobSummary> {
    spec.validate()?;

    let bundle = EngineBundle::open(&spec.bundle)?;
    let store = Arc::new(SharedStore::new(&spec.shared_root)?);
    let distributor = Arc::new(ResourceDistributor::new());

    // Stage and register the bundle for distribution.
    let stager = ResourceStager::new(store.clone(), distributor.clone());
    let staged = stager.stage(&bundle)?;

    // Aggregate every input location into one logical record set.
    let records = collect_records(&spec.inputs)?;
    let records_in = records.len();
    tracing::info!(
        "Submitting job: {} records, {} workers, output: {:?}",
        records_in,
        spec.worker_count,
        spec.output
    );

    let executor = ShardExecutor::new(
        distributor,
        factory,
        spec.worker_count,
        spec.scratch_root.clone(),
    );

    // Block until the distributed execution completes. A failure propagates
    // as-is and deliberately skips staged-copy deletion.
    let report = executor.execute(records, spec.output.clone()).await?;

    // Best-effort cleanup on confirmed success only.
    let staged_cleaned = match store.delete(&staged) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                "Leaked staged bundle {} after successful job: {}",
                staged.path().display(),
                e
            );
            false
        }
    };

    tracing::info!(
        "Job completed: {} records in, {} records out, {} workers",
        records_in,
        report.records_out,
        report.workers
    );

    Ok(JobSummary {
        records_in,
        records_out: report.records_out,
        workers: report.workers,
        staged_cleaned,
    })
}
