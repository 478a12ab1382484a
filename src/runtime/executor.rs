//! Worker Pool Implementation
//!
//! Drives shards of records through parallel worker tasks. Each worker runs
//! the full task lifecycle against its own engine cache:
//!
//! 1. **Setup**: materialize the distributed bundle on local disk.
//! 2. **Process**: one record at a time through the cached engine, writing
//!    results to the worker's part file.
//! 3. **Cleanup**: close the engine cache exactly once, success or failure.
//!
//! A worker failure (engine construction or a record-level engine error) is
//! fatal to that task attempt and to the job; this layer never retries.

use super::distributor::ResourceDistributor;
use super::input::split_shards;
use super::output::PartWriter;
use super::types::{Record, WorkerReport, WorkerStatus};
use crate::engine::annotator::EngineFactory;
use crate::error::{JobError, JobResult};
use crate::worker::cache::EngineCache;
use crate::worker::processor::RecordProcessor;

use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// The engine that drives shard execution.
pub struct ShardExecutor {
    distributor: Arc<ResourceDistributor>,
    factory: Arc<dyn EngineFactory>,
    /// Number of concurrent worker tasks.
    worker_count: usize,
    /// Local scratch space; each worker gets its own subdirectory.
    scratch_root: PathBuf,
}

/// Aggregate outcome of a successful execution.
#[derive(Debug)]
pub struct ExecutionReport {
    pub records_out: u64,
    pub workers: usize,
    pub parts: Vec<PathBuf>,
}

#[derive(Clone)]
struct WorkerContext {
    distributor: Arc<ResourceDistributor>,
    factory: Arc<dyn EngineFactory>,
    scratch_root: PathBuf,
    output: Option<PathBuf>,
}

impl ShardExecutor {
    pub fn new(
        distributor: Arc<ResourceDistributor>,
        factory: Arc<dyn EngineFactory>,
        worker_count: usize,
        scratch_root: PathBuf,
    ) -> Arc<Self> {
        Arc::new(Self {
            distributor,
            factory,
            worker_count,
            scratch_root,
        })
    }

    /// Splits the record set into shards, runs one worker task per shard and
    /// waits for all of them.
    ///
    /// When `output` is absent the records are annotated but not persisted.
    /// Returns the first worker failure, if any; remaining workers still run
    /// to completion before the error is reported.
    pub async fn execute(
        &self,
        records: Vec<Record>,
        output: Option<PathBuf>,
    ) -> JobResult<ExecutionReport> {
        let shards = split_shards(records, self.worker_count);
        let statuses: Arc<DashMap<usize, WorkerStatus>> = Arc::new(DashMap::new());

        tracing::info!("Starting {} worker tasks", shards.len());

        let mut handles = Vec::with_capacity(shards.len());
        for (worker_id, shard) in shards.into_iter().enumerate() {
            statuses.insert(worker_id, WorkerStatus::Running);
            let ctx = WorkerContext {
                distributor: self.distributor.clone(),
                factory: self.factory.clone(),
                scratch_root: self.scratch_root.clone(),
                output: output.clone(),
            };
            handles.push((
                worker_id,
                tokio::spawn(async move { run_worker(worker_id, shard, ctx).await }),
            ));
        }

        let mut records_out = 0u64;
        let mut parts = Vec::new();
        let mut workers = 0usize;
        let mut first_failure: Option<JobError> = None;

        for (worker_id, handle) in handles {
            match handle.await {
                Ok(Ok(report)) => {
                    statuses.insert(worker_id, WorkerStatus::Completed);
                    tracing::info!(
                        "Worker {} completed ({} records)",
                        report.worker_id,
                        report.records
                    );
                    records_out += report.records;
                    workers += 1;
                    if let Some(part) = report.part {
                        parts.push(part);
                    }
                }
                Ok(Err(e)) => {
                    tracing::error!("Worker {} failed: {}", worker_id, e);
                    statuses.insert(
                        worker_id,
                        WorkerStatus::Failed {
                            error: e.to_string(),
                        },
                    );
                    first_failure.get_or_insert(e);
                }
                Err(join_error) => {
                    tracing::error!("Worker {} aborted: {}", worker_id, join_error);
                    statuses.insert(
                        worker_id,
                        WorkerStatus::Failed {
                            error: join_error.to_string(),
                        },
                    );
                    first_failure.get_or_insert(JobError::WorkerAborted {
                        worker_id,
                        reason: join_error.to_string(),
                    });
                }
            }
        }

        let failed = statuses
            .iter()
            .filter(|entry| matches!(entry.value(), WorkerStatus::Failed { .. }))
            .count();
        tracing::info!(
            "Worker pool finished: {} completed, {} failed",
            workers,
            failed
        );

        match first_failure {
            Some(error) => Err(error),
            None => Ok(ExecutionReport {
                records_out,
                workers,
                parts,
            }),
        }
    }
}

/// One worker's full task lifecycle: setup, process-many, cleanup.
async fn run_worker(
    worker_id: usize,
    shard: Vec<Record>,
    ctx: WorkerContext,
) -> JobResult<WorkerReport> {
    tracing::debug!("Worker {} assigned {} records", worker_id, shard.len());

    // Setup: worker-local scratch plus a local copy of the distributed bundle.
    let worker_dir = ctx.scratch_root.join(format!("worker-{:05}", worker_id));
    std::fs::create_dir_all(&worker_dir)?;

    let local_archives = ctx.distributor.materialize(&worker_dir)?;
    let bundle_dir = local_archives
        .into_iter()
        .next()
        .ok_or_else(|| JobError::engine_init("no bundle registered for distribution"))?;

    let mut cache = EngineCache::new(bundle_dir, ctx.factory);
    let mut writer = match &ctx.output {
        Some(dir) => Some(PartWriter::create(dir, worker_id)?),
        None => None,
    };

    // Process, then cleanup exactly once regardless of the outcome.
    let outcome = process_shard(&mut cache, &shard, writer.as_mut());
    cache.close();
    let records = outcome?;

    let part = match writer {
        Some(writer) => Some(writer.finish()?.0),
        None => None,
    };

    Ok(WorkerReport {
        worker_id,
        records,
        part,
    })
}

fn process_shard(
    cache: &mut EngineCache,
    shard: &[Record],
    mut writer: Option<&mut PartWriter>,
) -> JobResult<u64> {
    let mut processor = RecordProcessor::new(cache);
    let mut processed = 0u64;

    for record in shard {
        let result = processor.process(record)?;
        if let Some(writer) = writer.as_mut() {
            writer.write(&result)?;
        }
        processed += 1;
    }

    Ok(processed)
}
