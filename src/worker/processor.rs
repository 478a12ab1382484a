use super::cache::EngineCache;
use crate::error::{JobError, JobResult};
use crate::runtime::types::{AnnotationResult, Record};

/// Drives one input record at a time through a worker's cached engine.
///
/// Holds no engine state of its own; the cache owns the engine and the
/// processor only borrows it for the duration of the shard.
pub struct RecordProcessor<'a> {
    cache: &'a mut EngineCache,
}

impl<'a> RecordProcessor<'a> {
    pub fn new(cache: &'a mut EngineCache) -> Self {
        Self { cache }
    }

    /// Annotates one record, preserving its offset verbatim in the output.
    ///
    /// Engine errors are not swallowed or retried: they propagate as a fatal
    /// record-processing failure for this task attempt.
    pub fn process(&mut self, record: &Record) -> JobResult<AnnotationResult> {
        let engine = self.cache.ensure_ready()?;

        let annotation = engine.annotate(&record.text).map_err(|e| match e {
            // Already classified errors pass through untouched.
            err @ JobError::RecordProcessing { .. } => err,
            other => JobError::RecordProcessing {
                offset: record.offset,
                reason: other.to_string(),
            },
        })?;

        Ok(AnnotationResult {
            offset: record.offset,
            annotation,
        })
    }
}
