use crate::engine::annotator::{Annotator, EngineFactory};
use crate::error::{JobError, JobResult};
use std::path::PathBuf;
use std::sync::Arc;

/// Lifecycle states of the per-worker engine slot.
enum CacheState {
    /// No record has been processed yet; no engine exists.
    NotStarted,
    /// The engine is built and serving records.
    Ready(Box<dyn Annotator>),
    /// The worker retired and released the engine.
    Closed,
}

/// Holds at most one initialized engine instance for one worker task.
///
/// Owned by the worker's execution context and dropped with it, so unrelated
/// task instances in the same process never share an engine by accident.
pub struct EngineCache {
    bundle_dir: PathBuf,
    factory: Arc<dyn EngineFactory>,
    state: CacheState,
    builds: usize,
}

impl EngineCache {
    /// Creates an empty cache over a locally materialized bundle directory.
    pub fn new(bundle_dir: PathBuf, factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            bundle_dir,
            factory,
            state: CacheState::NotStarted,
            builds: 0,
        }
    }

    /// Returns the cached engine, constructing it on first use.
    ///
    /// Construction failures are fatal to the task attempt; there is no
    /// retry at this layer.
    pub fn ensure_ready(&mut self) -> JobResult<&mut dyn Annotator> {
        match self.state {
            CacheState::NotStarted => {
                tracing::info!(
                    "Building engine from bundle {}",
                    self.bundle_dir.display()
                );
                let engine = self.factory.build(&self.bundle_dir)?;
                self.builds += 1;
                self.state = CacheState::Ready(engine);
            }
            CacheState::Ready(_) => {}
            CacheState::Closed => {
                return Err(JobError::engine_init(
                    "engine cache used after close".to_string(),
                ));
            }
        }

        match self.state {
            CacheState::Ready(ref mut engine) => Ok(engine.as_mut()),
            // Unreachable: the match above either installed Ready or returned.
            _ => Err(JobError::engine_init("engine cache in invalid state")),
        }
    }

    /// End-of-lifetime hook, called when the worker has finished its shard.
    ///
    /// Releases engine-held resources. Safe to call when no engine was ever
    /// constructed, and safe to call more than once.
    pub fn close(&mut self) {
        if let CacheState::Ready(ref mut engine) = self.state {
            engine.shutdown();
            tracing::debug!("Engine released for bundle {}", self.bundle_dir.display());
        }
        self.state = CacheState::Closed;
    }

    /// Number of engine constructions performed by this cache.
    pub fn build_count(&self) -> usize {
        self.builds
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, CacheState::Closed)
    }
}
