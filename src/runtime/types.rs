use serde::{Deserialize, Serialize};

/// One input document: a line of corpus text plus its byte offset within
/// the source file. The offset carries no meaning beyond identity; it is
/// preserved verbatim into the matching [`AnnotationResult`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub offset: u64,
    pub text: String,
}

/// The output paired 1:1 with an input [`Record`]: the same offset plus the
/// engine's opaque serialized annotation blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotationResult {
    pub offset: u64,
    pub annotation: String,
}

/// Lifecycle state of one worker task, tracked by the executor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum WorkerStatus {
    /// The worker is processing its shard.
    Running,
    /// The worker drained its shard and closed its engine.
    Completed,
    /// The worker's task attempt failed; its shard emitted no further output.
    Failed { error: String },
}

/// Summary reported by one finished worker.
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub records: u64,
    pub part: Option<std::path::PathBuf>,
}
