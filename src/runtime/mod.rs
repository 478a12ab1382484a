//! Shard Execution Layer
//!
//! The in-process stand-in for the distributed execution framework the job
//! is built against. It provides the pieces the worker lifecycle depends on:
//! shard-based parallel task execution, resource distribution (staged bundle
//! to every worker's local disk), structured output, and the setup-once /
//! process-many / cleanup-once task callbacks.
//!
//! ## Execution model
//! 1. Input records are split into contiguous shards, one per worker.
//! 2. Each worker task materializes its own local bundle copy, lazily builds
//!    one engine, processes its shard strictly one record at a time and
//!    writes its own part file.
//! 3. Worker status is tracked centrally; any worker failure fails the job.
//!    Retry and re-scheduling policy is not implemented at this layer.
//!
//! ## Submodules
//! - **`types`**: Records, annotation results and worker status.
//! - **`distributor`**: The resource-distribution mechanism.
//! - **`input`**: Line-oriented corpus reading and shard splitting.
//! - **`output`**: JSON-lines part-file writing.
//! - **`executor`**: The worker pool driving shards to completion.

pub mod distributor;
pub mod executor;
pub mod input;
pub mod output;
pub mod types;
