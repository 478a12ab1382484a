//! Job Orchestration Layer
//!
//! Assembles the end-to-end annotation job: validates the spec, stages the
//! engine bundle into shared storage, collects and shards the input corpus,
//! runs the worker pool to completion and cleans up staged artifacts.
//!
//! ## Cleanup discipline
//! The staged bundle copy is deleted only after the job reports success, and
//! best-effort at that: a missed deletion is a logged resource leak, not a
//! correctness bug. On failure the copy is intentionally left behind, since
//! a retry elsewhere may still need it and it is useful for diagnosis.
//!
//! ## Submodules
//! - **`spec`**: The job description (`JobSpec`) and its validation.
//! - **`orchestrator`**: The `run` operation.

pub mod orchestrator;
pub mod spec;
