//! Distributed Annotation Cluster Library
//!
//! This library crate defines the core modules of a batch job that runs a
//! pluggable text-annotation engine over a corpus of documents on a pool of
//! parallel workers. The engine itself is an external collaborator (raw text
//! in, annotation blob out); what lives here is the orchestration around it:
//! staging a multi-gigabyte engine bundle into shared storage, building one
//! expensive engine instance per worker, reusing it across every record that
//! worker processes, and cleaning up staged artifacts after the job.
//!
//! ## Architecture Modules
//! The system is composed of five loosely coupled subsystems:
//!
//! - **`engine`**: The annotation-engine wrapper. Defines the `Annotator`
//!   contract and the default bundle-backed implementation that loads a
//!   configured application descriptor.
//! - **`staging`**: The resource staging layer. Copies a local engine bundle
//!   into shared storage under a collision-free name and registers it for
//!   distribution to every worker.
//! - **`worker`**: The per-worker lifecycle layer. A lazily built,
//!   exactly-once engine cache plus the record processor that drives one
//!   document at a time through it.
//! - **`runtime`**: The execution layer. Shards input records, spawns worker
//!   tasks, materializes the distributed bundle on each worker's local disk,
//!   and writes part files of annotation results.
//! - **`job`**: The orchestration layer. Assembles the end-to-end job from a
//!   `JobSpec`, submits it, waits for completion, and deletes the staged
//!   bundle copy on confirmed success.

pub mod engine;
pub mod error;
pub mod job;
pub mod runtime;
pub mod staging;
pub mod worker;

pub use error::{JobError, JobResult};
