//! Resource Staging Layer
//!
//! Moves a local engine bundle into shared, worker-visible storage so the
//! execution layer can distribute it to every worker.
//!
//! ## Responsibilities
//! - **Uniqueness**: every staging call gets its own collision-free name, so
//!   concurrent job runs using the same bundle never share a staged copy.
//! - **Copying**: a blocking recursive copy from local disk into the shared
//!   store; any failure here aborts job submission.
//! - **Registration**: handing the staged location to the resource
//!   distributor, a side effect visible only to the execution layer.
//!
//! Staging is deliberately not idempotent: two calls produce two independent
//! staged copies. Deletion of a staged copy is reserved for the orchestrator
//! after confirmed job success.
//!
//! ## Submodules
//! - **`store`**: Filesystem-rooted shared storage and the recursive copy
//!   primitive.
//! - **`stager`**: The `stage()` operation itself.

pub mod stager;
pub mod store;

#[cfg(test)]
mod tests;
