//! Per-Worker Engine Lifecycle
//!
//! Each worker owns exactly one engine instance for the lifetime of its
//! assigned shard. Construction is expensive (loading a large configured
//! pipeline), so it must happen once per worker and be amortized across
//! every record the worker processes, never paid per record.
//!
//! ## Lifecycle
//! The cache is an explicit state machine, keyed to the worker task's
//! lifetime rather than to a process-wide global:
//!
//! ```text
//! NotStarted --ensure_ready()--> Ready --close()--> Closed
//! ```
//!
//! - `ensure_ready` builds the engine from the locally materialized bundle
//!   on first call and returns the cached instance afterwards. A build
//!   failure is fatal to the task attempt; rescheduling belongs to the
//!   execution layer.
//! - `close` runs exactly once when the worker has drained its shard. It is
//!   a no-op if no engine was ever constructed.
//!
//! The engine is not safe for concurrent use; the cache assumes the
//! one-record-at-a-time execution model and takes `&mut self` throughout
//! instead of locking.
//!
//! ## Submodules
//! - **`cache`**: The engine cache state machine.
//! - **`processor`**: Drives one record through the cached engine.

pub mod cache;
pub mod processor;

#[cfg(test)]
mod tests;
