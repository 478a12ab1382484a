//! Annotation Engine Wrapper
//!
//! The engine is treated as an external collaborator: given raw text it
//! returns an opaque annotation blob. This module owns the two seams the
//! rest of the system is built against and the default implementation behind
//! them.
//!
//! ## Submodules
//! - **`bundle`**: The self-contained application bundle and its top-level
//!   descriptor (`application.json` at the bundle root).
//! - **`annotator`**: The `Annotator`/`EngineFactory` contracts plus
//!   `BundleEngine`, the descriptor-configured default engine.
//!
//! The engine is stateful, expensive to construct and not safe for
//! concurrent use; callers hold exactly one instance per worker and feed it
//! one document at a time.

pub mod annotator;
pub mod bundle;
