//! Storage module.
//!
//! Namespaced durable key-value stores with change notification, over
//! in-memory and file-backed backends.

pub use planta_storage::*;
