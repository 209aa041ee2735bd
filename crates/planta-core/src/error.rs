//! Infrastructure errors shared across the workspace

use thiserror::Error;

/// Errors raised by storage backends and serialization boundaries.
///
/// Domain-level load failures are not represented here; those are recorded
/// on the cached record as [`ViewDataError`](crate::view::ViewDataError).
#[derive(Debug, Error)]
pub enum Error {
	/// A value could not be serialized or deserialized.
	#[error("serialization error: {0}")]
	Serialization(String),

	/// A storage backend rejected or failed an operation.
	#[error("storage error: {0}")]
	Storage(String),

	/// An I/O error from a file-backed store.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
