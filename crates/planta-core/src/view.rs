//! View kinds and the contracts views implement
//!
//! A view kind is a registered visualization type. It may carry a generic
//! data loader, a reducer for local mutations, and an initial UI state.
//! Loaders can also be supplied per species (see
//! [`Species`](crate::gene::Species)); resolution prefers the species
//! override.

use crate::gene::GeneticElement;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Terminal outcome of a failed load attempt, recorded on the cached record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ViewDataError {
	/// No loader is registered for this view/gene combination. Not
	/// retryable until a loader is registered.
	#[error("Unsupported gene")]
	#[serde(rename = "unsupported-gene")]
	UnsupportedGene,

	/// The loader failed: network, parsing, or an unexpected error.
	/// Retryable after the record is explicitly reset.
	#[error("Failed to load")]
	#[serde(rename = "failed-to-load")]
	FailedToLoad,
}

/// Result type returned by view loaders.
pub type ViewDataResult<T> = std::result::Result<T, ViewDataError>;

/// Progress sink handed to a loader.
///
/// Amounts must be non-negative. Reports merge monotonically: a report
/// smaller than an earlier one never regresses the recorded amount.
pub trait LoadProgress: Send + Sync {
	fn report(&self, amount: f64);
}

/// Asynchronous data loader for a view kind.
///
/// A loader either resolves with the view's payload or fails with a
/// [`ViewDataError`]. Malformed or partial payloads are the loader's own
/// responsibility to normalize into success or failure.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use planta_core::{GeneticElement, LoadProgress, ViewDataError, ViewDataResult, ViewLoader};
/// use serde_json::{json, Value};
///
/// struct GeneInfoLoader;
///
/// #[async_trait]
/// impl ViewLoader for GeneInfoLoader {
///     async fn load(
///         &self,
///         gene: Option<&GeneticElement>,
///         progress: &dyn LoadProgress,
///     ) -> ViewDataResult<Value> {
///         let gene = gene.ok_or(ViewDataError::UnsupportedGene)?;
///         progress.report(50.0);
///         Ok(json!({ "id": gene.id.clone() }))
///     }
/// }
/// ```
#[async_trait]
pub trait ViewLoader: Send + Sync {
	async fn load(
		&self,
		gene: Option<&GeneticElement>,
		progress: &dyn LoadProgress,
	) -> ViewDataResult<Value>;
}

/// Pure, synchronous reducer applied to locally-held view data.
///
/// Reducers run against a consumer's local copy only; they never touch the
/// shared cell or the durable store.
pub trait ViewReducer: Send + Sync {
	fn reduce(&self, current: Value, action: Value) -> Value;
}

/// A registered visualization type.
///
/// # Examples
///
/// ```rust
/// use planta_core::ViewKind;
/// use serde_json::json;
///
/// let view = ViewKind::new("gene-info", "Gene info")
///     .with_initial_state(json!({ "collapsed": false }));
/// assert_eq!(view.id(), "gene-info");
/// ```
#[derive(Clone)]
pub struct ViewKind {
	id: String,
	name: String,
	loader: Option<Arc<dyn ViewLoader>>,
	reducer: Option<Arc<dyn ViewReducer>>,
	initial_state: Option<Value>,
}

impl ViewKind {
	/// Create a view kind with no loader, reducer, or initial state.
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			loader: None,
			reducer: None,
			initial_state: None,
		}
	}

	/// Attach the view's generic loader.
	pub fn with_loader(mut self, loader: Arc<dyn ViewLoader>) -> Self {
		self.loader = Some(loader);
		self
	}

	/// Attach the view's reducer.
	pub fn with_reducer(mut self, reducer: Arc<dyn ViewReducer>) -> Self {
		self.reducer = Some(reducer);
		self
	}

	/// Attach the initial UI state used before any state is persisted.
	pub fn with_initial_state(mut self, state: Value) -> Self {
		self.initial_state = Some(state);
		self
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The view's generic loader, if any.
	pub fn loader(&self) -> Option<&Arc<dyn ViewLoader>> {
		self.loader.as_ref()
	}

	pub fn reducer(&self) -> Option<&Arc<dyn ViewReducer>> {
		self.reducer.as_ref()
	}

	pub fn initial_state(&self) -> Option<&Value> {
		self.initial_state.as_ref()
	}
}

impl fmt::Debug for ViewKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewKind")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("loader", &self.loader.is_some())
			.field("reducer", &self.reducer.is_some())
			.finish()
	}
}
