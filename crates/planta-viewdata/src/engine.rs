//! Engine context and load orchestration
//!
//! [`ViewDataEngine`] owns every process-wide cache: the view registry, the
//! cell registry, the memory cache, and the durable stores. It is passed to
//! consumers by cheap clone (all internals are shared) instead of living in
//! a global, which keeps lifecycle and tests deterministic.

use crate::cache::MemoryCache;
use crate::cell::{CellRegistry, ViewDataCell};
use crate::key;
use crate::registry::ViewRegistry;
use crate::session::ViewDataConsumer;
use planta_core::{GeneticElement, LoadProgress, Result, ViewDataError, ViewKind, ViewLoader};
use planta_storage::{Store, StoreBackend};
use serde_json::Value;
use std::sync::Arc;

/// Store identifier for cached view data.
pub const VIEW_DATA_STORE: &str = "view-data";
/// Store identifier for persisted per-view UI state.
pub const VIEW_STATE_STORE: &str = "view-state";

/// Application-level context owning the shared caches and stores.
///
/// Cloning shares every internal: clones address the same cells, caches,
/// and stores.
#[derive(Clone)]
pub struct ViewDataEngine {
	views: Arc<ViewRegistry>,
	cells: Arc<CellRegistry>,
	memory: Arc<MemoryCache>,
	data_store: Store,
	state_store: Store,
}

impl ViewDataEngine {
	/// Create an engine over `backend`, with both durable namespaces
	/// addressing it.
	pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
		let data_store = Store::new(VIEW_DATA_STORE, Arc::clone(&backend));
		let state_store = Store::new(VIEW_STATE_STORE, backend);
		Self {
			views: Arc::new(ViewRegistry::new()),
			cells: Arc::new(CellRegistry::new(data_store.clone())),
			memory: Arc::new(MemoryCache::new()),
			data_store,
			state_store,
		}
	}

	pub fn views(&self) -> &ViewRegistry {
		&self.views
	}

	pub fn cells(&self) -> &CellRegistry {
		&self.cells
	}

	pub(crate) fn memory(&self) -> &MemoryCache {
		&self.memory
	}

	/// The durable store holding cached view data.
	pub fn data_store(&self) -> &Store {
		&self.data_store
	}

	/// The durable store holding persisted view UI state.
	pub fn state_store(&self) -> &Store {
		&self.state_store
	}

	/// A new consumer with a fresh session discriminator.
	pub fn consumer(&self) -> ViewDataConsumer {
		ViewDataConsumer::new(self.clone())
	}

	/// Loader serving `view` for `gene`: the species override wins over the
	/// view's generic loader.
	fn resolve_loader(
		view: &ViewKind,
		gene: Option<&GeneticElement>,
	) -> Option<Arc<dyn ViewLoader>> {
		gene.and_then(|gene| gene.species.loader_for(view.id()).cloned())
			.or_else(|| view.loader().cloned())
	}

	/// Start a load for `cell` unless one already ran, failed, or is in
	/// flight. Returns true when a loader invocation was started.
	///
	/// With no loader available the cell records
	/// [`ViewDataError::UnsupportedGene`] and the durable store is left
	/// untouched. The loader itself runs on a spawned task; its outcome is
	/// committed to the cell it was started for, and written through to the
	/// durable store on success only.
	pub fn ensure_loaded(
		&self,
		cell: Arc<ViewDataCell>,
		view: &ViewKind,
		gene: Option<&GeneticElement>,
	) -> bool {
		let Some(loader) = Self::resolve_loader(view, gene) else {
			if cell.fail_if_idle(ViewDataError::UnsupportedGene) {
				tracing::debug!(key = %cell.key(), view = view.id(), "no loader for view");
			}
			return false;
		};

		if !cell.try_begin_load() {
			return false;
		}

		tracing::debug!(key = %cell.key(), view = view.id(), "starting load");
		let engine = self.clone();
		let gene = gene.cloned();
		let view_id = view.id().to_string();
		tokio::spawn(async move {
			engine.run_load(cell, loader, gene, view_id).await;
		});
		true
	}

	async fn run_load(
		&self,
		cell: Arc<ViewDataCell>,
		loader: Arc<dyn ViewLoader>,
		gene: Option<GeneticElement>,
		view_id: String,
	) {
		// The loader runs on its own task so a panicking loader degrades
		// into an ordinary failed load instead of a cell stuck loading.
		let progress_cell = Arc::clone(&cell);
		let outcome = tokio::spawn(async move {
			let progress = CellProgress {
				cell: progress_cell,
			};
			loader.load(gene.as_ref(), &progress).await
		})
		.await;

		match outcome {
			Ok(Ok(data)) => {
				let committed = cell.complete(data);
				tracing::debug!(key = %cell.key(), view = %view_id, "load committed");
				// A failed write-through is not a failed load; the cell
				// state stands and the next session re-loads.
				if let Err(e) = self.data_store.set(cell.key(), &committed).await {
					tracing::warn!(key = %cell.key(), error = %e, "failed to persist view data");
				}
			}
			Ok(Err(error)) => {
				tracing::debug!(key = %cell.key(), view = %view_id, %error, "load failed");
				cell.fail(error);
			}
			Err(e) => {
				tracing::warn!(key = %cell.key(), view = %view_id, error = %e, "loader task aborted");
				cell.fail(ViewDataError::FailedToLoad);
			}
		}
	}

	/// Persisted UI state for `view` scoped to `gene`, falling back to the
	/// view's initial state, then to null.
	pub async fn view_state(
		&self,
		view: &ViewKind,
		gene: Option<&GeneticElement>,
	) -> Result<Value> {
		let state_key = key::derive_key(view.id(), gene.map(|gene| gene.id.as_str()));
		if let Some(state) = self.state_store.get::<Value>(&state_key).await? {
			return Ok(state);
		}
		Ok(view.initial_state().cloned().unwrap_or(Value::Null))
	}

	/// Write `state` through to the view-state store.
	pub async fn set_view_state(
		&self,
		view: &ViewKind,
		gene: Option<&GeneticElement>,
		state: &Value,
	) -> Result<()> {
		let state_key = key::derive_key(view.id(), gene.map(|gene| gene.id.as_str()));
		self.state_store.set(&state_key, state).await
	}

	/// Administrative wipe: clears both durable namespaces. Every live cell
	/// observes the reset through the change feed.
	pub async fn wipe(&self) -> Result<()> {
		tracing::debug!("wiping view data and view state");
		self.data_store.clear().await?;
		self.state_store.clear().await
	}
}

struct CellProgress {
	cell: Arc<ViewDataCell>,
}

impl LoadProgress for CellProgress {
	fn report(&self, amount: f64) {
		self.cell.report_progress(amount);
	}
}
