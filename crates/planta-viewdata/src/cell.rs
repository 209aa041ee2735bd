//! Shared reactive cells and their registry
//!
//! A cell is the observable unit of cached state for one storage key. Cells
//! are materialized lazily, shared by every consumer of that key, and live
//! for the rest of the process. All writes funnel through a watch channel:
//! the last write wins, and every subscriber observes the latest state.

use crate::record::ViewDataRecord;
use planta_core::ViewDataError;
use planta_storage::{Store, WatchGuard};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Observable container for one key's [`ViewDataRecord`].
pub struct ViewDataCell {
	key: String,
	tx: watch::Sender<ViewDataRecord>,
}

impl ViewDataCell {
	/// The storage key this cell is addressed by.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Snapshot of the current record.
	pub fn get(&self) -> ViewDataRecord {
		self.tx.borrow().clone()
	}

	/// Receiver observing every subsequent write to this cell.
	pub fn subscribe(&self) -> watch::Receiver<ViewDataRecord> {
		self.tx.subscribe()
	}

	/// Overwrite the record unconditionally.
	pub fn replace(&self, record: ViewDataRecord) {
		self.tx.send_replace(record);
	}

	/// Atomically flip an idle cell into the loading state.
	///
	/// Returns false when a load is already in flight, a previous attempt
	/// failed, or data is already present; callers must not invoke a loader
	/// in that case. This check-and-flip is what makes `ensure_loaded`
	/// idempotent.
	pub fn try_begin_load(&self) -> bool {
		let mut started = false;
		self.tx.send_if_modified(|record| {
			if record.loading || record.error.is_some() || record.active_data.is_some() {
				return false;
			}
			*record = ViewDataRecord::loading();
			started = true;
			true
		});
		started
	}

	/// Record a terminal error on an idle cell, under the same preconditions
	/// as [`try_begin_load`](Self::try_begin_load).
	pub fn fail_if_idle(&self, error: ViewDataError) -> bool {
		let mut failed = false;
		self.tx.send_if_modified(|record| {
			if record.loading || record.error.is_some() || record.active_data.is_some() {
				return false;
			}
			*record = ViewDataRecord {
				error: Some(error),
				..ViewDataRecord::empty()
			};
			failed = true;
			true
		});
		failed
	}

	/// Merge a progress report into the current record.
	pub fn report_progress(&self, amount: f64) {
		self.tx.send_if_modified(|record| {
			if amount > record.loading_amount {
				record.loading_amount = amount;
				true
			} else {
				false
			}
		});
	}

	/// Commit a successful load, returning the committed record.
	///
	/// The merged progress amount is preserved on the committed record.
	pub fn complete(&self, data: Value) -> ViewDataRecord {
		let mut committed = ViewDataRecord::empty();
		self.tx.send_modify(|record| {
			record.active_data = Some(data);
			record.loading = false;
			record.error = None;
			committed = record.clone();
		});
		committed
	}

	/// Commit a failed load.
	pub fn fail(&self, error: ViewDataError) {
		self.tx.send_replace(ViewDataRecord {
			error: Some(error),
			..ViewDataRecord::empty()
		});
	}
}

/// Lazily materializes and memoizes one [`ViewDataCell`] per storage key.
///
/// A freshly materialized cell starts out loading (durable data may exist),
/// hydrates from the store on a spawned task, and stays subscribed to the
/// store's change feed for its whole life: any external write, including an
/// administrative wipe, overwrites whatever the cell holds.
pub struct CellRegistry {
	store: Store,
	cells: RwLock<HashMap<String, CellEntry>>,
}

struct CellEntry {
	cell: Arc<ViewDataCell>,
	// The store subscription lives as long as the registry entry, which is
	// the rest of the process
	_feed: WatchGuard,
}

impl CellRegistry {
	pub fn new(store: Store) -> Self {
		Self {
			store,
			cells: RwLock::new(HashMap::new()),
		}
	}

	/// The cell for `key`; repeated calls return the same instance.
	pub async fn cell(&self, key: &str) -> Arc<ViewDataCell> {
		if let Some(entry) = self.cells.read().await.get(key) {
			return Arc::clone(&entry.cell);
		}

		let mut cells = self.cells.write().await;
		if let Some(entry) = cells.get(key) {
			return Arc::clone(&entry.cell);
		}
		let entry = self.materialize(key);
		let cell = Arc::clone(&entry.cell);
		cells.insert(key.to_string(), entry);
		cell
	}

	fn materialize(&self, key: &str) -> CellEntry {
		let (tx, _rx) = watch::channel(ViewDataRecord::loading());
		let cell = Arc::new(ViewDataCell {
			key: key.to_string(),
			tx,
		});

		let feed_cell = Arc::clone(&cell);
		let feed = self.store.watch(
			key,
			Arc::new(move |value: Option<&Value>| {
				let record = match value {
					Some(value) => match serde_json::from_value::<ViewDataRecord>(value.clone()) {
						Ok(record) => record,
						Err(e) => {
							tracing::warn!(key = %feed_cell.key(), error = %e, "ignoring malformed record on change feed");
							return;
						}
					},
					None => ViewDataRecord::empty(),
				};
				feed_cell.replace(record);
			}),
		);

		let store = self.store.clone();
		let hydrating = Arc::clone(&cell);
		tokio::spawn(async move {
			match store.get::<ViewDataRecord>(hydrating.key()).await {
				Ok(Some(record)) => {
					tracing::debug!(key = %hydrating.key(), "hydrated from durable store");
					hydrating.replace(record);
				}
				Ok(None) => hydrating.replace(ViewDataRecord::empty()),
				Err(e) => {
					tracing::warn!(key = %hydrating.key(), error = %e, "hydration failed, treating key as empty");
					hydrating.replace(ViewDataRecord::empty());
				}
			}
		});

		CellEntry { cell, _feed: feed }
	}
}
