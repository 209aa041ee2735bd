//! Consumer sessions: identity guard, read surface, dispatch
//!
//! A [`ViewDataConsumer`] is one observer of view data, typically a panel.
//! It carries its own session discriminator so identity transitions are
//! detected per consumer, not per shared cell: when the requested key
//! changes, the consumer stops trusting the shared cell until it has
//! re-synchronized, which is what keeps a late result for the previous key
//! from being painted onto the new one.

use crate::engine::ViewDataEngine;
use crate::key;
use crate::record::ViewDataRecord;
use planta_core::{Error, GeneticElement, Result, ViewDataError, ViewKind};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Snapshot exposed to rendering code for one observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewData {
	pub active_data: Option<Value>,
	pub loading: bool,
	pub error: Option<ViewDataError>,
	pub loading_amount: f64,
	/// False while the consumer has not yet re-synchronized after a key
	/// change. Unconfirmed data must not be treated as belonging to the
	/// requested key.
	pub confirmed: bool,
}

impl ViewData {
	fn from_record(record: ViewDataRecord, confirmed: bool) -> Self {
		Self {
			active_data: record.active_data,
			loading: record.loading,
			error: record.error,
			loading_amount: record.loading_amount,
			confirmed,
		}
	}

	/// Deserialize the payload into the view's concrete data type.
	pub fn active_data_as<T>(&self) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		match &self.active_data {
			Some(value) => serde_json::from_value(value.clone())
				.map(Some)
				.map_err(|e| Error::Serialization(e.to_string())),
			None => Ok(None),
		}
	}
}

/// One consumer of view data.
pub struct ViewDataConsumer {
	engine: ViewDataEngine,
	session: String,
	confirmed_key: Option<String>,
	// Local overlay for the confirmed key; dispatch mutates this copy only
	local: Option<ViewDataRecord>,
	feed: Option<watch::Receiver<ViewDataRecord>>,
}

impl ViewDataConsumer {
	pub(crate) fn new(engine: ViewDataEngine) -> Self {
		Self {
			engine,
			session: Uuid::new_v4().to_string(),
			confirmed_key: None,
			local: None,
			feed: None,
		}
	}

	/// The session discriminator appended to this consumer's keys.
	pub fn session(&self) -> &str {
		&self.session
	}

	/// Observe the current state for `view` and `gene`.
	///
	/// The first observation after the requested key changes returns a
	/// provisional snapshot (memory cache, else the shared cell) marked
	/// `confirmed: false`; it neither starts a load nor captures into the
	/// memory cache. The observation after that is fully synchronized: it
	/// starts a load if the cell is idle and emits the shared state merged
	/// with this consumer's local overlay.
	pub async fn observe(&mut self, view: &ViewKind, gene: Option<&GeneticElement>) -> ViewData {
		let storage_key = key::derive_key(view.id(), gene.map(|gene| gene.id.as_str()));
		let qualified = key::qualified_key(&storage_key, &self.session);
		let cell = self.engine.cells().cell(&storage_key).await;

		if self.confirmed_key.as_deref() != Some(qualified.as_str()) {
			let snapshot = match self.engine.memory().lookup(&qualified).await {
				Some(cached) => cached,
				None => cell.get(),
			};
			// A fresh receiver has seen the current value; only writes from
			// here on count as changes
			self.feed = Some(cell.subscribe());
			self.confirmed_key = Some(qualified);
			self.local = None;
			return ViewData::from_record(snapshot, false);
		}

		self.engine.ensure_loaded(Arc::clone(&cell), view, gene);

		let shared = cell.get();
		let changed = match self.feed.as_mut() {
			Some(feed) => {
				let changed = feed.has_changed().unwrap_or(false);
				if changed {
					feed.borrow_and_update();
				}
				changed
			}
			None => true,
		};

		// The shared cell overrides the local overlay whenever it changes;
		// between cell changes, dispatched mutations survive.
		if changed || self.local.is_none() {
			let adopted = if shared.has_data() {
				shared.clone()
			} else {
				match self.engine.memory().lookup(&qualified).await {
					Some(cached) => cached,
					None => shared.clone(),
				}
			};
			self.local = Some(adopted);
		}

		let local = self
			.local
			.get_or_insert_with(|| shared.clone())
			.clone();
		self.engine.memory().capture(&qualified, &local).await;

		let emitted = if local.loading || shared.loading {
			shared
		} else {
			local
		};
		ViewData::from_record(emitted, true)
	}

	/// Observe until the state for `view` and `gene` is synchronized and
	/// settled (not loading), driving reconciliation and loading on the
	/// way.
	pub async fn settled(&mut self, view: &ViewKind, gene: Option<&GeneticElement>) -> ViewData {
		let storage_key = key::derive_key(view.id(), gene.map(|gene| gene.id.as_str()));
		let cell = self.engine.cells().cell(&storage_key).await;
		let mut feed = cell.subscribe();
		loop {
			let data = self.observe(view, gene).await;
			if data.confirmed && !data.loading {
				return data;
			}
			if !data.confirmed {
				// Reconciliation pass; observe again right away
				continue;
			}
			if feed.changed().await.is_err() {
				return data;
			}
		}
	}

	/// Apply `view`'s reducer to the locally-held data.
	///
	/// A no-op when no data is loaded, the view has no reducer, or the
	/// consumer is mid-transition. Never touches the shared cell or the
	/// durable store: loads are shared and persisted, dispatched mutations
	/// are ephemeral and local.
	pub fn dispatch(&mut self, view: &ViewKind, action: Value) {
		if self.confirmed_key.is_none() {
			return;
		}
		let Some(reducer) = view.reducer() else {
			return;
		};
		let Some(local) = self.local.as_mut() else {
			return;
		};
		if let Some(data) = local.active_data.take() {
			local.active_data = Some(reducer.reduce(data, action));
		}
	}
}
