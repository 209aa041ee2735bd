//! The unit of cached view state

use planta_core::ViewDataError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cached state for one (view, gene) key.
///
/// At most one of `loading` and `error` holds at a time. `active_data` may
/// remain visible while a newer load is in flight (stale-while-revalidate);
/// a failed attempt never leaves data behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDataRecord {
	/// The resolved payload; `None` until a load or hydration succeeds.
	pub active_data: Option<Value>,
	/// True while a load is in flight for this record.
	pub loading: bool,
	/// Set exclusively when loading failed.
	pub error: Option<ViewDataError>,
	/// Progress of the current load attempt; never regresses.
	pub loading_amount: f64,
}

impl ViewDataRecord {
	/// The state a record holds before anything is known about its key.
	pub fn empty() -> Self {
		Self {
			active_data: None,
			loading: false,
			error: None,
			loading_amount: 0.0,
		}
	}

	/// Fresh record for a load that just started.
	pub fn loading() -> Self {
		Self {
			loading: true,
			..Self::empty()
		}
	}

	/// Merge a progress report; amounts never regress.
	pub fn merge_progress(&mut self, amount: f64) {
		if amount > self.loading_amount {
			self.loading_amount = amount;
		}
	}

	pub fn is_settled(&self) -> bool {
		!self.loading
	}

	pub fn has_data(&self) -> bool {
		self.active_data.is_some()
	}
}

impl Default for ViewDataRecord {
	fn default() -> Self {
		Self::empty()
	}
}
