//! Session-scoped memory cache

use crate::record::ViewDataRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Remembers the last resolved record per fully-qualified key.
///
/// Purely an optimization: re-subscribing to data already resolved earlier
/// in the same session replays the resolved record instead of flashing a
/// loading state. The reactive cell stays the source of truth.
#[derive(Default)]
pub struct MemoryCache {
	entries: RwLock<HashMap<String, ViewDataRecord>>,
}

impl MemoryCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Keep `record` under `key` if it carries data; records without data
	/// are not worth replaying.
	pub async fn capture(&self, key: &str, record: &ViewDataRecord) {
		if record.has_data() {
			self.entries
				.write()
				.await
				.insert(key.to_string(), record.clone());
		}
	}

	pub async fn lookup(&self, key: &str) -> Option<ViewDataRecord> {
		self.entries.read().await.get(key).cloned()
	}
}
