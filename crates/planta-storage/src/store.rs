//! Namespaced store facade with change notification

use crate::backend::StoreBackend;
use parking_lot::RwLock;
use planta_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Listener invoked with the new value for a watched key, or `None` when
/// the key was removed or the whole store cleared.
pub type WatchListener = Arc<dyn Fn(Option<&Value>) + Send + Sync>;

struct Watchers {
	next_id: AtomicU64,
	by_key: RwLock<HashMap<String, Vec<(u64, WatchListener)>>>,
}

impl Watchers {
	fn new() -> Self {
		Self {
			next_id: AtomicU64::new(0),
			by_key: RwLock::new(HashMap::new()),
		}
	}

	fn remove(&self, key: &str, id: u64) {
		let mut by_key = self.by_key.write();
		if let Some(listeners) = by_key.get_mut(key) {
			listeners.retain(|(listener_id, _)| *listener_id != id);
			if listeners.is_empty() {
				by_key.remove(key);
			}
		}
	}
}

/// A namespaced view of a [`StoreBackend`] with a per-key change feed.
///
/// Two stores with different identifiers share a backend without seeing
/// each other's entries; two stores with the same identifier address the
/// same entries. Values cross the boundary through serde, like the
/// backend-agnostic cache layers this store is modeled on.
///
/// Cloning is cheap and shares watchers as well as entries.
#[derive(Clone)]
pub struct Store {
	namespace: String,
	backend: Arc<dyn StoreBackend>,
	watchers: Arc<Watchers>,
}

impl Store {
	/// Create a store addressing `backend` under `namespace`.
	pub fn new(namespace: impl Into<String>, backend: Arc<dyn StoreBackend>) -> Self {
		Self {
			namespace: namespace.into(),
			backend,
			watchers: Arc::new(Watchers::new()),
		}
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	fn scoped(&self, key: &str) -> String {
		format!("{}:{}", self.namespace, key)
	}

	/// The value stored under `key`, deserialized into `T`.
	pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		match self.backend.get(&self.scoped(key)).await? {
			Some(value) => serde_json::from_value(value)
				.map(Some)
				.map_err(|e| Error::Serialization(e.to_string())),
			None => Ok(None),
		}
	}

	/// Store `value` under `key` and notify that key's watchers.
	pub async fn set<T>(&self, key: &str, value: &T) -> Result<()>
	where
		T: Serialize + Sync,
	{
		let value = serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
		self.backend.set(&self.scoped(key), value.clone()).await?;
		self.notify(key, Some(&value));
		Ok(())
	}

	/// Remove `key` and notify its watchers with an absent value.
	pub async fn delete(&self, key: &str) -> Result<()> {
		self.backend.delete(&self.scoped(key)).await?;
		self.notify(key, None);
		Ok(())
	}

	/// Remove every entry in this namespace.
	///
	/// Every live watcher is notified with an absent value, whether or not
	/// its key currently held an entry, so cells watching not-yet-written
	/// keys reset too.
	pub async fn clear(&self) -> Result<()> {
		let prefix = format!("{}:", self.namespace);
		for key in self.backend.keys(&prefix).await? {
			self.backend.delete(&key).await?;
		}
		tracing::debug!(namespace = %self.namespace, "store cleared");

		let watched: Vec<String> = self.watchers.by_key.read().keys().cloned().collect();
		for key in watched {
			self.notify(&key, None);
		}
		Ok(())
	}

	/// Subscribe to changes of `key` for as long as the returned guard
	/// lives. Dropping the guard unsubscribes.
	pub fn watch(&self, key: &str, listener: WatchListener) -> WatchGuard {
		let id = self.watchers.next_id.fetch_add(1, Ordering::Relaxed);
		self.watchers
			.by_key
			.write()
			.entry(key.to_string())
			.or_default()
			.push((id, listener));

		WatchGuard {
			watchers: Arc::downgrade(&self.watchers),
			key: key.to_string(),
			id,
		}
	}

	fn notify(&self, key: &str, value: Option<&Value>) {
		// Snapshot the listeners so none run under the lock.
		let listeners: Vec<WatchListener> = {
			let by_key = self.watchers.by_key.read();
			match by_key.get(key) {
				Some(listeners) => listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
				None => return,
			}
		};
		for listener in listeners {
			listener(value);
		}
	}
}

/// Keeps a [`Store::watch`] subscription alive; dropping it unsubscribes.
pub struct WatchGuard {
	watchers: Weak<Watchers>,
	key: String,
	id: u64,
}

impl Drop for WatchGuard {
	fn drop(&mut self) {
		if let Some(watchers) = self.watchers.upgrade() {
			watchers.remove(&self.key, self.id);
		}
	}
}
