//! Storage backend contract

use async_trait::async_trait;
use planta_core::Result;
use serde_json::Value;

/// A flat asynchronous key-value backend.
///
/// Keys arriving here are already namespaced by [`Store`](crate::Store).
/// Backends persist opaque JSON values; the typed serde boundary lives on
/// the store, not here, so that backends stay object-safe behind
/// `Arc<dyn StoreBackend>`.
#[async_trait]
pub trait StoreBackend: Send + Sync {
	/// The value stored under `key`, or `None`.
	async fn get(&self, key: &str) -> Result<Option<Value>>;

	/// Store `value` under `key`, replacing any previous value.
	async fn set(&self, key: &str, value: Value) -> Result<()>;

	/// Remove `key`. Removing an absent key is not an error.
	async fn delete(&self, key: &str) -> Result<()>;

	/// All keys beginning with `prefix`.
	async fn keys(&self, prefix: &str) -> Result<Vec<String>>;
}
