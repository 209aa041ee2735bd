//! In-memory storage backend

use crate::backend::StoreBackend;
use async_trait::async_trait;
use planta_core::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory backend.
///
/// Cloning shares the underlying map, so several stores (or several engines
/// in tests) can address the same entries.
#[derive(Clone, Default)]
pub struct MemoryBackend {
	entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries currently held.
	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}
}

#[async_trait]
impl StoreBackend for MemoryBackend {
	async fn get(&self, key: &str) -> Result<Option<Value>> {
		let entries = self.entries.read().await;
		Ok(entries.get(key).cloned())
	}

	async fn set(&self, key: &str, value: Value) -> Result<()> {
		let mut entries = self.entries.write().await;
		entries.insert(key.to_string(), value);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<()> {
		let mut entries = self.entries.write().await;
		entries.remove(key);
		Ok(())
	}

	async fn keys(&self, prefix: &str) -> Result<Vec<String>> {
		let entries = self.entries.read().await;
		Ok(entries
			.keys()
			.filter(|key| key.starts_with(prefix))
			.cloned()
			.collect())
	}
}
