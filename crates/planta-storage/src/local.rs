//! File-backed storage backend

use crate::backend::StoreBackend;
use async_trait::async_trait;
use planta_core::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Backend persisting all entries to a single JSON file.
///
/// The file is read once on open; every mutation writes the full map back.
/// Suited to the small per-view records this engine stores, not to bulk
/// data.
#[derive(Clone)]
pub struct LocalBackend {
	path: PathBuf,
	entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl LocalBackend {
	/// Open a backend at `path`, loading existing entries if the file is
	/// present.
	pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let entries = match tokio::fs::read(&path).await {
			Ok(bytes) => serde_json::from_slice(&bytes)
				.map_err(|e| Error::Serialization(e.to_string()))?,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
			Err(e) => return Err(Error::Io(e)),
		};

		Ok(Self {
			path,
			entries: Arc::new(RwLock::new(entries)),
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	async fn persist(&self, entries: &HashMap<String, Value>) -> Result<()> {
		let bytes =
			serde_json::to_vec_pretty(entries).map_err(|e| Error::Serialization(e.to_string()))?;
		if let Some(parent) = self.path.parent() {
			tokio::fs::create_dir_all(parent).await?;
		}
		tokio::fs::write(&self.path, bytes).await?;
		Ok(())
	}
}

#[async_trait]
impl StoreBackend for LocalBackend {
	async fn get(&self, key: &str) -> Result<Option<Value>> {
		let entries = self.entries.read().await;
		Ok(entries.get(key).cloned())
	}

	async fn set(&self, key: &str, value: Value) -> Result<()> {
		let mut entries = self.entries.write().await;
		entries.insert(key.to_string(), value);
		self.persist(&entries).await
	}

	async fn delete(&self, key: &str) -> Result<()> {
		let mut entries = self.entries.write().await;
		if entries.remove(key).is_some() {
			self.persist(&entries).await?;
		}
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

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[tokio::test]
	async fn test_local_backend_round_trip_across_open() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("view-data.json");

		{
			let backend = LocalBackend::open(&path).await.unwrap();
			backend
				.set("view-data:gene-info-AT1G01010", json!({ "name": "X" }))
				.await
				.unwrap();
		}

		let reopened = LocalBackend::open(&path).await.unwrap();
		assert_eq!(
			reopened.get("view-data:gene-info-AT1G01010").await.unwrap(),
			Some(json!({ "name": "X" }))
		);
	}

	#[tokio::test]
	async fn test_local_backend_missing_file_is_empty() {
		let dir = tempfile::tempdir().unwrap();
		let backend = LocalBackend::open(dir.path().join("absent.json"))
			.await
			.unwrap();

		assert_eq!(backend.get("anything").await.unwrap(), None);
		assert!(backend.keys("").await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_local_backend_creates_parent_dirs() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("stores").join("data.json");

		let backend = LocalBackend::open(&path).await.unwrap();
		backend.set("k", json!(1)).await.unwrap();

		assert!(path.exists());
	}

	#[tokio::test]
	async fn test_local_backend_delete_persists() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("data.json");

		let backend = LocalBackend::open(&path).await.unwrap();
		backend.set("k", json!(1)).await.unwrap();
		backend.delete("k").await.unwrap();

		let reopened = LocalBackend::open(&path).await.unwrap();
		assert_eq!(reopened.get("k").await.unwrap(), None);
	}
}
