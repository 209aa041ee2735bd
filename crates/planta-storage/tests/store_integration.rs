//! Integration tests exercising stores over the file-backed backend.

use planta_storage::{LocalBackend, Store, WatchListener};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_store_survives_reopen() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("planta.json");

	{
		let backend = Arc::new(LocalBackend::open(&path).await.unwrap());
		let store = Store::new("view-data", backend);
		store
			.set("gene-info-AT1G01010", &json!({ "name": "X" }))
			.await
			.unwrap();
	}

	let backend = Arc::new(LocalBackend::open(&path).await.unwrap());
	let store = Store::new("view-data", backend);
	let value: Option<Value> = store.get("gene-info-AT1G01010").await.unwrap();
	assert_eq!(value, Some(json!({ "name": "X" })));
}

#[tokio::test]
async fn test_clear_wipes_only_own_namespace_on_disk() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("planta.json");
	let backend = Arc::new(LocalBackend::open(&path).await.unwrap());

	let data = Store::new("view-data", backend.clone());
	let state = Store::new("view-state", backend.clone());
	data.set("k", &1u32).await.unwrap();
	state.set("k", &2u32).await.unwrap();

	data.clear().await.unwrap();

	// Reopen from disk to make sure the clear was persisted
	let reopened = Arc::new(LocalBackend::open(&path).await.unwrap());
	let data = Store::new("view-data", reopened.clone());
	let state = Store::new("view-state", reopened);
	assert_eq!(data.get::<u32>("k").await.unwrap(), None);
	assert_eq!(state.get::<u32>("k").await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_watch_over_file_backend() {
	let dir = tempfile::tempdir().unwrap();
	let backend = Arc::new(LocalBackend::open(dir.path().join("planta.json")).await.unwrap());
	let store = Store::new("view-data", backend);

	let seen: Arc<Mutex<Vec<Option<Value>>>> = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	let listener: WatchListener = Arc::new(move |value: Option<&Value>| {
		sink.lock().unwrap().push(value.cloned());
	});
	let _guard = store.watch("k", listener);

	store.set("k", &json!("v")).await.unwrap();
	store.clear().await.unwrap();

	assert_eq!(*seen.lock().unwrap(), vec![Some(json!("v")), None]);
}
