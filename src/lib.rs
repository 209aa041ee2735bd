//! # Planta
//!
//! Keyed data loading and cache synchronization for gene visualization
//! views.
//!
//! Every visualization panel in a planta front end observes data for a
//! (view kind, gene) pair. This crate ties the pieces together: a stable
//! cache key per pair, a shared reactive cell hydrated from a durable
//! key-value store, a load orchestrator that runs each view's loader at
//! most once per key with progress reporting, an in-process memory cache,
//! and a consumer surface that guards against stale results when the
//! requested key changes.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use planta::{
//!     GeneticElement, LoadProgress, MemoryBackend, Species, ViewDataEngine, ViewDataResult,
//!     ViewKind, ViewLoader,
//! };
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct GeneInfoLoader;
//!
//! #[async_trait]
//! impl ViewLoader for GeneInfoLoader {
//!     async fn load(
//!         &self,
//!         gene: Option<&GeneticElement>,
//!         progress: &dyn LoadProgress,
//!     ) -> ViewDataResult<Value> {
//!         progress.report(100.0);
//!         Ok(json!({ "id": gene.map(|g| g.id.clone()) }))
//!     }
//! }
//!
//! # async fn example() {
//! let engine = ViewDataEngine::new(Arc::new(MemoryBackend::new()));
//! let view = ViewKind::new("gene-info", "Gene info").with_loader(Arc::new(GeneInfoLoader));
//! let gene = GeneticElement::new("AT1G01010", Species::new("Arabidopsis"));
//!
//! let mut consumer = engine.consumer();
//! let data = consumer.settled(&view, Some(&gene)).await;
//! assert!(data.error.is_none());
//! # }
//! ```

pub mod core;
pub mod storage;
pub mod viewdata;

// Domain types and contracts
pub use planta_core::{
	Error, GeneticElement, LoadProgress, Result, Species, ViewDataError, ViewDataResult, ViewKind,
	ViewLoader, ViewReducer,
};

// Durable storage
pub use planta_storage::{LocalBackend, MemoryBackend, Store, StoreBackend, WatchGuard};

// The engine and consumer surface
pub use planta_viewdata::{
	derive_key, qualified_key, ViewData, ViewDataCell, ViewDataConsumer, ViewDataEngine,
	ViewDataRecord, ViewRegistry, GENERIC_VIEW,
};
