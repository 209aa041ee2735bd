//! View-data engine for planta
//!
//! Every visualization panel ("view") is backed by the same machinery: a
//! stable cache key derived from the (view, gene) pair, a shared reactive
//! cell per key hydrated from the durable store, a load orchestrator that
//! invokes the view's loader at most once per key, and a consumer surface
//! that guards against stale results when the requested key changes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use planta_storage::MemoryBackend;
//! use planta_viewdata::ViewDataEngine;
//! use planta_core::ViewKind;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let engine = ViewDataEngine::new(Arc::new(MemoryBackend::new()));
//! let view = ViewKind::new("gene-info", "Gene info");
//!
//! let mut consumer = engine.consumer();
//! let data = consumer.observe(&view, None).await;
//! if data.loading {
//!     // render a spinner at data.loading_amount
//! }
//! # }
//! ```

pub mod cache;
pub mod cell;
pub mod engine;
pub mod key;
pub mod record;
pub mod registry;
pub mod session;

pub use cache::MemoryCache;
pub use cell::{CellRegistry, ViewDataCell};
pub use engine::{ViewDataEngine, VIEW_DATA_STORE, VIEW_STATE_STORE};
pub use key::{derive_key, qualified_key, GENERIC_VIEW};
pub use record::ViewDataRecord;
pub use registry::ViewRegistry;
pub use session::{ViewData, ViewDataConsumer};
