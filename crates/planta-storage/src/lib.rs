//! Durable key-value storage for planta
//!
//! The engine addresses one flat backend through namespaced [`Store`]
//! facades (for example `view-data` and `view-state`). Stores serialize
//! values through serde at the boundary, and expose a per-key change feed
//! so that live cells observe external writes, including an administrative
//! clear.
//!
//! # Examples
//!
//! ```rust
//! use planta_storage::{MemoryBackend, Store};
//! use std::sync::Arc;
//!
//! # async fn example() -> planta_core::Result<()> {
//! let store = Store::new("view-data", Arc::new(MemoryBackend::new()));
//! store.set("gene-info-AT1G01010", &42u32).await?;
//! let value: Option<u32> = store.get("gene-info-AT1G01010").await?;
//! assert_eq!(value, Some(42));
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod local;
pub mod memory;
pub mod store;

pub use backend::StoreBackend;
pub use local::LocalBackend;
pub use memory::MemoryBackend;
pub use store::{Store, WatchGuard, WatchListener};
