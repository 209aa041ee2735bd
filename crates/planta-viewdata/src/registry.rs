//! View registry and engine configuration
//!
//! Views register once at startup. Generic views render without a gene;
//! user views are the ones a front end offers for selection and may include
//! generic ones. The registry also carries the defaults a front end boots
//! into.

use planta_core::ViewKind;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct RegistryInner {
	views: HashMap<String, Arc<ViewKind>>,
	generic: Vec<String>,
	user: Vec<String>,
	default_view: Option<String>,
	default_species: Option<String>,
}

/// Registered view kinds and front-end defaults.
#[derive(Default)]
pub struct ViewRegistry {
	inner: RwLock<RegistryInner>,
}

impl ViewRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a view that renders without a gene.
	pub async fn register_generic(&self, view: ViewKind) -> Arc<ViewKind> {
		let mut inner = self.inner.write().await;
		let id = view.id().to_string();
		let view = Arc::new(view);
		if !inner.generic.contains(&id) {
			inner.generic.push(id.clone());
		}
		inner.views.insert(id, Arc::clone(&view));
		view
	}

	/// Register a user-selectable view.
	pub async fn register_user(&self, view: ViewKind) -> Arc<ViewKind> {
		let mut inner = self.inner.write().await;
		let id = view.id().to_string();
		let view = Arc::new(view);
		if !inner.user.contains(&id) {
			inner.user.push(id.clone());
		}
		inner.views.insert(id, Arc::clone(&view));
		view
	}

	/// Look a view up by id.
	pub async fn get(&self, id: &str) -> Option<Arc<ViewKind>> {
		self.inner.read().await.views.get(id).cloned()
	}

	pub async fn has(&self, id: &str) -> bool {
		self.inner.read().await.views.contains_key(id)
	}

	/// Ids of views that render without a gene.
	pub async fn generic_views(&self) -> Vec<String> {
		self.inner.read().await.generic.clone()
	}

	/// Ids of user-selectable views.
	pub async fn user_views(&self) -> Vec<String> {
		self.inner.read().await.user.clone()
	}

	pub async fn set_default_view(&self, id: impl Into<String>) {
		self.inner.write().await.default_view = Some(id.into());
	}

	pub async fn default_view(&self) -> Option<String> {
		self.inner.read().await.default_view.clone()
	}

	pub async fn set_default_species(&self, name: impl Into<String>) {
		self.inner.write().await.default_species = Some(name.into());
	}

	pub async fn default_species(&self) -> Option<String> {
		self.inner.read().await.default_species.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_register_and_lookup() {
		let registry = ViewRegistry::new();
		registry
			.register_user(ViewKind::new("gene-info", "Gene info"))
			.await;

		assert!(registry.has("gene-info").await);
		let view = registry.get("gene-info").await.unwrap();
		assert_eq!(view.name(), "Gene info");
		assert!(registry.get("missing").await.is_none());
	}

	#[tokio::test]
	async fn test_generic_and_user_lists() {
		let registry = ViewRegistry::new();
		registry
			.register_generic(ViewKind::new("get-started", "Get started"))
			.await;
		registry
			.register_user(ViewKind::new("gene-info", "Gene info"))
			.await;
		// A generic view may be user-selectable too
		registry
			.register_user(ViewKind::new("get-started", "Get started"))
			.await;

		assert_eq!(registry.generic_views().await, vec!["get-started"]);
		assert_eq!(registry.user_views().await, vec!["gene-info", "get-started"]);
	}

	#[tokio::test]
	async fn test_defaults() {
		let registry = ViewRegistry::new();
		assert!(registry.default_view().await.is_none());

		registry.set_default_view("get-started").await;
		registry.set_default_species("Arabidopsis").await;

		assert_eq!(registry.default_view().await.as_deref(), Some("get-started"));
		assert_eq!(
			registry.default_species().await.as_deref(),
			Some("Arabidopsis")
		);
	}
}
