//! Genetic elements and species
//!
//! A [`GeneticElement`] is the subject a view's data is scoped to. Its
//! [`Species`] may override the loader for any view kind, which is how
//! species-specific data services plug into an otherwise generic view.

use crate::view::ViewLoader;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A species and its per-view loader overrides.
#[derive(Clone)]
pub struct Species {
	name: String,
	loaders: HashMap<String, Arc<dyn ViewLoader>>,
}

impl Species {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			loaders: HashMap::new(),
		}
	}

	/// Register a loader override for a view kind.
	pub fn with_loader(mut self, view_id: impl Into<String>, loader: Arc<dyn ViewLoader>) -> Self {
		self.loaders.insert(view_id.into(), loader);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Loader override for a view kind, if this species provides one.
	pub fn loader_for(&self, view_id: &str) -> Option<&Arc<dyn ViewLoader>> {
		self.loaders.get(view_id)
	}
}

impl fmt::Debug for Species {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut view_ids: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
		view_ids.sort_unstable();
		f.debug_struct("Species")
			.field("name", &self.name)
			.field("loaders", &view_ids)
			.finish()
	}
}

/// The subject entity a view kind's data is scoped to.
///
/// # Examples
///
/// ```rust
/// use planta_core::{GeneticElement, Species};
///
/// let gene = GeneticElement::new("AT1G01010", Species::new("Arabidopsis"))
///     .with_annotation("NAC domain containing protein 1")
///     .with_aliases(vec!["NAC001".to_string()]);
/// assert_eq!(gene.species.name(), "Arabidopsis");
/// ```
#[derive(Debug, Clone)]
pub struct GeneticElement {
	pub id: String,
	pub annotation: String,
	pub aliases: Vec<String>,
	pub species: Species,
}

impl GeneticElement {
	pub fn new(id: impl Into<String>, species: Species) -> Self {
		Self {
			id: id.into(),
			annotation: String::new(),
			aliases: Vec::new(),
			species,
		}
	}

	pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
		self.annotation = annotation.into();
		self
	}

	pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
		self.aliases = aliases;
		self
	}
}
