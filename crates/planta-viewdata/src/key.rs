//! Cache key derivation

/// Sentinel subject id for view kinds not scoped to a gene.
pub const GENERIC_VIEW: &str = "generic-view";

/// Storage key for a (view, gene) pair.
///
/// Deterministic and total; distinct inputs yield distinct keys. Both cache
/// tiers and the durable store are addressed by this key.
pub fn derive_key(view_id: &str, gene_id: Option<&str>) -> String {
	format!("{}-{}", view_id, gene_id.unwrap_or(GENERIC_VIEW))
}

/// In-process key carrying a consumer's session discriminator.
///
/// Identity transitions are detected on this key, so two consumers showing
/// the same gene share durable cache without sharing guard state. The
/// discriminator never reaches the durable store.
pub fn qualified_key(key: &str, session: &str) -> String {
	format!("{}-{}", key, session)
}
