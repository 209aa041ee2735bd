//! Core module.
//!
//! Domain types and contracts: genetic elements, species, view kinds, and
//! the shared error types.

pub use planta_core::*;
